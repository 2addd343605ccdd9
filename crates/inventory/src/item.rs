//! Strongly-typed identifiers for inventory records.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pharmacore_core::DomainError;

/// Identifier of a stock item (an inventory row tracked by quantity on hand).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockItemId(i64);

/// Identifier of a purchase order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(i64);

macro_rules! impl_i64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = s
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(id))
            }
        }
    };
}

impl_i64_newtype!(StockItemId, "StockItemId");
impl_i64_newtype!(PurchaseOrderId, "PurchaseOrderId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_str() {
        let id: StockItemId = "18".parse().expect("id");
        assert_eq!(id, StockItemId::new(18));
    }

    #[test]
    fn rejects_non_numeric() {
        let err = "pregabalin".parse::<StockItemId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
