//! The opening-stock snapshot routine.

use std::sync::Arc;

use async_trait::async_trait;

use crate::stock::StoreError;

mod in_memory;
mod postgres;

pub use in_memory::InMemoryOpeningStock;
pub use postgres::PostgresOpeningStock;

/// Captures a point-in-time snapshot of all current stock as the opening
/// stock for the next accounting period.
///
/// Implementations hold the privilege-elevated credential and expose
/// nothing else. The call takes no parameters and is all-or-nothing on the
/// store side; repeated calls each attempt a fresh snapshot.
#[async_trait]
pub trait OpeningStockProcedure: Send + Sync {
    async fn capture(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> OpeningStockProcedure for Arc<S>
where
    S: OpeningStockProcedure + ?Sized,
{
    async fn capture(&self) -> Result<(), StoreError> {
        (**self).capture().await
    }
}
