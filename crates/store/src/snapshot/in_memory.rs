use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::OpeningStockProcedure;
use crate::stock::StoreError;

/// In-memory snapshot procedure for tests/dev. Counts captures.
#[derive(Debug, Default)]
pub struct InMemoryOpeningStock {
    captures: AtomicU64,
}

impl InMemoryOpeningStock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captures(&self) -> u64 {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OpeningStockProcedure for InMemoryOpeningStock {
    async fn capture(&self) -> Result<(), StoreError> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
