//! `pharmacore-store` — store-facing infrastructure.
//!
//! Capabilities over the hosted relational store: stock rows, the identity
//! subsystem, and the privilege-elevated opening-stock snapshot procedure.
//! Each capability is a trait with an in-memory implementation (dev/test)
//! and a Postgres implementation (production), plus the correction engine
//! that drives a batch of stock corrections against a store.

pub mod corrector;
pub mod identity;
pub mod snapshot;
pub mod stock;

pub use corrector::{
    CommittedStep, CorrectionError, CorrectionFailure, CorrectionOutcome, apply_batch,
};
pub use identity::{InMemorySessionVerifier, PostgresSessionVerifier, SessionVerifier};
pub use snapshot::{InMemoryOpeningStock, OpeningStockProcedure, PostgresOpeningStock};
pub use stock::{AppliedCorrection, InMemoryStockStore, PostgresStockStore, StockStore, StoreError};
