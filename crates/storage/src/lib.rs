//! Table store abstractions for Souperb
//!
//! The application keeps no data of its own: every row lives in a hosted
//! relational store reached over PostgREST. This crate provides the narrow
//! table-level API the rest of the workspace talks to.
//!
//! # Features
//!
//! - Equality filtering, single-row selects, inserts, partial updates, deletes
//! - A "no matching row" sentinel error distinguishable from real failures
//! - In-memory implementation for tests and local runs
//! - PostgREST HTTP implementation
//!
//! # Feature Flags
//!
//! - `client` - Enable the PostgREST HTTP store

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

#[cfg(feature = "client")]
pub mod postgrest;

pub use error::{StoreError, StoreResult, NO_ROWS_CODE};
pub use memory::InMemoryTableStore;
pub use traits::TableStore;
pub use types::{Filter, Row};

#[cfg(feature = "client")]
pub use postgrest::PostgrestStore;
