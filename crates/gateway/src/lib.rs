//! Resource Gateway
//!
//! A single table-keyed surface over the hosted relational store. The path
//! segment picks a [`Resource`]; each resource carries its own column set and
//! create/update policies, and [`ResourceGateway`] applies them before handing
//! the request to a [`storage::TableStore`].
//!
//! # Feature Flags
//!
//! - `api` - Enable the HTTP routes (`/api/supabase/:table`)

pub mod error;
pub mod service;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{GatewayError, GatewayResult};
pub use service::ResourceGateway;
pub use types::{CreatePolicy, Resource, Selector, UpdatePolicy};
