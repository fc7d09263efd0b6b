//! TableStore trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;
use crate::types::{Filter, Row};

/// TableStore trait - the table-level API of the hosted store
///
/// Implementations must not add guarantees the hosted store lacks: every call
/// is an independent round trip, and nothing here spans more than one call.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch exactly one row matching all filters
    ///
    /// # Returns
    /// The row, or the [`StoreError::no_rows`](crate::StoreError::no_rows)
    /// sentinel when zero or several rows match
    async fn select_single(&self, table: &str, filters: &[Filter]) -> StoreResult<Row>;

    /// Insert one row and return it as stored (with generated columns)
    async fn insert(&self, table: &str, row: Value) -> StoreResult<Row>;

    /// Apply `changes` to every row matching all filters
    ///
    /// An empty filter slice updates every row of the table.
    ///
    /// # Returns
    /// The updated rows
    async fn update(&self, table: &str, filters: &[Filter], changes: Row) -> StoreResult<Vec<Row>>;

    /// Delete every row matching all filters
    ///
    /// An empty filter slice deletes every row of the table.
    async fn delete(&self, table: &str, filters: &[Filter]) -> StoreResult<()>;
}
