//! In-memory table store implementation
//!
//! Behaves like the hosted store for the subset of semantics the gateway
//! relies on: generated `id` and `created_at` columns, equality filters, the
//! single-row sentinel, and unscoped update/delete when no filter is given.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::traits::TableStore;
use crate::types::{Filter, Row};

/// In-memory table store
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    failure: RwLock<Option<StoreError>>,
}

impl InMemoryTableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
        }
    }

    /// Make every subsequent call fail with `error`
    pub fn with_failure(self, error: StoreError) -> Self {
        *self.failure.write() = Some(error);
        self
    }

    /// Clear or replace the injected failure
    pub fn set_failure(&self, error: Option<StoreError>) {
        *self.failure.write() = error;
    }

    /// Insert rows verbatim, bypassing generated columns
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Row>) {
        self.tables
            .write()
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Snapshot of a table's rows
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.read().get(table).cloned().unwrap_or_default()
    }

    fn check_failure(&self) -> StoreResult<()> {
        match self.failure.read().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_all(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(row))
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn select_single(&self, table: &str, filters: &[Filter]) -> StoreResult<Row> {
        self.check_failure()?;

        let tables = self.tables.read();
        let mut matched = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| matches_all(r, filters))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if matched.len() == 1 {
            Ok(matched.remove(0))
        } else {
            Err(StoreError::no_rows(matched.len()))
        }
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Row> {
        self.check_failure()?;

        let mut row = match row {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::rejected(
                    Some("PGRST102"),
                    format!("Expected a JSON object, got {other}"),
                ))
            }
        };

        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        self.tables
            .write()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());

        Ok(row)
    }

    async fn update(&self, table: &str, filters: &[Filter], changes: Row) -> StoreResult<Vec<Row>> {
        self.check_failure()?;

        let mut tables = self.tables.write();
        let Some(rows) = tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|r| matches_all(r, filters)) {
            for (column, value) in &changes {
                row.insert(column.clone(), value.clone());
            }
            updated.push(row.clone());
        }

        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> StoreResult<()> {
        self.check_failure()?;

        if let Some(rows) = self.tables.write().get_mut(table) {
            rows.retain(|r| !matches_all(r, filters));
        }

        Ok(())
    }
}
