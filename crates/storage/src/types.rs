//! Row and filter types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A table row as the store returns it
pub type Row = serde_json::Map<String, Value>;

/// Equality filter on a single column
///
/// Values travel as text, the way they arrive in query strings; the store is
/// responsible for comparing them against typed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    /// Create an equality filter
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Build a filter from a JSON value, as found in a request body
    ///
    /// Returns `None` for `null`, arrays, and objects, which cannot be
    /// compared with plain equality.
    pub fn from_json(column: impl Into<String>, value: &Value) -> Option<Self> {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        Some(Self::eq(column, text))
    }

    /// Whether a row satisfies this filter
    ///
    /// `null` never matches, mirroring SQL equality semantics.
    pub fn matches(&self, row: &Row) -> bool {
        match row.get(&self.column) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Number(n)) => n.to_string() == self.value,
            Some(Value::Bool(b)) => b.to_string() == self.value,
            _ => false,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=eq.{}", self.column, self.value)
    }
}
