//! Query parameter models for `/api/supabase/:table`

use serde::Deserialize;
use storage::{Filter, Row};

use crate::types::{Selector, OWNER_COLUMN};

/// Build a filter only when both halves are present and non-empty
fn pair(column: Option<&str>, value: Option<&str>) -> Option<Filter> {
    match (column, value) {
        (Some(c), Some(v)) if !c.is_empty() && !v.is_empty() => Some(Filter::eq(c, v)),
        _ => None,
    }
}

/// `GET` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub column: Option<String>,
    pub value: Option<String>,
    pub column2: Option<String>,
    pub value2: Option<String>,
}

impl ReadParams {
    pub fn filters(&self) -> Vec<Filter> {
        [
            pair(Some(OWNER_COLUMN), self.user_id.as_deref()),
            pair(self.column.as_deref(), self.value.as_deref()),
            pair(self.column2.as_deref(), self.value2.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// `PATCH` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct UpdateParams {
    pub id: Option<String>,
    pub column: Option<String>,
    pub value: Option<String>,
}

impl UpdateParams {
    pub fn selector(self) -> Selector {
        let filter = pair(self.column.as_deref(), self.value.as_deref());
        Selector::from_parts(self.id.filter(|id| !id.is_empty()), filter)
    }
}

/// `DELETE` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub column: Option<String>,
    pub value: Option<String>,
}

impl DeleteParams {
    pub fn selector(&self) -> Selector {
        Selector::from_parts(None, pair(self.column.as_deref(), self.value.as_deref()))
    }
}

/// `{"data": row}` or `{"data": null}`
pub type RowResponse = common::DataResponse<Option<Row>>;

/// `{"data": [rows]}`
pub type RowsResponse = common::DataResponse<Vec<Row>>;
