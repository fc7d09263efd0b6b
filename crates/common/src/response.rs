//! Success envelopes

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Uniform success body: `{"data": ...}`
///
/// `data` is `null` when a lookup matched nothing or when an operation has
/// nothing to return (deletes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl DataResponse<Option<serde_json::Value>> {
    /// Envelope with `null` data
    pub fn empty() -> Self {
        Self { data: None }
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
