//! PostgREST table store implementation

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};
use crate::traits::TableStore;
use crate::types::{Filter, Row};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error body PostgREST sends with non-success responses
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP-based table store talking to `{base_url}/rest/v1`
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// Create a new PostgREST store
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Create a store whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, method: Method, table: &str, filters: &[Filter]) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let query: Vec<(&str, String)> = filters
            .iter()
            .map(|f| (f.column.as_str(), format!("eq.{}", f.value)))
            .collect();

        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&query)
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

async fn error_from_response(response: Response) -> StoreError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let (code, message) = match serde_json::from_str::<PostgrestErrorBody>(&text) {
        Ok(body) => (body.code, body.message),
        Err(_) => (None, None),
    };
    let message = message.unwrap_or_else(|| {
        if text.is_empty() {
            format!("PostgREST responded with {status}")
        } else {
            text
        }
    });

    if status.is_server_error() {
        tracing::warn!(%status, %message, "PostgREST server error");
        StoreError::Unavailable(message)
    } else {
        StoreError::Rejected { code, message }
    }
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn select_single(&self, table: &str, filters: &[Filter]) -> StoreResult<Row> {
        let request = self
            .request(Method::GET, table, filters)
            .query(&[("select", "*")])
            .header(header::ACCEPT, SINGLE_OBJECT);

        self.send(request)
            .await?
            .json::<Row>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Row> {
        let request = self
            .request(Method::POST, table, &[])
            .header(header::ACCEPT, SINGLE_OBJECT)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&row);

        self.send(request)
            .await?
            .json::<Row>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn update(&self, table: &str, filters: &[Filter], changes: Row) -> StoreResult<Vec<Row>> {
        let request = self
            .request(Method::PATCH, table, filters)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&changes);

        self.send(request)
            .await?
            .json::<Vec<Row>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> StoreResult<()> {
        self.send(self.request(Method::DELETE, table, filters))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_select_single_sends_filters_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/soup_shelves"))
            .and(query_param("user_id", "eq.u1"))
            .and(query_param("name", "eq.Winter Warmers"))
            .and(query_param("select", "*"))
            .and(header_eq("apikey", "anon"))
            .and(header_eq("authorization", "Bearer anon"))
            .and(header_eq("accept", SINGLE_OBJECT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "s1", "name": "Winter Warmers" })))
            .mount(&server)
            .await;

        let store = PostgrestStore::new(&server.uri(), "anon");
        let row = store
            .select_single(
                "soup_shelves",
                &[Filter::eq("user_id", "u1"), Filter::eq("name", "Winter Warmers")],
            )
            .await
            .unwrap();

        assert_eq!(row["id"], "s1");
    }

    #[tokio::test]
    async fn test_no_rows_maps_to_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/soups"))
            .respond_with(ResponseTemplate::new(406).set_body_json(json!({
                "code": "PGRST116",
                "details": "The result contains 0 rows",
                "hint": null,
                "message": "JSON object requested, multiple (or no) rows returned"
            })))
            .mount(&server)
            .await;

        let store = PostgrestStore::new(&server.uri(), "anon");
        let err = store.select_single("soups", &[]).await.unwrap_err();

        assert!(err.is_no_rows());
    }

    #[tokio::test]
    async fn test_insert_rejection_keeps_store_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/soups_in_shelf"))
            .and(header_eq("prefer", RETURN_REPRESENTATION))
            .and(body_json(json!({ "name": "Pho" })))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "23502",
                "message": "null value in column \"shelf_id\" violates not-null constraint"
            })))
            .mount(&server)
            .await;

        let store = PostgrestStore::new(&server.uri(), "anon");
        let err = store
            .insert("soups_in_shelf", json!({ "name": "Pho" }))
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some("23502"));
        assert!(err.to_string().contains("not-null"));
    }

    #[tokio::test]
    async fn test_update_returns_rows() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/soup_shelves"))
            .and(query_param("id", "eq.s1"))
            .and(body_json(json!({ "likes_count": 4 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "s1", "likes_count": 4 }])))
            .mount(&server)
            .await;

        let store = PostgrestStore::new(&server.uri(), "anon");
        let mut changes = Row::new();
        changes.insert("likes_count".into(), json!(4));

        let rows = store
            .update("soup_shelves", &[Filter::eq("id", "s1")], changes)
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["likes_count"], 4);
    }

    #[tokio::test]
    async fn test_delete_and_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/shelf_likes"))
            .and(query_param("shelf_id", "eq.s1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/soups"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let store = PostgrestStore::new(&server.uri(), "anon");

        tokio_test::assert_ok!(store.delete("shelf_likes", &[Filter::eq("shelf_id", "s1")]).await);

        let err = store.delete("soups", &[]).await.unwrap_err();
        assert_matches!(err, StoreError::Unavailable(ref msg) if msg == "upstream down");
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let store = PostgrestStore::new("http://127.0.0.1:9", "anon");
        let err = store.select_single("soups", &[]).await.unwrap_err();
        assert_matches!(err, StoreError::Unavailable(_));
    }
}
