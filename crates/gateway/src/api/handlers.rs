//! API handlers for `/api/supabase/:table`

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Path, Query, State,
};
use axum::Json;
use common::{ApiError, ApiResult, DataResponse};
use serde_json::Value;

use crate::api::models::*;
use crate::service::ResourceGateway;
use crate::types::Resource;

fn query<T>(params: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    params
        .map(|Query(p)| p)
        .map_err(|e| ApiError::validation(e.body_text()))
}

/// Filtered single-row lookup
pub async fn read_row(
    State(gateway): State<ResourceGateway>,
    Path(table): Path<String>,
    params: Result<Query<ReadParams>, QueryRejection>,
) -> ApiResult<RowResponse> {
    let resource: Resource = table.parse()?;
    let params = query(params)?;

    let row = gateway.read(resource, params.filters()).await?;
    Ok(DataResponse::new(row))
}

/// Insert, or get-or-create for shelves
pub async fn create_row(
    State(gateway): State<ResourceGateway>,
    Path(table): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RowResponse> {
    let resource: Resource = table.parse()?;
    let Json(body) = payload?;

    let row = gateway.create(resource, body).await?;
    Ok(DataResponse::new(Some(row)))
}

/// Partial update by primary key or column filter
pub async fn update_rows(
    State(gateway): State<ResourceGateway>,
    Path(table): Path<String>,
    params: Result<Query<UpdateParams>, QueryRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RowsResponse> {
    let resource: Resource = table.parse()?;
    let selector = query(params)?.selector();
    let Json(body) = payload?;

    let rows = gateway.update(resource, selector, body).await?;
    Ok(DataResponse::new(rows))
}

/// Delete by column filter
pub async fn delete_rows(
    State(gateway): State<ResourceGateway>,
    Path(table): Path<String>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> ApiResult<DataResponse<Option<Value>>> {
    let resource: Resource = table.parse()?;
    let selector = query(params)?.selector();

    gateway.delete(resource, selector).await?;
    Ok(DataResponse::empty())
}

#[cfg(test)]
mod tests {
    use crate::api::create_router;
    use crate::service::ResourceGateway;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use storage::{InMemoryTableStore, Row, StoreError};
    use tower::ServiceExt;

    fn setup() -> (Arc<InMemoryTableStore>, Router) {
        let store = Arc::new(InMemoryTableStore::new());
        let app = create_router(ResourceGateway::new(store.clone()));
        (store, app)
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_table_never_reaches_store() {
        let (store, app) = setup();

        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(&app, method, "/api/supabase/profiles", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Unknown table: profiles" }));
        }
        let (status, _) = send(&app, Method::POST, "/api/supabase/profiles", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(store.rows("profiles").is_empty());
    }

    #[tokio::test]
    async fn test_read_found_and_not_found() {
        let (store, app) = setup();
        store.seed(
            "soup_shelves",
            [row(json!({ "id": "s1", "user_id": "u1", "name": "Winter", "likes_count": 0 }))],
        );

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/supabase/soup_shelves?userId=u1&column=name&value=Winter",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "s1");

        let (status, body) = send(&app, Method::GET, "/api/supabase/soup_shelves?userId=u2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": null }));
    }

    #[tokio::test]
    async fn test_read_store_failure_is_500() {
        let (store, app) = setup();
        store.set_failure(Some(StoreError::Unavailable("connection refused".into())));

        let (status, body) = send(&app, Method::GET, "/api/supabase/soups?userId=u1", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_read_unknown_column_is_400() {
        let (_, app) = setup();

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/supabase/soups?column=secret&value=1",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_shelf_create_twice_returns_same_row() {
        let (store, app) = setup();
        let shelf = json!({ "user_id": "u1", "name": "Comfort", "likes_count": 0 });

        let (status, first) = send(&app, Method::POST, "/api/supabase/soup_shelves", Some(shelf.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = send(&app, Method::POST, "/api/supabase/soup_shelves", Some(shelf)).await;

        assert_eq!(first["data"]["id"], second["data"]["id"]);
        assert_eq!(store.rows("soup_shelves").len(), 1);
    }

    #[tokio::test]
    async fn test_soup_create_envelope() {
        let (_, app) = setup();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/supabase/soups_in_shelf",
            Some(json!({ "shelf_id": "s1", "name": "Miso" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Miso");
        assert!(body["data"]["id"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (store, app) = setup();

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/supabase/soups")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"name\": "))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.rows("soups").is_empty());
    }

    #[tokio::test]
    async fn test_like_increments_counter() {
        let (store, app) = setup();
        store.seed(
            "soup_shelves",
            [row(json!({ "id": "s1", "user_id": "u1", "name": "A", "likes_count": 2 }))],
        );

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/supabase/shelf_likes",
            Some(json!({ "user_id": "u2", "shelf_id": "s1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/supabase/soup_shelves?id=s1",
            Some(json!({ "likes_count": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["likes_count"], 3);
        assert_eq!(store.rows("soup_shelves")[0]["likes_count"], 3);
    }

    #[tokio::test]
    async fn test_shelf_patch_without_id_is_400() {
        let (_, app) = setup();

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/supabase/soup_shelves?column=name&value=A",
            Some(json!({ "likes_count": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "id is required");
    }

    #[tokio::test]
    async fn test_patch_by_column_returns_array() {
        let (store, app) = setup();
        store.seed(
            "soups",
            [row(json!({ "id": "1", "user_id": "u1", "name": "Pho", "is_public": false }))],
        );

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/supabase/soups?column=name&value=Pho",
            Some(json!({ "is_public": true })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_array());
        assert_eq!(body["data"][0]["is_public"], true);
    }

    #[tokio::test]
    async fn test_delete_returns_null_data() {
        let (store, app) = setup();
        store.seed(
            "shelf_likes",
            [row(json!({ "id": "l1", "user_id": "u1", "shelf_id": "s1" }))],
        );

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/api/supabase/shelf_likes?column=shelf_id&value=s1",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": null }));
        assert!(store.rows("shelf_likes").is_empty());
    }

    #[tokio::test]
    async fn test_refused_unscoped_delete() {
        let store = Arc::new(InMemoryTableStore::new());
        store.seed("soups", [row(json!({ "id": "1", "name": "Pho" }))]);
        let app = create_router(ResourceGateway::new(store.clone()).with_unscoped_writes(false));

        let (status, _) = send(&app, Method::DELETE, "/api/supabase/soups", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.rows("soups").len(), 1);
    }
}
