//! Resource Gateway service
//!
//! Each operation is a short sequence of independent store calls. Nothing
//! here is transactional: get-or-create on shelves can insert duplicates
//! under concurrent requests, and the like counter is read then written, so
//! concurrent deltas can overwrite each other.

use serde_json::Value;
use std::sync::Arc;
use storage::{Filter, Row, TableStore};

use crate::error::{GatewayError, GatewayResult};
use crate::types::{CreatePolicy, Resource, Selector, UpdatePolicy, OWNER_COLUMN};

/// Table-keyed access to the hosted store
#[derive(Clone)]
pub struct ResourceGateway {
    store: Arc<dyn TableStore>,
    allow_unscoped_writes: bool,
}

impl ResourceGateway {
    /// Create a gateway that allows unscoped update/delete
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            allow_unscoped_writes: true,
        }
    }

    /// Allow or refuse update/delete requests without a selector
    pub fn with_unscoped_writes(mut self, allow: bool) -> Self {
        self.allow_unscoped_writes = allow;
        self
    }

    pub fn allows_unscoped_writes(&self) -> bool {
        self.allow_unscoped_writes
    }

    /// Look up a single row; `None` when no single row matches
    pub async fn read(&self, resource: Resource, filters: Vec<Filter>) -> GatewayResult<Option<Row>> {
        let result = self.do_read(resource, &filters).await;
        record(resource, "read", &result);
        result
    }

    /// Insert a row, or return the existing one for get-or-create resources
    pub async fn create(&self, resource: Resource, body: Value) -> GatewayResult<Row> {
        let result = match resource.create_policy() {
            CreatePolicy::Insert => self.insert(resource, body).await,
            CreatePolicy::GetOrCreate { keys } => self.get_or_create(resource, keys, body).await,
        };
        record(resource, "create", &result);
        result
    }

    /// Apply a partial update and return the updated rows
    pub async fn update(
        &self,
        resource: Resource,
        selector: Selector,
        body: Value,
    ) -> GatewayResult<Vec<Row>> {
        let result = self.do_update(resource, selector, body).await;
        record(resource, "update", &result);
        result
    }

    /// Delete the rows the selector matches
    pub async fn delete(&self, resource: Resource, selector: Selector) -> GatewayResult<()> {
        let result = self.do_delete(resource, selector).await;
        record(resource, "delete", &result);
        result
    }

    async fn do_read(&self, resource: Resource, filters: &[Filter]) -> GatewayResult<Option<Row>> {
        resource.check_filters(filters)?;

        match self.store.select_single(resource.table_name(), filters).await {
            Ok(row) => Ok(Some(row)),
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, resource: Resource, body: Value) -> GatewayResult<Row> {
        self.store
            .insert(resource.table_name(), body)
            .await
            .map_err(GatewayError::from_write)
    }

    async fn get_or_create(
        &self,
        resource: Resource,
        keys: &[&str],
        body: Value,
    ) -> GatewayResult<Row> {
        let filters = keys
            .iter()
            .map(|key| body.get(*key).and_then(|v| Filter::from_json(*key, v)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| GatewayError::invalid(format!("{} are required", keys.join(" and "))))?;

        match self.store.select_single(resource.table_name(), &filters).await {
            Ok(existing) => {
                tracing::debug!(table = %resource, "Returning existing row");
                Ok(existing)
            }
            Err(e) if e.is_no_rows() => self.insert(resource, body).await,
            Err(e) => Err(e.into()),
        }
    }

    async fn do_update(
        &self,
        resource: Resource,
        selector: Selector,
        body: Value,
    ) -> GatewayResult<Vec<Row>> {
        let Value::Object(mut changes) = body else {
            return Err(GatewayError::invalid("Request body must be a JSON object"));
        };
        changes.remove(OWNER_COLUMN);
        resource.check_filters(&selector.filters())?;

        if let UpdatePolicy::CounterDelta { counter } = resource.update_policy() {
            let Selector::Id(id) = &selector else {
                return Err(GatewayError::invalid("id is required"));
            };
            if let Some(delta) = changes.remove(counter) {
                let total = self.apply_delta(resource, id, counter, &delta).await?;
                changes.insert(counter.to_string(), Value::from(total));
            }
        } else {
            self.guard_unscoped(resource, "update", &selector)?;
        }

        Ok(self
            .store
            .update(resource.table_name(), &selector.filters(), changes)
            .await?)
    }

    async fn apply_delta(
        &self,
        resource: Resource,
        id: &str,
        counter: &str,
        delta: &Value,
    ) -> GatewayResult<i64> {
        let delta = delta
            .as_i64()
            .ok_or_else(|| GatewayError::invalid(format!("{counter} must be an integer")))?;

        let filters = Selector::Id(id.to_string()).filters();
        let current = match self.store.select_single(resource.table_name(), &filters).await {
            Ok(row) => row.get(counter).and_then(Value::as_i64).unwrap_or(0),
            Err(e) if e.is_no_rows() => {
                return Err(GatewayError::invalid(format!(
                    "No {resource} row with id {id}"
                )))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(current.saturating_add(delta))
    }

    async fn do_delete(&self, resource: Resource, selector: Selector) -> GatewayResult<()> {
        resource.check_filters(&selector.filters())?;
        self.guard_unscoped(resource, "delete", &selector)?;

        Ok(self
            .store
            .delete(resource.table_name(), &selector.filters())
            .await?)
    }

    fn guard_unscoped(
        &self,
        resource: Resource,
        operation: &'static str,
        selector: &Selector,
    ) -> GatewayResult<()> {
        if !selector.is_unscoped() {
            return Ok(());
        }
        if !self.allow_unscoped_writes {
            return Err(GatewayError::UnscopedWrite {
                operation,
                table: resource.table_name().to_string(),
            });
        }
        tracing::warn!(table = %resource, operation, "Unscoped write applies to every row");
        Ok(())
    }
}

fn record<T>(resource: Resource, operation: &'static str, result: &GatewayResult<T>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    metrics::counter!(
        "gateway_operations_total",
        "resource" => resource.table_name(),
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use storage::{InMemoryTableStore, StoreError};

    fn setup() -> (Arc<InMemoryTableStore>, ResourceGateway) {
        let store = Arc::new(InMemoryTableStore::new());
        let gateway = ResourceGateway::new(store.clone());
        (store, gateway)
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_read_returns_none_when_nothing_matches() {
        let (store, gateway) = setup();
        store.seed("soups", [row(json!({ "id": "1", "user_id": "u1", "name": "Pho" }))]);

        let found = gateway
            .read(Resource::Soups, vec![Filter::eq("user_id", "u1")])
            .await
            .unwrap();
        assert_eq!(found.unwrap()["name"], "Pho");

        let missing = gateway
            .read(Resource::Soups, vec![Filter::eq("user_id", "u2")])
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_read_multiple_matches_is_none() {
        let (store, gateway) = setup();
        store.seed(
            "soup_shelves",
            [
                row(json!({ "id": "a", "user_id": "u1", "name": "A" })),
                row(json!({ "id": "b", "user_id": "u1", "name": "B" })),
            ],
        );

        let result = gateway
            .read(Resource::SoupShelves, vec![Filter::eq("user_id", "u1")])
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_errors() {
        let (store, gateway) = setup();

        let err = gateway
            .read(Resource::Soups, vec![Filter::eq("password", "x")])
            .await
            .unwrap_err();
        assert_matches!(err, GatewayError::UnknownColumn { .. });

        store.set_failure(Some(StoreError::Unavailable("down".into())));
        let err = gateway.read(Resource::Soups, vec![]).await.unwrap_err();
        assert_matches!(err, GatewayError::Store(_));
    }

    #[tokio::test]
    async fn test_shelf_get_or_create_is_idempotent() {
        let (store, gateway) = setup();
        let body = json!({ "user_id": "u1", "name": "Winter Warmers", "is_public": true });

        let first = gateway.create(Resource::SoupShelves, body.clone()).await.unwrap();
        let second = gateway.create(Resource::SoupShelves, body).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.rows("soup_shelves").len(), 1);
    }

    #[tokio::test]
    async fn test_shelf_create_requires_keys() {
        let (store, gateway) = setup();

        let err = gateway
            .create(Resource::SoupShelves, json!({ "name": "No owner" }))
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Invalid("user_id and name are required".into()));
        assert!(store.rows("soup_shelves").is_empty());
    }

    #[tokio::test]
    async fn test_likes_always_insert() {
        let (store, gateway) = setup();
        let like = json!({ "user_id": "u1", "shelf_id": "s1" });

        gateway.create(Resource::ShelfLikes, like.clone()).await.unwrap();
        gateway.create(Resource::ShelfLikes, like).await.unwrap();

        assert_eq!(store.rows("shelf_likes").len(), 2);
    }

    #[tokio::test]
    async fn test_soup_records_always_insert() {
        let (store, gateway) = setup();
        let soup = json!({ "name": "Pho", "description": "Beef broth" });
        let entry = json!({ "shelf_id": "s1", "soup_id": "soup-1" });

        for _ in 0..2 {
            gateway.create(Resource::Soups, soup.clone()).await.unwrap();
            gateway.create(Resource::SoupsInShelf, entry.clone()).await.unwrap();
        }

        assert_eq!(store.rows("soups").len(), 2);
        assert_eq!(store.rows("soups_in_shelf").len(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejection_is_client_error() {
        let (_, gateway) = setup();

        let err = gateway.create(Resource::Soups, json!("not a row")).await.unwrap_err();

        assert_matches!(err, GatewayError::Rejected(_));
    }

    #[tokio::test]
    async fn test_likes_count_is_a_delta() {
        let (store, gateway) = setup();
        store.seed(
            "soup_shelves",
            [row(json!({ "id": "s1", "user_id": "u1", "name": "A", "likes_count": 3 }))],
        );

        let rows = gateway
            .update(
                Resource::SoupShelves,
                Selector::Id("s1".into()),
                json!({ "likes_count": 1 }),
            )
            .await
            .unwrap();
        assert_eq!(rows[0]["likes_count"], 4);

        let rows = gateway
            .update(
                Resource::SoupShelves,
                Selector::Id("s1".into()),
                json!({ "likes_count": -1, "description": "cozy" }),
            )
            .await
            .unwrap();
        assert_eq!(rows[0]["likes_count"], 3);
        assert_eq!(rows[0]["description"], "cozy");
    }

    #[tokio::test]
    async fn test_null_counter_counts_as_zero() {
        let (store, gateway) = setup();
        store.seed(
            "soup_shelves",
            [row(json!({ "id": "s1", "user_id": "u1", "name": "A", "likes_count": null }))],
        );

        let rows = gateway
            .update(
                Resource::SoupShelves,
                Selector::Id("s1".into()),
                json!({ "likes_count": 1 }),
            )
            .await
            .unwrap();

        assert_eq!(rows[0]["likes_count"], 1);
    }

    #[tokio::test]
    async fn test_shelf_update_validation() {
        let (store, gateway) = setup();
        store.seed("soup_shelves", [row(json!({ "id": "s1", "user_id": "u1", "name": "A" }))]);

        let err = gateway
            .update(Resource::SoupShelves, Selector::All, json!({ "name": "B" }))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Invalid("id is required".into()));

        let err = gateway
            .update(
                Resource::SoupShelves,
                Selector::Id("s1".into()),
                json!({ "likes_count": "one" }),
            )
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Invalid("likes_count must be an integer".into()));

        let err = gateway
            .update(
                Resource::SoupShelves,
                Selector::Id("missing".into()),
                json!({ "likes_count": 1 }),
            )
            .await
            .unwrap_err();
        assert_matches!(err, GatewayError::Invalid(_));

        let err = gateway
            .update(Resource::SoupShelves, Selector::Id("s1".into()), json!([1]))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Invalid("Request body must be a JSON object".into()));
    }

    #[tokio::test]
    async fn test_update_never_writes_owner() {
        let (store, gateway) = setup();
        store.seed("soups", [row(json!({ "id": "1", "user_id": "u1", "name": "Pho" }))]);

        let rows = gateway
            .update(
                Resource::Soups,
                Selector::Id("1".into()),
                json!({ "user_id": "attacker", "name": "Pho Ga" }),
            )
            .await
            .unwrap();

        assert_eq!(rows[0]["user_id"], "u1");
        assert_eq!(rows[0]["name"], "Pho Ga");
    }

    #[tokio::test]
    async fn test_unscoped_writes_follow_configuration() {
        let (store, gateway) = setup();
        store.seed(
            "soups_in_shelf",
            [
                row(json!({ "id": "1", "shelf_id": "s1", "name": "Pho" })),
                row(json!({ "id": "2", "shelf_id": "s2", "name": "Ramen" })),
            ],
        );

        let strict = gateway.clone().with_unscoped_writes(false);
        let err = strict
            .update(Resource::SoupsInShelf, Selector::All, json!({ "description": "x" }))
            .await
            .unwrap_err();
        assert_matches!(err, GatewayError::UnscopedWrite { operation: "update", .. });
        let err = strict.delete(Resource::SoupsInShelf, Selector::All).await.unwrap_err();
        assert_matches!(err, GatewayError::UnscopedWrite { operation: "delete", .. });
        assert_eq!(store.rows("soups_in_shelf").len(), 2);

        let rows = gateway
            .update(Resource::SoupsInShelf, Selector::All, json!({ "description": "x" }))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        tokio_test::assert_ok!(gateway.delete(Resource::SoupsInShelf, Selector::All).await);
        assert!(store.rows("soups_in_shelf").is_empty());
    }

    #[tokio::test]
    async fn test_scoped_delete() {
        let (store, gateway) = setup();
        store.seed(
            "shelf_likes",
            [
                row(json!({ "id": "1", "user_id": "u1", "shelf_id": "s1" })),
                row(json!({ "id": "2", "user_id": "u2", "shelf_id": "s1" })),
            ],
        );

        gateway
            .delete(
                Resource::ShelfLikes,
                Selector::Column(Filter::eq("user_id", "u1")),
            )
            .await
            .unwrap();

        let remaining = store.rows("shelf_likes");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["user_id"], "u2");
    }
}
