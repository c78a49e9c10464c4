//! In-process collection backend
//!
//! Keeps raw BSON documents keyed by id behind a `tokio::sync::RwLock`.
//! Unique indexes declared by the schema are enforced on insert and patch so
//! slug collisions fail the same way they do against MongoDB. Used by dev mode
//! and by the test suite.

use async_trait::async_trait;
use bson::{Bson, Document};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tokio::sync::RwLock;
use tracing::debug;

use crate::db::store::{
    sanitize_patch, DocumentStore, IndexSpec, ScanPlan, SortOrder, StoredDoc, UPDATED_AT_FIELD,
};
use crate::types::{now_ms, CmsError, DocId, Result};

/// In-memory collection of `T`
pub struct MemoryCollection<T> {
    name: &'static str,
    unique: Vec<IndexSpec>,
    docs: RwLock<BTreeMap<DocId, Document>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: StoredDoc> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            name: T::COLLECTION,
            unique: T::into_indices().into_iter().filter(|i| i.unique).collect(),
            docs: RwLock::new(BTreeMap::new()),
            _marker: PhantomData,
        }
    }

    /// Reject `candidate` if it collides with another document on a unique index
    fn check_unique(
        &self,
        docs: &BTreeMap<DocId, Document>,
        id: &DocId,
        candidate: &Document,
    ) -> Result<()> {
        for index in &self.unique {
            let key: Vec<Option<&Bson>> = index.fields.iter().map(|f| candidate.get(*f)).collect();
            let collides = docs.iter().any(|(other_id, other)| {
                other_id != id
                    && index
                        .fields
                        .iter()
                        .zip(&key)
                        .all(|(f, v)| other.get(*f) == *v)
            });
            if collides {
                return Err(CmsError::Conflict(format!(
                    "duplicate key for index '{}' on collection '{}'",
                    index.name, self.name
                )));
            }
        }
        Ok(())
    }
}

impl<T: StoredDoc> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Order two documents for a plan
fn compare(order: SortOrder, a: (&DocId, &Document), b: (&DocId, &Document)) -> std::cmp::Ordering {
    match order {
        SortOrder::NewestFirst => b.0.cmp(a.0),
        SortOrder::Ascending(field) => compare_bson(a.1.get(field), b.1.get(field))
            .then_with(|| a.0.cmp(b.0)),
    }
}

/// Ordering for the scalar types used as sort keys
fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    fn numeric(v: &Bson) -> Option<f64> {
        match v {
            Bson::Int32(i) => Some(f64::from(*i)),
            Bson::Int64(i) => Some(*i as f64),
            Bson::Double(d) => Some(*d),
            _ => None,
        }
    }

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (numeric(x), numeric(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => match (x, y) {
                (Bson::String(x), Bson::String(y)) => x.cmp(y),
                (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        },
    }
}

#[async_trait]
impl<T: StoredDoc> DocumentStore<T> for MemoryCollection<T> {
    fn name(&self) -> &str {
        self.name
    }

    async fn insert(&self, mut item: T) -> Result<DocId> {
        let id = DocId::generate();
        item.set_id(id.clone());
        item.stamp_created(now_ms());
        let doc = bson::to_document(&item)?;

        let mut docs = self.docs.write().await;
        self.check_unique(&docs, &id, &doc)?;
        docs.insert(id.clone(), doc);
        debug!("[{}] inserted {}", self.name, id);
        Ok(id)
    }

    async fn get(&self, id: &DocId) -> Result<Option<T>> {
        let docs = self.docs.read().await;
        match docs.get(id) {
            Some(doc) => Ok(Some(bson::from_document(doc.clone())?)),
            None => Ok(None),
        }
    }

    async fn scan(&self, plan: &ScanPlan) -> Result<Vec<T>> {
        let docs = self.docs.read().await;
        let mut hits: Vec<(&DocId, &Document)> =
            docs.iter().filter(|(_, doc)| plan.matches(doc)).collect();
        hits.sort_by(|a, b| compare(plan.order, *a, *b));

        hits.into_iter()
            .take(plan.limit)
            .map(|(_, doc)| bson::from_document(doc.clone()).map_err(CmsError::from))
            .collect()
    }

    async fn patch(&self, id: &DocId, set: Document) -> Result<bool> {
        let mut set = sanitize_patch(set);
        set.insert(UPDATED_AT_FIELD, now_ms());

        let mut docs = self.docs.write().await;
        let Some(current) = docs.get(id) else {
            return Ok(false);
        };

        let mut next = current.clone();
        for (key, value) in set {
            next.insert(key, value);
        }
        // Decode before committing so a patch can never leave an unreadable record
        bson::from_document::<T>(next.clone())?;
        self.check_unique(&docs, id, &next)?;

        docs.insert(id.clone(), next);
        Ok(true)
    }

    async fn delete(&self, id: &DocId) -> Result<bool> {
        Ok(self.docs.write().await.remove(id).is_some())
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut docs = self.docs.write().await;
        let removed = docs.len() as u64;
        docs.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.docs.read().await.len() as u64)
    }

    async fn count_matching(&self, plan: &ScanPlan) -> Result<u64> {
        let docs = self.docs.read().await;
        Ok(docs.values().filter(|doc| plan.matches(doc)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{IntoIndexes, Record, CREATED_AT_FIELD};
    use bson::doc;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Widget {
        #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
        id: Option<DocId>,
        slug: String,
        rank: i32,
        #[serde(default)]
        created_at: i64,
        #[serde(default)]
        updated_at: i64,
    }

    impl Record for Widget {
        const COLLECTION: &'static str = "widgets";

        fn id(&self) -> Option<&DocId> {
            self.id.as_ref()
        }

        fn set_id(&mut self, id: DocId) {
            self.id = Some(id);
        }

        fn stamp_created(&mut self, now_ms: i64) {
            self.created_at = now_ms;
            self.updated_at = now_ms;
        }
    }

    impl IntoIndexes for Widget {
        fn into_indices() -> Vec<IndexSpec> {
            vec![
                IndexSpec::unique("by_slug", &["slug"]),
                IndexSpec::new("by_rank", &["rank"]),
            ]
        }
    }

    fn widget(slug: &str, rank: i32) -> Widget {
        Widget {
            slug: slug.to_string(),
            rank,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = MemoryCollection::<Widget>::new();
        let id = store.insert(widget("a", 1)).await.unwrap();

        let stored = store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.id.as_ref(), Some(&id));
        assert!(stored.created_at > 0);
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate_insert() {
        let store = MemoryCollection::<Widget>::new();
        store.insert(widget("same", 1)).await.unwrap();

        let err = store.insert(widget("same", 2)).await.unwrap_err();
        assert!(matches!(err, CmsError::Conflict(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_index_rejects_colliding_patch() {
        let store = MemoryCollection::<Widget>::new();
        store.insert(widget("a", 1)).await.unwrap();
        let b = store.insert(widget("b", 2)).await.unwrap();

        let err = store.patch(&b, doc! { "slug": "a" }).await.unwrap_err();
        assert!(matches!(err, CmsError::Conflict(_)));
        assert_eq!(store.get(&b).await.unwrap().unwrap().slug, "b");

        // Re-writing its own slug is not a collision
        assert!(store.patch(&b, doc! { "slug": "b" }).await.unwrap());
    }

    #[tokio::test]
    async fn test_patch_keeps_created_at_and_refreshes_updated_at() {
        let store = MemoryCollection::<Widget>::new();
        let id = store.insert(widget("a", 1)).await.unwrap();
        let before = store.get(&id).await.unwrap().unwrap();

        let matched = store
            .patch(&id, doc! { "rank": 9, CREATED_AT_FIELD: 0_i64 })
            .await
            .unwrap();
        assert!(matched);

        let after = store.get(&id).await.unwrap().unwrap();
        assert_eq!(after.rank, 9);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= after.created_at);
    }

    #[tokio::test]
    async fn test_patch_missing_returns_false() {
        let store = MemoryCollection::<Widget>::new();
        let matched = store.patch(&DocId::from("nope"), doc! { "rank": 1 }).await.unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_patch_with_wrong_type_is_rejected() {
        let store = MemoryCollection::<Widget>::new();
        let id = store.insert(widget("a", 1)).await.unwrap();

        assert!(store.patch(&id, doc! { "rank": "high" }).await.is_err());
        assert_eq!(store.get(&id).await.unwrap().unwrap().rank, 1);
    }

    #[tokio::test]
    async fn test_scan_orders_and_limits() {
        let store = MemoryCollection::<Widget>::new();
        for (slug, rank) in [("c", 3), ("a", 1), ("b", 2)] {
            store.insert(widget(slug, rank)).await.unwrap();
        }

        let newest: Vec<String> = store
            .scan(&ScanPlan::full(2))
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.slug)
            .collect();
        assert_eq!(newest, vec!["b", "a"]);

        let by_rank: Vec<i32> = store
            .scan(&ScanPlan::full(10).ordered(SortOrder::Ascending("rank")))
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.rank)
            .collect();
        assert_eq!(by_rank, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_count_matching_ignores_limit() {
        let store = MemoryCollection::<Widget>::new();
        for (slug, rank) in [("a", 1), ("b", 2), ("c", 2), ("d", 2)] {
            store.insert(widget(slug, rank)).await.unwrap();
        }

        let plan = ScanPlan::full(1).with_probe("by_rank", "rank", Bson::Int32(2));
        assert_eq!(store.count_matching(&plan).await.unwrap(), 3);
        assert_eq!(store.count_matching(&ScanPlan::full(0)).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete_and_delete_all() {
        let store = MemoryCollection::<Widget>::new();
        let id = store.insert(widget("a", 1)).await.unwrap();
        store.insert(widget("b", 2)).await.unwrap();

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());

        assert_eq!(store.delete_all().await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
