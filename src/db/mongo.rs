//! MongoDB client and collection wrapper
//!
//! Collections apply their schema-declared indexes on open. Reads translate a
//! [`ScanPlan`] into a filter, sort, limit and index hint.

use async_trait::async_trait;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::{Hint, IndexOptions},
    Client, Collection, IndexModel,
};
use tracing::info;

use crate::db::store::{
    sanitize_patch, DocumentStore, IndexSpec, ScanPlan, SortOrder, StoredDoc, ID_FIELD,
    UPDATED_AT_FIELD,
};
use crate::types::{now_ms, CmsError, DocId, Result};

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and verify the server answers a ping
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        // Fail fast instead of hanging on an unreachable server
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| CmsError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| CmsError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Open a typed collection, creating its indexes
    pub async fn collection<T: StoredDoc>(&self) -> Result<MongoCollection<T>> {
        MongoCollection::new(&self.client, &self.db_name, T::COLLECTION).await
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Send + Sync,
{
    inner: Collection<T>,
}

impl<T: StoredDoc> MongoCollection<T> {
    pub async fn new(client: &Client, db_name: &str, collection_name: &str) -> Result<Self> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };
        mongo_collection.apply_indexes().await?;
        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<()> {
        let indices: Vec<IndexModel> = T::into_indices().iter().map(index_model).collect();
        if indices.is_empty() {
            return Ok(());
        }

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| CmsError::Database(format!("Failed to create indexes: {}", e)))?;
        Ok(())
    }
}

/// Build a driver index model from a declared index
fn index_model(spec: &IndexSpec) -> IndexModel {
    let mut keys = Document::new();
    for field in spec.fields {
        keys.insert(*field, 1);
    }
    IndexModel::builder()
        .keys(keys)
        .options(Some(
            IndexOptions::builder()
                .name(spec.name.to_string())
                .unique(spec.unique)
                .build(),
        ))
        .build()
}

/// Filter document for a plan
fn plan_filter(plan: &ScanPlan) -> Document {
    let mut filter = Document::new();
    for (field, value) in plan.predicates() {
        filter.insert(field, value.clone());
    }
    filter
}

/// Sort document for a plan
fn plan_sort(order: SortOrder) -> Document {
    match order {
        SortOrder::NewestFirst => doc! { ID_FIELD: -1 },
        SortOrder::Ascending(field) => doc! { field: 1, ID_FIELD: 1 },
    }
}

/// Map driver errors, surfacing unique index violations as conflicts
fn map_write_error(context: &str, e: mongodb::error::Error) -> CmsError {
    if let ErrorKind::Write(WriteFailure::WriteError(ref we)) = *e.kind {
        if we.code == DUPLICATE_KEY_CODE {
            return CmsError::Conflict(format!("{}: {}", context, we.message));
        }
    }
    CmsError::Database(format!("{} failed: {}", context, e))
}

#[async_trait]
impl<T: StoredDoc> DocumentStore<T> for MongoCollection<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn insert(&self, mut item: T) -> Result<DocId> {
        let id = DocId::generate();
        item.set_id(id.clone());
        item.stamp_created(now_ms());

        self.inner
            .insert_one(item)
            .await
            .map_err(|e| map_write_error("Insert", e))?;
        Ok(id)
    }

    async fn get(&self, id: &DocId) -> Result<Option<T>> {
        self.inner
            .find_one(doc! { ID_FIELD: id.as_str() })
            .await
            .map_err(|e| CmsError::Database(format!("Find failed: {}", e)))
    }

    async fn scan(&self, plan: &ScanPlan) -> Result<Vec<T>> {
        let mut find = self
            .inner
            .find(plan_filter(plan))
            .sort(plan_sort(plan.order))
            .limit(i64::try_from(plan.limit).unwrap_or(i64::MAX));
        if let Some(probe) = &plan.probe {
            find = find.hint(Hint::Name(probe.index.to_string()));
        }

        let cursor = find
            .await
            .map_err(|e| CmsError::Database(format!("Find failed: {}", e)))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| CmsError::Database(format!("Error reading documents: {}", e)))
    }

    async fn patch(&self, id: &DocId, set: Document) -> Result<bool> {
        let mut set = sanitize_patch(set);
        set.insert(UPDATED_AT_FIELD, now_ms());

        let result = self
            .inner
            .update_one(doc! { ID_FIELD: id.as_str() }, doc! { "$set": set })
            .await
            .map_err(|e| map_write_error("Update", e))?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &DocId) -> Result<bool> {
        let result = self
            .inner
            .delete_one(doc! { ID_FIELD: id.as_str() })
            .await
            .map_err(|e| CmsError::Database(format!("Delete failed: {}", e)))?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = self
            .inner
            .delete_many(doc! {})
            .await
            .map_err(|e| CmsError::Database(format!("Delete failed: {}", e)))?;
        Ok(result.deleted_count)
    }

    async fn count(&self) -> Result<u64> {
        self.inner
            .count_documents(doc! {})
            .await
            .map_err(|e| CmsError::Database(format!("Count failed: {}", e)))
    }

    async fn count_matching(&self, plan: &ScanPlan) -> Result<u64> {
        self.inner
            .count_documents(plan_filter(plan))
            .await
            .map_err(|e| CmsError::Database(format!("Count failed: {}", e)))
    }
}
