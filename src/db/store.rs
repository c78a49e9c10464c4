//! Storage abstraction shared by the MongoDB and in-memory backends
//!
//! A collection is addressed through [`DocumentStore`]. Reads are described by a
//! [`ScanPlan`]: at most one index probe (an equality on an indexed field), any
//! number of residual equality predicates applied in memory, an ordering and a
//! hard limit.

use async_trait::async_trait;
use bson::{Bson, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::types::{DocId, Result};

/// Field holding the primary key
pub const ID_FIELD: &str = "_id";

/// Field holding the creation timestamp (epoch millis)
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Field holding the last-mutation timestamp (epoch millis)
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Declarative secondary index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub unique: bool,
}

impl IndexSpec {
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            fields,
            unique: false,
        }
    }

    pub const fn unique(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            fields,
            unique: true,
        }
    }
}

/// Trait for schemas that declare their indexes
pub trait IntoIndexes {
    fn into_indices() -> Vec<IndexSpec>;
}

/// Trait for schemas carrying an identifier and insert/update timestamps
pub trait Record {
    /// Collection name in the store
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&DocId>;

    fn set_id(&mut self, id: DocId);

    /// Stamp `createdAt` and `updatedAt` on insert
    fn stamp_created(&mut self, now_ms: i64);
}

/// Bound satisfied by every persisted document type
pub trait StoredDoc:
    Serialize + DeserializeOwned + Record + IntoIndexes + Clone + Unpin + Send + Sync + 'static
{
}

impl<T> StoredDoc for T where
    T: Serialize + DeserializeOwned + Record + IntoIndexes + Clone + Unpin + Send + Sync + 'static
{
}

/// Equality probe against a named index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexProbe {
    pub index: &'static str,
    pub field: &'static str,
    pub value: Bson,
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recently created first
    NewestFirst,
    /// Ascending on a field, ties broken by creation order
    Ascending(&'static str),
}

/// A single-pass read against one collection
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPlan {
    /// Index to scan; `None` scans the whole collection
    pub probe: Option<IndexProbe>,
    /// Equality predicates applied after the index
    pub residual: Vec<(&'static str, Bson)>,
    pub order: SortOrder,
    pub limit: usize,
}

impl ScanPlan {
    /// Full collection scan, newest first
    pub fn full(limit: usize) -> Self {
        Self {
            probe: None,
            residual: Vec::new(),
            order: SortOrder::NewestFirst,
            limit,
        }
    }

    /// Equality lookup on an index, returning the first match
    pub fn lookup(index: &'static str, field: &'static str, value: impl Into<Bson>) -> Self {
        Self {
            probe: Some(IndexProbe {
                index,
                field,
                value: value.into(),
            }),
            residual: Vec::new(),
            order: SortOrder::NewestFirst,
            limit: 1,
        }
    }

    pub fn with_probe(mut self, index: &'static str, field: &'static str, value: Bson) -> Self {
        self.probe = Some(IndexProbe { index, field, value });
        self
    }

    pub fn with_residual(mut self, field: &'static str, value: Option<Bson>) -> Self {
        if let Some(value) = value {
            self.residual.push((field, value));
        }
        self
    }

    pub fn ordered(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Every equality the plan requires, index probe first
    pub fn predicates(&self) -> impl Iterator<Item = (&'static str, &Bson)> {
        self.probe
            .iter()
            .map(|p| (p.field, &p.value))
            .chain(self.residual.iter().map(|(f, v)| (*f, v)))
    }

    /// Whether a raw document satisfies every predicate of the plan
    pub fn matches(&self, doc: &Document) -> bool {
        self.predicates()
            .all(|(field, value)| doc.get(field) == Some(value))
    }
}

/// A typed collection of documents
#[async_trait]
pub trait DocumentStore<T>: Send + Sync
where
    T: StoredDoc,
{
    /// Collection name
    fn name(&self) -> &str;

    /// Insert a document, assigning its id and timestamps
    async fn insert(&self, item: T) -> Result<DocId>;

    /// Point lookup by primary key
    async fn get(&self, id: &DocId) -> Result<Option<T>>;

    /// Execute a read plan
    async fn scan(&self, plan: &ScanPlan) -> Result<Vec<T>>;

    /// Overwrite the given top-level fields and refresh `updatedAt`.
    /// Returns whether a document matched.
    async fn patch(&self, id: &DocId, set: Document) -> Result<bool>;

    /// Remove a document. Returns whether one was removed.
    async fn delete(&self, id: &DocId) -> Result<bool>;

    /// Remove every document, returning how many were removed
    async fn delete_all(&self) -> Result<u64>;

    async fn count(&self) -> Result<u64>;

    /// Number of documents satisfying a plan's predicates; the limit is ignored
    async fn count_matching(&self, plan: &ScanPlan) -> Result<u64>;

    /// First match of a plan
    async fn first(&self, plan: &ScanPlan) -> Result<Option<T>> {
        let mut plan = plan.clone();
        plan.limit = 1;
        Ok(self.scan(&plan).await?.into_iter().next())
    }
}

/// Strip fields a patch must never touch
pub fn sanitize_patch(mut set: Document) -> Document {
    set.remove(ID_FIELD);
    set.remove(CREATED_AT_FIELD);
    set
}
