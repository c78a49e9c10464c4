//! Document storage
//!
//! ```text
//!   ContentService
//!         │
//!   Collections ── Arc<dyn DocumentStore<T>> per collection
//!         │
//!   ┌─────┴──────┐
//!   MongoCollection   MemoryCollection
//! ```

pub mod memory;
pub mod mongo;
pub mod schemas;
pub mod store;

pub use memory::MemoryCollection;
pub use mongo::{MongoClient, MongoCollection};
pub use store::{DocumentStore, IndexSpec, IntoIndexes, Record, ScanPlan, SortOrder, StoredDoc};

use std::sync::Arc;

use schemas::{BlogPostDoc, IndustryDoc, InquiryDoc, PageDoc, ProductDoc, SiteSettingDoc};

use crate::types::Result;

/// Shared handle to one typed collection
pub type Store<T> = Arc<dyn DocumentStore<T>>;

/// Every collection the content backend reads and writes
#[derive(Clone)]
pub struct Collections {
    pub products: Store<ProductDoc>,
    pub blog_posts: Store<BlogPostDoc>,
    pub pages: Store<PageDoc>,
    pub industries: Store<IndustryDoc>,
    pub inquiries: Store<InquiryDoc>,
    pub site_settings: Store<SiteSettingDoc>,
    backend: &'static str,
}

impl Collections {
    /// Empty in-process collections
    pub fn memory() -> Self {
        Self {
            products: Arc::new(MemoryCollection::<ProductDoc>::new()),
            blog_posts: Arc::new(MemoryCollection::<BlogPostDoc>::new()),
            pages: Arc::new(MemoryCollection::<PageDoc>::new()),
            industries: Arc::new(MemoryCollection::<IndustryDoc>::new()),
            inquiries: Arc::new(MemoryCollection::<InquiryDoc>::new()),
            site_settings: Arc::new(MemoryCollection::<SiteSettingDoc>::new()),
            backend: "memory",
        }
    }

    /// Open every collection on a MongoDB database, creating indexes
    pub async fn mongo(client: &MongoClient) -> Result<Self> {
        Ok(Self {
            products: Arc::new(client.collection::<ProductDoc>().await?),
            blog_posts: Arc::new(client.collection::<BlogPostDoc>().await?),
            pages: Arc::new(client.collection::<PageDoc>().await?),
            industries: Arc::new(client.collection::<IndustryDoc>().await?),
            inquiries: Arc::new(client.collection::<InquiryDoc>().await?),
            site_settings: Arc::new(client.collection::<SiteSettingDoc>().await?),
            backend: "mongo",
        })
    }

    /// Backend name reported by the health endpoint
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}
