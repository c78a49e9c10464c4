//! Content services
//!
//! [`ContentService`] is the query/mutation layer: one method per
//! `(entity, operation)` pair, plus the seed/clear utility and the admin
//! dashboard counts. Reads never fail on absence; they return `None` or an
//! empty list.
//!
//! ## Modules
//!
//! - **products**, **blog_posts**, **pages**, **industries**: catalog CRUD
//! - **inquiries**: contact form submissions and their pipeline status
//! - **settings**: site-wide key/value settings
//! - **seed**: demo dataset load and full clear
//! - **dashboard**: admin overview counts

pub mod blog_posts;
pub mod dashboard;
pub mod industries;
pub mod inquiries;
pub mod pages;
pub mod products;
pub mod seed;
mod seed_data;
pub mod settings;

pub use blog_posts::BlogPostQuery;
pub use dashboard::DashboardStats;
pub use industries::IndustryQuery;
pub use inquiries::InquiryQuery;
pub use pages::PageQuery;
pub use products::ProductQuery;
pub use seed::{ClearReport, OperationStatus, SeedReport, SeedStats};

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::db::schemas::patch_document;
use crate::db::{Collections, ScanPlan, Store, StoredDoc};
use crate::types::{CmsError, DocId, Result};

/// Query and mutation functions over every content collection
pub struct ContentService {
    collections: Collections,
    seed_status: RwLock<OperationStatus>,
    clear_status: RwLock<OperationStatus>,
    /// Held for the whole of a seed or clear run
    maintenance: Mutex<()>,
}

impl ContentService {
    pub fn new(collections: Collections) -> Self {
        Self {
            collections,
            seed_status: RwLock::new(OperationStatus::Idle),
            clear_status: RwLock::new(OperationStatus::Idle),
            maintenance: Mutex::new(()),
        }
    }

    /// Service over empty in-process collections
    pub fn memory() -> Self {
        Self::new(Collections::memory())
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }
}

/// Point lookup on a unique `slug` field
async fn find_by_slug<T: StoredDoc>(store: &Store<T>, slug: &str) -> Result<Option<T>> {
    store.first(&ScanPlan::lookup("by_slug", "slug", slug)).await
}

/// Overwrite the supplied fields of one record.
///
/// Patching a record that does not exist is `NotFound`.
async fn apply_patch<T: StoredDoc, P: Serialize>(
    store: &Store<T>,
    id: &DocId,
    patch: &P,
) -> Result<DocId> {
    let set = patch_document(patch)?;
    debug!("[{}] patch {} fields {:?}", store.name(), id, set.keys().collect::<Vec<_>>());

    if store.patch(id, set).await? {
        Ok(id.clone())
    } else {
        Err(CmsError::NotFound(format!("{} record {}", store.name(), id)))
    }
}

/// Unconditional delete; succeeds whether or not the record existed
async fn remove<T: StoredDoc>(store: &Store<T>, id: &DocId) -> Result<bool> {
    let existed = store.delete(id).await?;
    if !existed {
        debug!("[{}] delete of absent record {}", store.name(), id);
    }
    Ok(true)
}
