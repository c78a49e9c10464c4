//! Demo data seeding and full clear
//!
//! Seeding is guarded by the products collection: if any product exists the
//! call is refused. A marker setting records progress so an interrupted run
//! can be retried:
//!
//! ```text
//!   marker absent ──seed──▶ "in-progress" ──all upserts done──▶ "complete"
//!                                │
//!                         crash / error
//!                                │
//!                    retry is allowed while the marker
//!                    still reads "in-progress"
//! ```
//!
//! Every demo record is upserted by its natural key (slug, industry key,
//! setting key), so a retried run converges without duplicates.
//!
//! Seed and clear runs are serialized on one lock. A seed requested while
//! another seed or a clear is running is refused at once and leaves the
//! recorded status alone; a clear waits its turn.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::seed_data::demo_data;
use super::ContentService;
use crate::db::{ScanPlan, Store, StoredDoc};
use crate::types::{DocId, Result};

/// Setting that tracks seed progress
pub const SEED_MARKER_KEY: &str = "demoSeed";

const MARKER_IN_PROGRESS: &str = "in-progress";
const MARKER_COMPLETE: &str = "complete";

const SEED_BUSY_MESSAGE: &str = "A seed or clear is already running";

/// Outcome of the most recent seed or clear, shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

/// Number of records written per collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedStats {
    pub products: usize,
    pub blog_posts: usize,
    pub industries: usize,
    pub site_settings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SeedStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearReport {
    pub success: bool,
    pub message: String,
}

impl ContentService {
    /// Load the demo dataset into an empty store
    pub async fn seed_demo_data(&self) -> Result<SeedReport> {
        let Ok(_guard) = self.maintenance.try_lock() else {
            warn!("Seed refused: another seed or clear is running");
            return Ok(SeedReport {
                success: false,
                message: SEED_BUSY_MESSAGE.to_string(),
                stats: None,
            });
        };
        *self.seed_status.write().await = OperationStatus::Running;

        let result = self.run_seed().await;
        let status = match &result {
            Ok(report) if report.success => {
                info!("{}", report.message);
                OperationStatus::Success
            }
            Ok(report) => {
                warn!("Seed refused: {}", report.message);
                OperationStatus::Error
            }
            Err(e) => {
                error!("Seed failed: {}", e);
                OperationStatus::Error
            }
        };
        *self.seed_status.write().await = status;
        result
    }

    /// Delete every record of every collection
    pub async fn clear_all_data(&self) -> Result<ClearReport> {
        let _guard = self.maintenance.lock().await;
        *self.clear_status.write().await = OperationStatus::Running;

        let result = self.run_clear().await;
        *self.clear_status.write().await = match &result {
            Ok(_) => OperationStatus::Success,
            Err(e) => {
                error!("Clear failed: {}", e);
                OperationStatus::Error
            }
        };
        result
    }

    pub async fn seed_status(&self) -> OperationStatus {
        *self.seed_status.read().await
    }

    pub async fn clear_status(&self) -> OperationStatus {
        *self.clear_status.read().await
    }

    async fn run_seed(&self) -> Result<SeedReport> {
        let data = demo_data()?;
        let c = self.collections();

        let has_products = c.products.count().await? > 0;
        let marker = self.get_setting(SEED_MARKER_KEY).await?;
        let resuming = marker.as_ref().and_then(Value::as_str) == Some(MARKER_IN_PROGRESS);

        if has_products && !resuming {
            return Ok(SeedReport {
                success: false,
                message: "Demo data already exists".to_string(),
                stats: None,
            });
        }
        if resuming {
            warn!("Previous seed did not finish, resuming");
        }

        self.set_setting(SEED_MARKER_KEY, json!(MARKER_IN_PROGRESS))
            .await?;

        let stats = SeedStats {
            products: data.products.len(),
            blog_posts: data.blog_posts.len(),
            industries: data.industries.len(),
            site_settings: data.site_settings.len(),
        };

        for product in data.products {
            let existing = c
                .products
                .first(&ScanPlan::lookup("by_slug", "slug", product.slug.as_str()))
                .await?;
            upsert(&c.products, existing, product).await?;
        }

        for post in data.blog_posts {
            let existing = c
                .blog_posts
                .first(&ScanPlan::lookup("by_slug", "slug", post.slug.as_str()))
                .await?;
            upsert(&c.blog_posts, existing, post).await?;
        }

        for industry in data.industries {
            let existing = c
                .industries
                .first(&ScanPlan::lookup("by_industry_id", "id", industry.industry_id.as_str()))
                .await?;
            upsert(&c.industries, existing, industry).await?;
        }

        for setting in data.site_settings {
            self.set_setting(&setting.key, setting.value).await?;
        }

        self.set_setting(SEED_MARKER_KEY, json!(MARKER_COMPLETE)).await?;

        Ok(SeedReport {
            success: true,
            message: "Demo data seeded successfully".to_string(),
            stats: Some(stats),
        })
    }

    async fn run_clear(&self) -> Result<ClearReport> {
        let c = self.collections();

        let products = c.products.delete_all().await?;
        let blog_posts = c.blog_posts.delete_all().await?;
        let industries = c.industries.delete_all().await?;
        let pages = c.pages.delete_all().await?;
        let inquiries = c.inquiries.delete_all().await?;
        let settings = c.site_settings.delete_all().await?;

        info!(
            "Cleared {} products, {} blog posts, {} industries, {} pages, {} inquiries, {} settings",
            products, blog_posts, industries, pages, inquiries, settings
        );

        Ok(ClearReport {
            success: true,
            message: "All data cleared".to_string(),
        })
    }
}

/// Overwrite `existing` with `input`, or insert it when absent
async fn upsert<T, I>(store: &Store<T>, existing: Option<T>, input: I) -> Result<DocId>
where
    T: StoredDoc,
    I: Serialize + Into<T>,
{
    if let Some(id) = existing.as_ref().and_then(|doc| doc.id()).cloned() {
        if store.patch(&id, bson::to_document(&input)?).await? {
            return Ok(id);
        }
    }
    store.insert(input.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_populates_every_collection() {
        let service = ContentService::memory();
        let report = service.seed_demo_data().await.unwrap();

        assert!(report.success);
        assert_eq!(
            report.stats,
            Some(SeedStats {
                products: 6,
                blog_posts: 5,
                industries: 6,
                site_settings: 4,
            })
        );

        let c = service.collections();
        assert_eq!(c.products.count().await.unwrap(), 6);
        assert_eq!(c.blog_posts.count().await.unwrap(), 5);
        assert_eq!(c.industries.count().await.unwrap(), 6);
        assert_eq!(
            service.get_setting("companyName").await.unwrap(),
            Some(json!("Crafter Tapes"))
        );
        assert_eq!(
            service.get_setting(SEED_MARKER_KEY).await.unwrap(),
            Some(json!("complete"))
        );
        assert_eq!(service.seed_status().await, OperationStatus::Success);
    }

    #[tokio::test]
    async fn test_second_seed_is_refused() {
        let service = ContentService::memory();
        service.seed_demo_data().await.unwrap();

        let again = service.seed_demo_data().await.unwrap();
        assert!(!again.success);
        assert_eq!(again.message, "Demo data already exists");
        assert_eq!(again.stats, None);
        assert_eq!(service.collections().products.count().await.unwrap(), 6);
        assert_eq!(service.seed_status().await, OperationStatus::Error);
    }

    #[tokio::test]
    async fn test_interrupted_seed_resumes_without_duplicates() {
        let service = ContentService::memory();

        // Simulate a run that wrote the marker and some products, then died
        service
            .set_setting(SEED_MARKER_KEY, json!(MARKER_IN_PROGRESS))
            .await
            .unwrap();
        let partial = demo_data().unwrap().products.into_iter().take(2);
        for product in partial {
            service.create_product(product).await.unwrap();
        }

        let report = service.seed_demo_data().await.unwrap();
        assert!(report.success);

        let c = service.collections();
        assert_eq!(c.products.count().await.unwrap(), 6);
        assert_eq!(c.blog_posts.count().await.unwrap(), 5);
        // 4 demo settings plus the marker
        assert_eq!(c.site_settings.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_seeds_load_the_dataset_once() {
        let service = ContentService::memory();

        let (a, b) = tokio::join!(service.seed_demo_data(), service.seed_demo_data());
        let reports = [a.unwrap(), b.unwrap()];

        assert_eq!(reports.iter().filter(|r| r.success).count(), 1);
        assert_eq!(service.collections().products.count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_seed_refused_while_lock_held() {
        let service = ContentService::memory();
        let guard = service.maintenance.lock().await;

        let report = service.seed_demo_data().await.unwrap();
        assert!(!report.success);
        assert_eq!(report.message, SEED_BUSY_MESSAGE);
        assert_eq!(service.seed_status().await, OperationStatus::Idle);

        drop(guard);
        assert!(service.seed_demo_data().await.unwrap().success);
    }

    #[tokio::test]
    async fn test_clear_removes_everything_and_allows_reseed() {
        let service = ContentService::memory();
        service.seed_demo_data().await.unwrap();

        let report = service.clear_all_data().await.unwrap();
        assert!(report.success);
        assert_eq!(report.message, "All data cleared");
        assert_eq!(service.clear_status().await, OperationStatus::Success);

        let c = service.collections();
        assert_eq!(c.products.count().await.unwrap(), 0);
        assert_eq!(c.site_settings.count().await.unwrap(), 0);

        // Clearing twice is harmless
        assert!(service.clear_all_data().await.unwrap().success);
        assert!(service.seed_demo_data().await.unwrap().success);
    }
}
