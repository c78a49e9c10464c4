//! Admin dashboard overview

use serde::{Deserialize, Serialize};

use super::{ContentService, OperationStatus};
use crate::db::schemas::{BlogStatus, InquiryStatus};
use crate::db::{ScanPlan, Store, StoredDoc};
use crate::types::Result;

/// Counts and last seed/clear outcome shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub products: u64,
    pub blog_posts: u64,
    pub published_blog_posts: u64,
    pub industries: u64,
    pub inquiries: u64,
    pub new_inquiries: u64,
    pub seed_status: OperationStatus,
    pub clear_status: OperationStatus,
}

impl ContentService {
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let c = self.collections();
        Ok(DashboardStats {
            products: c.products.count().await?,
            blog_posts: c.blog_posts.count().await?,
            published_blog_posts: count_with_status(&c.blog_posts, BlogStatus::Published).await?,
            industries: c.industries.count().await?,
            inquiries: c.inquiries.count().await?,
            new_inquiries: count_with_status(&c.inquiries, InquiryStatus::New).await?,
            seed_status: self.seed_status().await,
            clear_status: self.clear_status().await,
        })
    }
}

async fn count_with_status<T: StoredDoc>(store: &Store<T>, status: impl Into<bson::Bson>) -> Result<u64> {
    let plan = ScanPlan::full(0).with_probe("by_status", "status", status.into());
    store.count_matching(&plan).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::NewInquiry;

    #[tokio::test]
    async fn test_empty_dashboard() {
        let service = ContentService::memory();
        let stats = service.dashboard().await.unwrap();
        assert_eq!(stats.products, 0);
        assert_eq!(stats.seed_status, OperationStatus::Idle);
        assert_eq!(stats.clear_status, OperationStatus::Idle);
    }

    #[tokio::test]
    async fn test_dashboard_after_seed() {
        let service = ContentService::memory();
        service.seed_demo_data().await.unwrap();
        service
            .create_inquiry(NewInquiry {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                company: None,
                phone: None,
                message: "Samples?".into(),
                product_interest: None,
                quantity: None,
            })
            .await
            .unwrap();

        let stats = service.dashboard().await.unwrap();
        assert_eq!(stats.products, 6);
        assert_eq!(stats.blog_posts, 5);
        assert_eq!(stats.published_blog_posts, 5);
        assert_eq!(stats.industries, 6);
        assert_eq!(stats.inquiries, 1);
        assert_eq!(stats.new_inquiries, 1);
        assert_eq!(stats.seed_status, OperationStatus::Success);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["publishedBlogPosts"], 5);
        assert_eq!(json["seedStatus"], "success");
    }

    #[tokio::test]
    async fn test_status_counts_are_not_capped_by_list_limit() {
        let service = ContentService::memory();
        for i in 0..crate::query::DEFAULT_LIMIT + 5 {
            let id = service
                .create_inquiry(NewInquiry {
                    name: format!("Buyer {}", i),
                    email: format!("buyer{}@example.com", i),
                    company: None,
                    phone: None,
                    message: "Quote".into(),
                    product_interest: None,
                    quantity: None,
                })
                .await
                .unwrap();
            if i == 0 {
                service
                    .update_inquiry_status(&id, InquiryStatus::Closed)
                    .await
                    .unwrap();
            }
        }

        let stats = service.dashboard().await.unwrap();
        assert_eq!(stats.inquiries, 105);
        assert_eq!(stats.new_inquiries, 104);
    }
}
