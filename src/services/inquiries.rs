//! Contact form inquiries

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{apply_patch, remove, ContentService};
use crate::db::schemas::{InquiryDoc, InquiryStatus, NewInquiry};
use crate::query::inquiry_plan;
use crate::types::{DocId, Result};

/// Filters of `getInquiries`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InquiryQuery {
    #[serde(default)]
    pub status: Option<InquiryStatus>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Status-only patch written by `updateInquiryStatus`
#[derive(Serialize)]
struct StatusPatch {
    status: InquiryStatus,
}

impl ContentService {
    /// Record a contact form submission with status `new`
    pub async fn create_inquiry(&self, input: NewInquiry) -> Result<DocId> {
        let email = input.email.clone();
        let id = self.collections().inquiries.insert(input.into()).await?;
        info!("New inquiry {} from {}", id, email);
        Ok(id)
    }

    /// Inquiries, newest first
    pub async fn get_inquiries(&self, query: &InquiryQuery) -> Result<Vec<InquiryDoc>> {
        let plan = inquiry_plan(query.status, query.limit);
        self.collections().inquiries.scan(&plan).await
    }

    pub async fn get_inquiry_by_id(&self, id: &DocId) -> Result<Option<InquiryDoc>> {
        self.collections().inquiries.get(id).await
    }

    pub async fn update_inquiry_status(&self, id: &DocId, status: InquiryStatus) -> Result<()> {
        apply_patch(&self.collections().inquiries, id, &StatusPatch { status }).await?;
        Ok(())
    }

    pub async fn delete_inquiry(&self, id: &DocId) -> Result<bool> {
        remove(&self.collections().inquiries, id).await
    }
}
