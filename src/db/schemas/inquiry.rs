//! Inquiry document schema
//!
//! Submissions from the public contact form.

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::db::store::{IndexSpec, IntoIndexes, Record};
use crate::types::DocId;

/// Sales pipeline status of an inquiry
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Qualified => "qualified",
            InquiryStatus::Closed => "closed",
        }
    }
}

impl From<InquiryStatus> for Bson {
    fn from(s: InquiryStatus) -> Self {
        Bson::String(s.as_str().to_string())
    }
}

/// Inquiry document stored in the `inquiries` collection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    pub name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_interest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    #[serde(default)]
    pub status: InquiryStatus,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Arguments of `createInquiry`. Status is not accepted; new inquiries are always `new`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub product_interest: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
}

impl From<NewInquiry> for InquiryDoc {
    fn from(input: NewInquiry) -> Self {
        Self {
            id: None,
            name: input.name,
            email: input.email,
            company: input.company,
            phone: input.phone,
            message: input.message,
            product_interest: input.product_interest,
            quantity: input.quantity,
            status: InquiryStatus::New,
            created_at: 0,
            updated_at: 0,
        }
    }
}

impl Record for InquiryDoc {
    const COLLECTION: &'static str = "inquiries";

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

impl IntoIndexes for InquiryDoc {
    fn into_indices() -> Vec<IndexSpec> {
        vec![
            IndexSpec::new("by_status", &["status"]),
            IndexSpec::new("by_email", &["email"]),
            IndexSpec::new("by_created", &["createdAt"]),
        ]
    }
}
