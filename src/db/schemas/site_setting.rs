//! Site-wide key/value settings

use serde::{Deserialize, Serialize};

use crate::db::store::{IndexSpec, IntoIndexes, Record};
use crate::types::DocId;

/// One setting stored in the `siteSettings` collection.
///
/// The value is free-form JSON; the site reads `companyName`, `tagline`,
/// `stats` and `contact`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    pub key: String,
    pub value: serde_json::Value,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl SiteSettingDoc {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            id: None,
            key: key.into(),
            value,
            created_at: 0,
            updated_at: 0,
        }
    }
}

impl Record for SiteSettingDoc {
    const COLLECTION: &'static str = "siteSettings";

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

impl IntoIndexes for SiteSettingDoc {
    fn into_indices() -> Vec<IndexSpec> {
        vec![IndexSpec::unique("by_key", &["key"])]
    }
}
