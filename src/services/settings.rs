//! Site settings

use bson::doc;
use serde_json::{Map, Value};
use tracing::info;

use super::ContentService;
use crate::db::schemas::SiteSettingDoc;
use crate::db::{ScanPlan, SortOrder};
use crate::types::{CmsError, DocId, Result};

/// Upper bound on settings returned by `getSettings`
const MAX_SETTINGS: usize = 1000;

impl ContentService {
    /// Value of one setting, or `None` if unset
    pub async fn get_setting(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.find_setting(key).await?.map(|s| s.value))
    }

    /// Every setting as a `key → value` object
    pub async fn get_settings(&self) -> Result<Map<String, Value>> {
        let plan = ScanPlan::full(MAX_SETTINGS).ordered(SortOrder::Ascending("key"));
        let settings = self.collections().site_settings.scan(&plan).await?;
        Ok(settings.into_iter().map(|s| (s.key, s.value)).collect())
    }

    /// Insert or overwrite a setting by key.
    ///
    /// Values BSON cannot hold (integers above `i64::MAX`) are `BadRequest`.
    pub async fn set_setting(&self, key: &str, value: Value) -> Result<DocId> {
        let store = &self.collections().site_settings;
        let stored = bson::to_bson(&value).map_err(|e| {
            CmsError::BadRequest(format!("unsupported value for setting '{}': {}", key, e))
        })?;

        if let Some(existing) = self.find_setting(key).await? {
            if let Some(id) = existing.id {
                if store.patch(&id, doc! { "value": stored }).await? {
                    return Ok(id);
                }
            }
        }

        let id = store.insert(SiteSettingDoc::new(key, value)).await?;
        info!("Created setting '{}'", key);
        Ok(id)
    }

    async fn find_setting(&self, key: &str) -> Result<Option<SiteSettingDoc>> {
        self.collections()
            .site_settings
            .first(&ScanPlan::lookup("by_key", "key", key))
            .await
    }
}
