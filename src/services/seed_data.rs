//! Demo dataset loaded by the seed routine

use serde::Deserialize;
use serde_json::Value;

use crate::db::schemas::{NewBlogPost, NewIndustry, NewProduct};
use crate::types::{CmsError, Result};

const DEMO_DATA: &str = include_str!("seed_data.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct DemoData {
    pub products: Vec<NewProduct>,
    pub blog_posts: Vec<NewBlogPost>,
    pub industries: Vec<NewIndustry>,
    pub site_settings: Vec<DemoSetting>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DemoSetting {
    pub key: String,
    pub value: Value,
}

pub(crate) fn demo_data() -> Result<DemoData> {
    serde_json::from_str(DEMO_DATA)
        .map_err(|e| CmsError::Internal(format!("demo dataset is malformed: {}", e)))
}
