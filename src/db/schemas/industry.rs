//! Industry document schema

use serde::{Deserialize, Serialize};

use crate::db::store::{IndexSpec, IntoIndexes, Record};
use crate::types::DocId;

/// Customer story shown on an industry card
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CaseStudy {
    pub client: String,
    pub challenge: String,
    pub solution: String,
    pub result: String,
}

/// Industry document stored in the `industries` collection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndustryDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    /// Human-chosen key such as `"automotive"`, unique across industries
    #[serde(rename = "id")]
    pub industry_id: String,

    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub applications: Vec<String>,

    /// Product names, by convention only; not checked against the catalog
    pub products: Vec<String>,

    pub case_study: CaseStudy,

    /// Display position, ascending
    pub order: i32,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Arguments of `createIndustry`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewIndustry {
    #[serde(rename = "id")]
    pub industry_id: String,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub applications: Vec<String>,
    pub products: Vec<String>,
    pub case_study: CaseStudy,
    pub order: i32,
}

impl From<NewIndustry> for IndustryDoc {
    fn from(input: NewIndustry) -> Self {
        Self {
            id: None,
            industry_id: input.industry_id,
            title: input.title,
            short_description: input.short_description,
            full_description: input.full_description,
            applications: input.applications,
            products: input.products,
            case_study: input.case_study,
            order: input.order,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Partial update for `updateIndustry`. The string key is fixed at creation.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndustryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study: Option<CaseStudy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl Record for IndustryDoc {
    const COLLECTION: &'static str = "industries";

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

impl IntoIndexes for IndustryDoc {
    fn into_indices() -> Vec<IndexSpec> {
        vec![
            IndexSpec::unique("by_industry_id", &["id"]),
            IndexSpec::new("by_order", &["order"]),
        ]
    }
}
