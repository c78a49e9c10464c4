//! Page document schema
//!
//! Structured content for the about, industries and quality pages.

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::db::store::{IndexSpec, IntoIndexes, Record};
use crate::types::DocId;

/// Kind of page
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    About,
    Industry,
    Quality,
    Custom,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::About => "about",
            PageType::Industry => "industry",
            PageType::Quality => "quality",
            PageType::Custom => "custom",
        }
    }
}

impl From<PageType> for Bson {
    fn from(t: PageType) -> Self {
        Bson::String(t.as_str().to_string())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Active => "active",
            PageStatus::Draft => "draft",
            PageStatus::Archived => "archived",
        }
    }
}

impl From<PageStatus> for Bson {
    fn from(s: PageStatus) -> Self {
        Bson::String(s.as_str().to_string())
    }
}

/// Layout of a page section
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SectionLayout {
    ContentLeft,
    ImageLeft,
    FullContent,
    ImageGrid,
}

/// One ordered section of a page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PageSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub layout: SectionLayout,
}

/// Page document stored in the `pages` collection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    pub title: String,

    /// URL slug, unique across pages
    pub slug: String,

    #[serde(rename = "type")]
    pub page_type: PageType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<PageSection>>,

    pub status: PageStatus,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Arguments of `createPage`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sections: Option<Vec<PageSection>>,
    pub status: PageStatus,
}

impl From<NewPage> for PageDoc {
    fn from(input: NewPage) -> Self {
        Self {
            id: None,
            title: input.title,
            slug: input.slug,
            page_type: input.page_type,
            content: input.content,
            sections: input.sections,
            status: input.status,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Partial update for `updatePage`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<PageSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PageStatus>,
}

impl Record for PageDoc {
    const COLLECTION: &'static str = "pages";

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

impl IntoIndexes for PageDoc {
    fn into_indices() -> Vec<IndexSpec> {
        vec![
            IndexSpec::unique("by_slug", &["slug"]),
            IndexSpec::new("by_type", &["type"]),
            IndexSpec::new("by_status", &["status"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_type_serializes_under_type_key() {
        let input: NewPage = serde_json::from_value(serde_json::json!({
            "title": "About Us",
            "slug": "about",
            "type": "about",
            "sections": [{ "title": "History", "layout": "image-left" }],
            "status": "active"
        }))
        .unwrap();

        assert_eq!(input.page_type, PageType::About);
        let sections = input.sections.as_ref().unwrap();
        assert_eq!(sections[0].layout, SectionLayout::ImageLeft);
        assert_eq!(sections[0].content, None);

        let doc = bson::to_document(&PageDoc::from(input)).unwrap();
        assert_eq!(doc.get_str("type").unwrap(), "about");
    }
}
