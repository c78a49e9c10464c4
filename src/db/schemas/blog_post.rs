//! Blog post document schema

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::db::store::{IndexSpec, IntoIndexes, Record};
use crate::types::DocId;

/// Blog category
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BlogCategory {
    IndustryNews,
    ProductUpdates,
    TechnicalInsights,
    CompanyNews,
    TipsGuides,
}

impl BlogCategory {
    pub const ALL: [BlogCategory; 5] = [
        BlogCategory::IndustryNews,
        BlogCategory::ProductUpdates,
        BlogCategory::TechnicalInsights,
        BlogCategory::CompanyNews,
        BlogCategory::TipsGuides,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::IndustryNews => "industry-news",
            BlogCategory::ProductUpdates => "product-updates",
            BlogCategory::TechnicalInsights => "technical-insights",
            BlogCategory::CompanyNews => "company-news",
            BlogCategory::TipsGuides => "tips-guides",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlogCategory::IndustryNews => "Industry News",
            BlogCategory::ProductUpdates => "Product Updates",
            BlogCategory::TechnicalInsights => "Technical Insights",
            BlogCategory::CompanyNews => "Company News",
            BlogCategory::TipsGuides => "Tips & Guides",
        }
    }
}

impl From<BlogCategory> for Bson {
    fn from(c: BlogCategory) -> Self {
        Bson::String(c.as_str().to_string())
    }
}

/// Publication status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
            BlogStatus::Archived => "archived",
        }
    }
}

impl From<BlogStatus> for Bson {
    fn from(s: BlogStatus) -> Self {
        Bson::String(s.as_str().to_string())
    }
}

/// Blog post document stored in the `blogPosts` collection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    pub title: String,

    /// URL slug, unique across posts
    pub slug: String,

    pub excerpt: String,

    /// Raw HTML body
    pub content: String,

    pub category: BlogCategory,
    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_role: Option<String>,

    /// Display date, e.g. "2024-01-15"
    pub date: String,

    /// Display label, e.g. "5 min read"
    pub read_time: String,

    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub status: BlogStatus,
    pub featured: bool,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Arguments of `createBlogPost`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub author: String,
    #[serde(default)]
    pub author_role: Option<String>,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: BlogStatus,
    pub featured: bool,
}

impl From<NewBlogPost> for BlogPostDoc {
    fn from(input: NewBlogPost) -> Self {
        Self {
            id: None,
            title: input.title,
            slug: input.slug,
            excerpt: input.excerpt,
            content: input.content,
            category: input.category,
            author: input.author,
            author_role: input.author_role,
            date: input.date,
            read_time: input.read_time,
            tags: input.tags,
            image_url: input.image_url,
            status: input.status,
            featured: input.featured,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Partial update for `updateBlogPost`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlogPostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<BlogCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Record for BlogPostDoc {
    const COLLECTION: &'static str = "blogPosts";

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

impl IntoIndexes for BlogPostDoc {
    fn into_indices() -> Vec<IndexSpec> {
        vec![
            IndexSpec::unique("by_slug", &["slug"]),
            IndexSpec::new("by_category", &["category"]),
            IndexSpec::new("by_status", &["status"]),
            IndexSpec::new("by_featured", &["featured"]),
        ]
    }
}
