//! Blog post queries and mutations

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{apply_patch, find_by_slug, remove, ContentService};
use crate::db::schemas::{BlogCategory, BlogPostDoc, BlogPostPatch, BlogStatus, NewBlogPost};
use crate::query::catalog_plan;
use crate::types::{DocId, Result};

/// Filters of `getBlogPosts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlogPostQuery {
    #[serde(default)]
    pub category: Option<BlogCategory>,
    #[serde(default)]
    pub status: Option<BlogStatus>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ContentService {
    pub async fn get_blog_posts(&self, query: &BlogPostQuery) -> Result<Vec<BlogPostDoc>> {
        let plan = catalog_plan(query.category, query.status, query.featured, query.limit);
        self.collections().blog_posts.scan(&plan).await
    }

    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostDoc>> {
        find_by_slug(&self.collections().blog_posts, slug).await
    }

    pub async fn get_blog_post_by_id(&self, id: &DocId) -> Result<Option<BlogPostDoc>> {
        self.collections().blog_posts.get(id).await
    }

    pub async fn create_blog_post(&self, input: NewBlogPost) -> Result<DocId> {
        let slug = input.slug.clone();
        let id = self.collections().blog_posts.insert(input.into()).await?;
        info!("Created blog post '{}' ({})", slug, id);
        Ok(id)
    }

    pub async fn update_blog_post(&self, id: &DocId, patch: BlogPostPatch) -> Result<DocId> {
        apply_patch(&self.collections().blog_posts, id, &patch).await
    }

    pub async fn delete_blog_post(&self, id: &DocId) -> Result<bool> {
        remove(&self.collections().blog_posts, id).await
    }
}
