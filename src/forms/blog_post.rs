//! Blog post create/edit form

use chrono::NaiveDate;

use super::array_field::{apply_edit, compact, editable_list, ArrayEdit};
use crate::db::schemas::{BlogCategory, BlogPostDoc, BlogPostPatch, BlogStatus, NewBlogPost};
use crate::types::{CmsError, Result};

const DEFAULT_READ_TIME: &str = "5 min read";

/// Editable copy of a blog post
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostForm {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    /// Unset until the editor picks one
    pub category: Option<BlogCategory>,
    pub author: String,
    pub author_role: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub status: BlogStatus,
    pub featured: bool,
}

impl BlogPostForm {
    /// Blank form for the "new post" page, dated `today`
    pub fn new_draft(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            content: String::new(),
            category: None,
            author: String::new(),
            author_role: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            read_time: DEFAULT_READ_TIME.to_string(),
            tags: vec![String::new()],
            image_url: String::new(),
            status: BlogStatus::Draft,
            featured: false,
        }
    }

    pub fn from_doc(doc: &BlogPostDoc) -> Self {
        Self {
            title: doc.title.clone(),
            slug: doc.slug.clone(),
            excerpt: doc.excerpt.clone(),
            content: doc.content.clone(),
            category: Some(doc.category),
            author: doc.author.clone(),
            author_role: doc.author_role.clone().unwrap_or_default(),
            date: doc.date.clone(),
            read_time: doc.read_time.clone(),
            tags: editable_list(&doc.tags),
            image_url: doc.image_url.clone().unwrap_or_default(),
            status: doc.status,
            featured: doc.featured,
        }
    }

    /// Apply a tag edit, returning the updated form
    pub fn with_edit(mut self, edit: &ArrayEdit) -> Self {
        self.tags = apply_edit(&self.tags, edit);
        self
    }

    /// Create input for the "new post" page
    pub fn to_input(&self) -> Result<NewBlogPost> {
        let category = self
            .category
            .ok_or_else(|| CmsError::BadRequest("category is required".to_string()))?;

        Ok(NewBlogPost {
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            category,
            author: self.author.clone(),
            author_role: non_blank(&self.author_role),
            date: self.date.clone(),
            read_time: self.read_time.clone(),
            tags: compact(&self.tags),
            image_url: non_blank(&self.image_url),
            status: self.status,
            featured: self.featured,
        })
    }

    /// Patch for the edit page
    pub fn to_patch(&self) -> BlogPostPatch {
        BlogPostPatch {
            title: Some(self.title.clone()),
            slug: Some(self.slug.clone()),
            excerpt: Some(self.excerpt.clone()),
            content: Some(self.content.clone()),
            category: self.category,
            author: Some(self.author.clone()),
            author_role: non_blank(&self.author_role),
            date: Some(self.date.clone()),
            read_time: Some(self.read_time.clone()),
            tags: Some(compact(&self.tags)),
            image_url: non_blank(&self.image_url),
            status: Some(self.status),
            featured: Some(self.featured),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
