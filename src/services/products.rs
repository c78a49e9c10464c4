//! Product catalog queries and mutations

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{apply_patch, find_by_slug, remove, ContentService};
use crate::db::schemas::{NewProduct, ProductCategory, ProductDoc, ProductPatch, ProductStatus};
use crate::query::catalog_plan;
use crate::types::{DocId, Result};

/// Filters of `getProducts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductQuery {
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ContentService {
    /// Products matching the filters, newest first
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<ProductDoc>> {
        let plan = catalog_plan(query.category, query.status, query.featured, query.limit);
        self.collections().products.scan(&plan).await
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Option<ProductDoc>> {
        find_by_slug(&self.collections().products, slug).await
    }

    pub async fn get_product_by_id(&self, id: &DocId) -> Result<Option<ProductDoc>> {
        self.collections().products.get(id).await
    }

    pub async fn create_product(&self, input: NewProduct) -> Result<DocId> {
        let slug = input.slug.clone();
        let id = self.collections().products.insert(input.into()).await?;
        info!("Created product '{}' ({})", slug, id);
        Ok(id)
    }

    pub async fn update_product(&self, id: &DocId, patch: ProductPatch) -> Result<DocId> {
        apply_patch(&self.collections().products, id, &patch).await
    }

    pub async fn delete_product(&self, id: &DocId) -> Result<bool> {
        remove(&self.collections().products, id).await
    }
}
