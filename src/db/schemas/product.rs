//! Product document schema
//!
//! Catalog entries shown on the products pages.

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::db::store::{IndexSpec, IntoIndexes, Record};
use crate::types::DocId;

/// Product category
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    PackagingTapes,
    SpecialtyTapes,
    ProtectiveFilms,
    CustomSolutions,
    OtherMaterials,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::PackagingTapes,
        ProductCategory::SpecialtyTapes,
        ProductCategory::ProtectiveFilms,
        ProductCategory::CustomSolutions,
        ProductCategory::OtherMaterials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::PackagingTapes => "packaging-tapes",
            ProductCategory::SpecialtyTapes => "specialty-tapes",
            ProductCategory::ProtectiveFilms => "protective-films",
            ProductCategory::CustomSolutions => "custom-solutions",
            ProductCategory::OtherMaterials => "other-materials",
        }
    }

    /// Human-readable label for select inputs
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::PackagingTapes => "Packaging Tapes",
            ProductCategory::SpecialtyTapes => "Specialty Adhesive Tapes",
            ProductCategory::ProtectiveFilms => "Protective Films",
            ProductCategory::CustomSolutions => "Custom Solutions",
            ProductCategory::OtherMaterials => "Other Packaging Materials",
        }
    }
}

impl From<ProductCategory> for Bson {
    fn from(c: ProductCategory) -> Self {
        Bson::String(c.as_str().to_string())
    }
}

/// Product lifecycle status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProductStatus {
    #[default]
    Active,
    Discontinued,
    ComingSoon,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Discontinued => "discontinued",
            ProductStatus::ComingSoon => "coming-soon",
        }
    }
}

impl From<ProductStatus> for Bson {
    fn from(s: ProductStatus) -> Self {
        Bson::String(s.as_str().to_string())
    }
}

/// Technical specification block; every entry is optional free text
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Specifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adhesive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

/// Product document stored in the `products` collection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    pub name: String,

    /// URL slug, unique across products
    pub slug: String,

    pub category: ProductCategory,
    pub short_description: String,
    pub full_description: String,
    pub features: Vec<String>,
    pub specifications: Specifications,
    pub applications: Vec<String>,
    pub certifications: Vec<String>,

    /// Slugs of products shown as related
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_products: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub status: ProductStatus,

    /// Promoted on listing pages
    pub featured: bool,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Arguments of `createProduct`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub category: ProductCategory,
    pub short_description: String,
    pub full_description: String,
    pub features: Vec<String>,
    pub specifications: Specifications,
    pub applications: Vec<String>,
    pub certifications: Vec<String>,
    #[serde(default)]
    pub related_products: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: ProductStatus,
    pub featured: bool,
}

impl From<NewProduct> for ProductDoc {
    fn from(input: NewProduct) -> Self {
        Self {
            id: None,
            name: input.name,
            slug: input.slug,
            category: input.category,
            short_description: input.short_description,
            full_description: input.full_description,
            features: input.features,
            specifications: input.specifications,
            applications: input.applications,
            certifications: input.certifications,
            related_products: input.related_products,
            image_url: input.image_url,
            status: input.status,
            featured: input.featured,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Partial update for `updateProduct`; only supplied fields are written
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_products: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Record for ProductDoc {
    const COLLECTION: &'static str = "products";

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

impl IntoIndexes for ProductDoc {
    fn into_indices() -> Vec<IndexSpec> {
        vec![
            IndexSpec::unique("by_slug", &["slug"]),
            IndexSpec::new("by_category", &["category"]),
            IndexSpec::new("by_status", &["status"]),
            IndexSpec::new("by_featured", &["featured"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::patch_document;
    use bson::doc;

    #[test]
    fn test_enums_use_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::ComingSoon).unwrap(),
            "\"coming-soon\""
        );
        for category in ProductCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<ProductStatus, _> = serde_json::from_str("\"retired\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_only_writes_supplied_fields() {
        let patch = ProductPatch {
            status: Some(ProductStatus::Discontinued),
            featured: Some(false),
            ..Default::default()
        };
        assert_eq!(
            patch_document(&patch).unwrap(),
            doc! { "status": "discontinued", "featured": false }
        );
    }

    #[test]
    fn test_specifications_skip_missing_entries() {
        let specs = Specifications {
            width: Some("48mm".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&specs).unwrap(), serde_json::json!({ "width": "48mm" }));
    }
}
