//! Product edit form

use super::array_field::{apply_edit, compact, editable_list, ArrayEdit};
use crate::db::schemas::{ProductCategory, ProductDoc, ProductPatch, ProductStatus, Specifications};

/// List fields of the product form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductListField {
    Features,
    Applications,
    Certifications,
}

/// Editable copy of a product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub category: ProductCategory,
    pub short_description: String,
    pub full_description: String,
    pub features: Vec<String>,
    pub specifications: Specifications,
    pub applications: Vec<String>,
    pub certifications: Vec<String>,
    /// Empty means "leave the stored image as is"
    pub image_url: String,
    pub status: ProductStatus,
    pub featured: bool,
}

impl ProductForm {
    pub fn from_doc(doc: &ProductDoc) -> Self {
        Self {
            name: doc.name.clone(),
            slug: doc.slug.clone(),
            category: doc.category,
            short_description: doc.short_description.clone(),
            full_description: doc.full_description.clone(),
            features: editable_list(&doc.features),
            specifications: doc.specifications.clone(),
            applications: editable_list(&doc.applications),
            certifications: editable_list(&doc.certifications),
            image_url: doc.image_url.clone().unwrap_or_default(),
            status: doc.status,
            featured: doc.featured,
        }
    }

    /// Apply a list edit, returning the updated form
    pub fn with_edit(mut self, field: ProductListField, edit: &ArrayEdit) -> Self {
        let rows = match field {
            ProductListField::Features => &mut self.features,
            ProductListField::Applications => &mut self.applications,
            ProductListField::Certifications => &mut self.certifications,
        };
        let next = apply_edit(rows, edit);
        *rows = next;
        self
    }

    /// Patch submitted by the edit page. Every field is written; blank list
    /// rows and blank specification entries are dropped.
    pub fn to_patch(&self) -> ProductPatch {
        ProductPatch {
            name: Some(self.name.clone()),
            slug: Some(self.slug.clone()),
            category: Some(self.category),
            short_description: Some(self.short_description.clone()),
            full_description: Some(self.full_description.clone()),
            features: Some(compact(&self.features)),
            specifications: Some(trim_specifications(&self.specifications)),
            applications: Some(compact(&self.applications)),
            certifications: Some(compact(&self.certifications)),
            related_products: None,
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

fn trim_specifications(specs: &Specifications) -> Specifications {
    let keep = |v: &Option<String>| v.as_deref().and_then(non_blank);
    Specifications {
        thickness: keep(&specs.thickness),
        width: keep(&specs.width),
        length: keep(&specs.length),
        adhesive: keep(&specs.adhesive),
        material: keep(&specs.material),
    }
}
