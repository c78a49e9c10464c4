//! Persisted document schemas
//!
//! One module per collection. Each document declares its collection name,
//! its indexes, a create input and a patch type used by the mutation layer.
//! Field names are camelCase on the wire and in storage; timestamps are epoch
//! milliseconds.

mod blog_post;
mod industry;
mod inquiry;
mod page;
mod product;
mod site_setting;

pub use blog_post::{BlogCategory, BlogPostDoc, BlogPostPatch, BlogStatus, NewBlogPost};
pub use industry::{CaseStudy, IndustryDoc, IndustryPatch, NewIndustry};
pub use inquiry::{InquiryDoc, InquiryStatus, NewInquiry};
pub use page::{NewPage, PageDoc, PagePatch, PageSection, PageStatus, PageType, SectionLayout};
pub use product::{
    NewProduct, ProductCategory, ProductDoc, ProductPatch, ProductStatus, Specifications,
};
pub use site_setting::SiteSettingDoc;

use bson::Document;
use serde::Serialize;

use crate::types::Result;

/// Serialize a patch into the `$set` document applied by the store.
///
/// Unset optional fields are skipped by the patch types themselves, so only
/// supplied fields are overwritten.
pub fn patch_document<P: Serialize>(patch: &P) -> Result<Document> {
    Ok(bson::to_document(patch)?)
}
