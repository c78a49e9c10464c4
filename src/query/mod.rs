//! Index selection for list queries
//!
//! Every list function scans at most one secondary index and applies the
//! remaining filters as residual predicates:
//!
//! ```text
//!   category  featured   → scan          residual
//!   ───────── ────────── ─────────────── ────────
//!   given     any        by_category     status
//!   absent    true       by_featured     status
//!   absent    false/none full scan       status
//! ```
//!
//! Pages pick `by_type` the same way; inquiries probe `by_status` directly.

use bson::Bson;

use crate::db::ScanPlan;
use crate::db::SortOrder;

/// Result ceiling when the caller gives no limit (or zero)
pub const DEFAULT_LIMIT: usize = 100;

pub fn effective_limit(limit: Option<u32>) -> usize {
    match limit {
        Some(n) if n > 0 => n as usize,
        _ => DEFAULT_LIMIT,
    }
}

/// Index scanned by a product or blog post listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogIndex {
    ByCategory,
    ByFeatured,
    FullScan,
}

impl CatalogIndex {
    /// Pick the scan for the filters supplied. `featured = false` selects
    /// nothing, matching an absent flag.
    pub fn select(has_category: bool, featured: Option<bool>) -> Self {
        if has_category {
            CatalogIndex::ByCategory
        } else if featured == Some(true) {
            CatalogIndex::ByFeatured
        } else {
            CatalogIndex::FullScan
        }
    }

    pub fn index_name(&self) -> Option<&'static str> {
        match self {
            CatalogIndex::ByCategory => Some("by_category"),
            CatalogIndex::ByFeatured => Some("by_featured"),
            CatalogIndex::FullScan => None,
        }
    }
}

/// Plan for `getProducts` / `getBlogPosts`
pub fn catalog_plan<C, S>(
    category: Option<C>,
    status: Option<S>,
    featured: Option<bool>,
    limit: Option<u32>,
) -> ScanPlan
where
    C: Into<Bson>,
    S: Into<Bson>,
{
    let base = ScanPlan::full(effective_limit(limit));
    let plan = match (CatalogIndex::select(category.is_some(), featured), category) {
        (CatalogIndex::ByCategory, Some(category)) => {
            base.with_probe("by_category", "category", category.into())
        }
        (CatalogIndex::ByFeatured, _) => base.with_probe("by_featured", "featured", Bson::Boolean(true)),
        _ => base,
    };
    plan.with_residual("status", status.map(Into::into))
}

/// Index scanned by a page listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIndex {
    ByType,
    FullScan,
}

impl PageIndex {
    pub fn select(has_type: bool) -> Self {
        if has_type {
            PageIndex::ByType
        } else {
            PageIndex::FullScan
        }
    }
}

/// Plan for `getPages`
pub fn page_plan<T, S>(page_type: Option<T>, status: Option<S>, limit: Option<u32>) -> ScanPlan
where
    T: Into<Bson>,
    S: Into<Bson>,
{
    let base = ScanPlan::full(effective_limit(limit));
    let plan = match (PageIndex::select(page_type.is_some()), page_type) {
        (PageIndex::ByType, Some(page_type)) => base.with_probe("by_type", "type", page_type.into()),
        _ => base,
    };
    plan.with_residual("status", status.map(Into::into))
}

/// Plan for `getInquiries`, newest first
pub fn inquiry_plan<S: Into<Bson>>(status: Option<S>, limit: Option<u32>) -> ScanPlan {
    let base = ScanPlan::full(effective_limit(limit));
    match status {
        Some(status) => base.with_probe("by_status", "status", status.into()),
        None => base,
    }
}

/// Plan for `getIndustries`, in display order
pub fn industry_plan(limit: Option<u32>) -> ScanPlan {
    ScanPlan::full(effective_limit(limit)).ordered(SortOrder::Ascending("order"))
}
