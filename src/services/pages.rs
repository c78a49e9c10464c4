//! Page queries and mutations

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{apply_patch, find_by_slug, remove, ContentService};
use crate::db::schemas::{NewPage, PageDoc, PagePatch, PageStatus, PageType};
use crate::query::page_plan;
use crate::types::{DocId, Result};

/// Filters of `getPages`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageQuery {
    #[serde(rename = "type", default)]
    pub page_type: Option<PageType>,
    #[serde(default)]
    pub status: Option<PageStatus>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ContentService {
    pub async fn get_pages(&self, query: &PageQuery) -> Result<Vec<PageDoc>> {
        let plan = page_plan(query.page_type, query.status, query.limit);
        self.collections().pages.scan(&plan).await
    }

    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Option<PageDoc>> {
        find_by_slug(&self.collections().pages, slug).await
    }

    pub async fn get_page_by_id(&self, id: &DocId) -> Result<Option<PageDoc>> {
        self.collections().pages.get(id).await
    }

    pub async fn create_page(&self, input: NewPage) -> Result<DocId> {
        let slug = input.slug.clone();
        let id = self.collections().pages.insert(input.into()).await?;
        info!("Created page '{}' ({})", slug, id);
        Ok(id)
    }

    pub async fn update_page(&self, id: &DocId, patch: PagePatch) -> Result<DocId> {
        apply_patch(&self.collections().pages, id, &patch).await
    }

    pub async fn delete_page(&self, id: &DocId) -> Result<bool> {
        remove(&self.collections().pages, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{PageSection, SectionLayout};

    fn page(slug: &str, page_type: PageType, status: PageStatus) -> NewPage {
        NewPage {
            title: slug.to_string(),
            slug: slug.to_string(),
            page_type,
            content: None,
            sections: Some(vec![PageSection {
                title: "Intro".into(),
                content: Some("Hello".into()),
                layout: SectionLayout::FullContent,
            }]),
            status,
        }
    }

    #[tokio::test]
    async fn test_type_and_status_filters() {
        let service = ContentService::memory();
        service
            .create_page(page("about", PageType::About, PageStatus::Active))
            .await
            .unwrap();
        service
            .create_page(page("quality", PageType::Quality, PageStatus::Active))
            .await
            .unwrap();
        service
            .create_page(page("quality-old", PageType::Quality, PageStatus::Archived))
            .await
            .unwrap();

        let quality = service
            .get_pages(&PageQuery {
                page_type: Some(PageType::Quality),
                status: Some(PageStatus::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(quality.len(), 1);
        assert_eq!(quality[0].slug, "quality");

        let active = service
            .get_pages(&PageQuery {
                status: Some(PageStatus::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_sections() {
        let service = ContentService::memory();
        let id = service
            .create_page(page("about", PageType::About, PageStatus::Draft))
            .await
            .unwrap();

        service
            .update_page(
                &id,
                PagePatch {
                    sections: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = service.get_page_by_slug("about").await.unwrap().unwrap();
        assert_eq!(stored.sections, Some(vec![]));
        assert_eq!(stored.status, PageStatus::Draft);
    }
}
