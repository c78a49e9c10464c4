//! Industry queries and mutations

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{apply_patch, remove, ContentService};
use crate::db::schemas::{IndustryDoc, IndustryPatch, NewIndustry};
use crate::db::ScanPlan;
use crate::query::industry_plan;
use crate::types::{DocId, Result};

/// Arguments of `getIndustries`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndustryQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ContentService {
    /// Industries in ascending display order
    pub async fn get_industries(&self, query: &IndustryQuery) -> Result<Vec<IndustryDoc>> {
        self.collections()
            .industries
            .scan(&industry_plan(query.limit))
            .await
    }

    pub async fn get_industry_by_id(&self, id: &DocId) -> Result<Option<IndustryDoc>> {
        self.collections().industries.get(id).await
    }

    /// Lookup by the human-chosen key, e.g. `"automotive"`
    pub async fn get_industry_by_string_id(&self, key: &str) -> Result<Option<IndustryDoc>> {
        self.collections()
            .industries
            .first(&ScanPlan::lookup("by_industry_id", "id", key))
            .await
    }

    pub async fn create_industry(&self, input: NewIndustry) -> Result<DocId> {
        let key = input.industry_id.clone();
        let id = self.collections().industries.insert(input.into()).await?;
        info!("Created industry '{}' ({})", key, id);
        Ok(id)
    }

    pub async fn update_industry(&self, id: &DocId, patch: IndustryPatch) -> Result<DocId> {
        apply_patch(&self.collections().industries, id, &patch).await
    }

    pub async fn delete_industry(&self, id: &DocId) -> Result<bool> {
        remove(&self.collections().industries, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::CaseStudy;

    fn industry(key: &str, order: i32) -> NewIndustry {
        NewIndustry {
            industry_id: key.to_string(),
            title: key.to_uppercase(),
            short_description: "Short".into(),
            full_description: "Full".into(),
            applications: vec![],
            products: vec!["Masking Tape".into()],
            case_study: CaseStudy {
                client: "Client".into(),
                challenge: "Challenge".into(),
                solution: "Solution".into(),
                result: "Result".into(),
            },
            order,
        }
    }

    #[tokio::test]
    async fn test_industries_listed_in_display_order() {
        let service = ContentService::memory();
        for (key, order) in [("food", 3), ("automotive", 1), ("electronics", 2)] {
            service.create_industry(industry(key, order)).await.unwrap();
        }

        let listed = service
            .get_industries(&IndustryQuery::default())
            .await
            .unwrap();
        let keys: Vec<&str> = listed.iter().map(|i| i.industry_id.as_str()).collect();
        assert_eq!(keys, vec!["automotive", "electronics", "food"]);

        let first_two = service
            .get_industries(&IndustryQuery { limit: Some(2) })
            .await
            .unwrap();
        assert_eq!(first_two.len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_by_string_id() {
        let service = ContentService::memory();
        let id = service.create_industry(industry("automotive", 1)).await.unwrap();

        let found = service
            .get_industry_by_string_id("automotive")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, Some(id));
        assert!(service
            .get_industry_by_string_id("aerospace")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_reorder() {
        let service = ContentService::memory();
        let id = service.create_industry(industry("food", 5)).await.unwrap();
        service
            .update_industry(
                &id,
                IndustryPatch {
                    order: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = service.get_industry_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.order, 1);
        assert_eq!(stored.industry_id, "food");
    }
}
