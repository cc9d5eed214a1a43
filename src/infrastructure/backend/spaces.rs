use super::client::BackendClient;
use crate::domain::errors::DomainResult;
use crate::domain::pager::Pager;
use crate::domain::space::{Space, SpaceRepository};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

const SPACE_TYPE: &str = "space";

#[derive(Clone)]
pub struct BackendSpaceRepository {
    client: Arc<BackendClient>,
}

impl BackendSpaceRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SpaceRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

impl From<SpaceRecord> for Space {
    fn from(record: SpaceRecord) -> Self {
        let name = record
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| record.id.clone());
        Space {
            id: record.id,
            name,
        }
    }
}

#[async_trait]
impl SpaceRepository for BackendSpaceRepository {
    async fn find_all(&self, pager: &mut Pager) -> DomainResult<Vec<Space>> {
        let records: Vec<SpaceRecord> = self.client.find_query(SPACE_TYPE, "*", pager).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
