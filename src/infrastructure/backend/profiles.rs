use super::client::BackendClient;
use crate::domain::errors::DomainResult;
use crate::domain::pager::Pager;
use crate::domain::profile::{
    Profile, ProfileHits, ProfileId, ProfileRepository, ProfileRole, SpacesPatch,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

const PROFILE_TYPE: &str = "profile";
const BATCH_PATH: &str = "_batch";

#[derive(Clone)]
pub struct BackendProfileRepository {
    client: Arc<BackendClient>,
}

impl BackendProfileRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    groups: Option<String>,
    #[serde(default)]
    spaces: Vec<String>,
    #[serde(default)]
    picture: Option<String>,
    /// Milliseconds since the epoch.
    #[serde(default)]
    timestamp: Option<i64>,
}

impl ProfileRecord {
    fn into_profile(self) -> DomainResult<Profile> {
        let id = ProfileId::new(self.id)?;
        let role = ProfileRole::from_group(self.groups.as_deref().unwrap_or_default());
        let mut profile = Profile::new(id, self.name, role).with_spaces(self.spaces);
        profile.picture = self.picture.filter(|p| !p.trim().is_empty());
        profile.created_at = self.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis);
        Ok(profile)
    }
}

#[async_trait]
impl ProfileRepository for BackendProfileRepository {
    async fn find(&self, query: &str, pager: &mut Pager) -> DomainResult<ProfileHits> {
        let records: Vec<ProfileRecord> = self.client.find_query(PROFILE_TYPE, query, pager).await?;
        let fetched = records.len();
        let profiles = records
            .into_iter()
            .filter_map(|record| match record.into_profile() {
                Ok(profile) => Some(profile),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed profile record");
                    None
                }
            })
            .collect();
        Ok(ProfileHits { profiles, fetched })
    }

    async fn patch_spaces(&self, patches: Vec<SpacesPatch>) -> DomainResult<()> {
        if patches.is_empty() {
            return Ok(());
        }
        self.client.invoke_patch(BATCH_PATH, &patches).await
    }
}
