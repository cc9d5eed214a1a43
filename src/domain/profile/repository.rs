use crate::domain::errors::DomainResult;
use crate::domain::pager::Pager;
use crate::domain::profile::entity::{Profile, SpacesPatch};
use async_trait::async_trait;

/// One page of profiles as the backend returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileHits {
    pub profiles: Vec<Profile>,
    /// Records on the page before malformed ones were dropped. Paging decisions
    /// use this, not `profiles.len()`.
    pub fetched: usize,
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Runs `query` against stored profiles, updating `pager` with the total
    /// hit count and the continuation key for the next page.
    async fn find(&self, query: &str, pager: &mut Pager) -> DomainResult<ProfileHits>;

    /// Applies all patches in a single batched partial update.
    async fn patch_spaces(&self, patches: Vec<SpacesPatch>) -> DomainResult<()>;
}
