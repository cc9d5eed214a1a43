// src/application/queries/people.rs
use crate::{
    application::{
        dto::{AuthenticatedUser, PeoplePage, is_admin},
        error::{ApplicationError, ApplicationResult},
        services::PeopleSettings,
    },
    domain::{
        pager::{DEFAULT_SORT_FIELD, Pager},
        profile::{ProfileRepository, SpaceScope, query::MATCH_ALL, sanitize_query, widen_space_field},
        space::SpaceRepository,
    },
};
use std::sync::Arc;

pub struct PeopleQueryService {
    profile_repo: Arc<dyn ProfileRepository>,
    space_repo: Arc<dyn SpaceRepository>,
    settings: PeopleSettings,
}

#[derive(Debug, Clone, Default)]
pub struct ListPeopleQuery {
    pub sortby: Option<String>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub bulk_edit: bool,
    pub space: Option<String>,
}

impl PeopleQueryService {
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        space_repo: Arc<dyn SpaceRepository>,
        settings: PeopleSettings,
    ) -> Self {
        Self {
            profile_repo,
            space_repo,
            settings,
        }
    }

    pub async fn list_people(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListPeopleQuery,
    ) -> ApplicationResult<PeoplePage> {
        if !self.settings.default_space_public && actor.is_none() {
            return Err(ApplicationError::unauthorized("sign in required to list people"));
        }

        let admin = is_admin(actor);
        let bulk_edit = query.bulk_edit && admin;
        let raw_query = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(MATCH_ALL);

        // administrators editing in bulk search across every space unfiltered
        let qs = if bulk_edit {
            raw_query.to_string()
        } else {
            let member_of = actor.map(|a| a.spaces.as_slice()).unwrap_or(&[]);
            let scope = SpaceScope::resolve(
                query.space.as_deref(),
                admin,
                member_of,
                &self.settings.default_space,
            );
            widen_space_field(&sanitize_query(raw_query, &scope))
        };

        let mut pager = Pager::for_page(query.page.unwrap_or(1), self.settings.page_size)
            .with_sortby(query.sortby.as_deref().unwrap_or(DEFAULT_SORT_FIELD));

        tracing::debug!(query = %qs, page = pager.page, sortby = %pager.sortby, bulk_edit, "listing people");
        let hits = self.profile_repo.find(&qs, &mut pager).await?;

        let spaces = if bulk_edit {
            let mut space_pager = Pager::new(self.settings.spaces_limit);
            let spaces = self.space_repo.find_all(&mut space_pager).await?;
            Some(spaces.into_iter().map(Into::into).collect())
        } else {
            None
        };

        Ok(PeoplePage {
            profiles: hits.profiles.into_iter().map(Into::into).collect(),
            pager,
            spaces,
            query: qs,
        })
    }
}
