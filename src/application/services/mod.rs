// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::people::PeopleCommandService,
        ports::{avatar::AvatarFetcher, i18n::LanguageCatalog, security::TokenManager},
        queries::people::PeopleQueryService,
    },
    domain::{profile::ProfileRepository, space::SpaceRepository},
};

/// Knobs for the people directory, taken from configuration at start-up.
#[derive(Debug, Clone)]
pub struct PeopleSettings {
    pub default_space: String,
    pub default_space_public: bool,
    pub page_size: u32,
    pub bulk_page_size: u32,
    pub spaces_limit: u32,
}

impl Default for PeopleSettings {
    fn default() -> Self {
        Self {
            default_space: "default".into(),
            default_space_public: true,
            page_size: 30,
            bulk_page_size: 500,
            spaces_limit: 10_000,
        }
    }
}

/// Everything a request handler needs, built once in `main` and shared.
pub struct ApplicationServices {
    pub people_queries: Arc<PeopleQueryService>,
    pub people_commands: Arc<PeopleCommandService>,
    token_manager: Arc<dyn TokenManager>,
    avatar_fetcher: Arc<dyn AvatarFetcher>,
    language_catalog: Arc<dyn LanguageCatalog>,
}

impl ApplicationServices {
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        space_repo: Arc<dyn SpaceRepository>,
        token_manager: Arc<dyn TokenManager>,
        avatar_fetcher: Arc<dyn AvatarFetcher>,
        language_catalog: Arc<dyn LanguageCatalog>,
        settings: PeopleSettings,
    ) -> Self {
        let people_commands = Arc::new(PeopleCommandService::new(
            Arc::clone(&profile_repo),
            settings.bulk_page_size,
        ));
        let people_queries = Arc::new(PeopleQueryService::new(
            Arc::clone(&profile_repo),
            Arc::clone(&space_repo),
            settings,
        ));

        Self {
            people_queries,
            people_commands,
            token_manager,
            avatar_fetcher,
            language_catalog,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub fn avatar_fetcher(&self) -> Arc<dyn AvatarFetcher> {
        Arc::clone(&self.avatar_fetcher)
    }

    pub fn language_catalog(&self) -> Arc<dyn LanguageCatalog> {
        Arc::clone(&self.language_catalog)
    }
}
