// tests/support/helpers.rs
use std::sync::Arc;

use axum::body;
use axum::http::{StatusCode, header::LOCATION};
use axum::response::Response;
use serde_json::Value;

use qaboard::application::ports::{
    avatar::AvatarFetcher, i18n::LanguageCatalog, security::TokenManager,
};
use qaboard::application::services::{ApplicationServices, PeopleSettings};
use qaboard::config::{AvatarSettings, SiteSettings};
use qaboard::domain::profile::ProfileRepository;
use qaboard::domain::space::SpaceRepository;
use qaboard::infrastructure::i18n::StaticLanguageCatalog;
use qaboard::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};

use super::mocks;

pub fn build_services(
    profile_repo: Arc<dyn ProfileRepository>,
    space_repo: Arc<dyn SpaceRepository>,
    settings: PeopleSettings,
) -> Arc<ApplicationServices> {
    let token_manager: Arc<dyn TokenManager> = Arc::new(mocks::DummyTokenManager);
    let avatar_fetcher: Arc<dyn AvatarFetcher> = Arc::new(mocks::StubAvatarFetcher);
    let catalog: Arc<dyn LanguageCatalog> = Arc::new(StaticLanguageCatalog::new());
    Arc::new(ApplicationServices::new(
        profile_repo,
        space_repo,
        token_manager,
        avatar_fetcher,
        catalog,
        settings,
    ))
}

pub fn build_test_state(
    profile_repo: Arc<dyn ProfileRepository>,
    space_repo: Arc<dyn SpaceRepository>,
    settings: PeopleSettings,
) -> HttpState {
    HttpState {
        services: build_services(profile_repo, space_repo, settings),
        site: Arc::new(SiteSettings::default()),
        avatar: Arc::new(AvatarSettings::default()),
        allowed_origins: Arc::new(Vec::new()),
    }
}

/// Router over the given repositories, without the per-IP rate limiter.
pub fn make_router_with(
    profile_repo: Arc<dyn ProfileRepository>,
    space_repo: Arc<dyn SpaceRepository>,
    settings: PeopleSettings,
) -> axum::Router {
    build_router_with_rate_limiter(build_test_state(profile_repo, space_repo, settings), false)
}

pub fn make_test_router() -> axum::Router {
    make_router_with(
        Arc::new(mocks::InMemoryProfileRepo::new(super::builders::population(3))),
        Arc::new(mocks::InMemorySpaceRepo::new(&["default", "eng"])),
        PeopleSettings::default(),
    )
}

pub fn private_settings() -> PeopleSettings {
    PeopleSettings {
        default_space_public: false,
        ..PeopleSettings::default()
    }
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected JSON body")
}

/// Asserts a `302 Found` and returns its `Location`.
pub fn assert_found(resp: &Response) -> String {
    assert_eq!(resp.status(), StatusCode::FOUND);
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("missing Location header")
        .to_string()
}
