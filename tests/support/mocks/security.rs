// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use qaboard::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use qaboard::domain::profile::{ProfileId, ProfileRole};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const MOD_TOKEN: &str = "mod-token";
pub const USER_TOKEN: &str = "user-token";

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Err(ApplicationError::infrastructure("not implemented"))
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let now = super::time::fixed_now();
        match token {
            ADMIN_TOKEN => Ok(admin_user(now)),
            MOD_TOKEN => Ok(user("mod-1", "Morgan", ProfileRole::Mod, now)),
            USER_TOKEN => Ok(plain_user(now)),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

fn user(id: &str, name: &str, role: ProfileRole, now: DateTime<Utc>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: ProfileId::new(id).expect("invalid profile id"),
        name: name.into(),
        role,
        spaces: vec!["default".into(), "eng".into()],
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn admin_user(now: DateTime<Utc>) -> AuthenticatedUser {
    user("admin-1", "Ada", ProfileRole::Admin, now)
}

pub fn plain_user(now: DateTime<Utc>) -> AuthenticatedUser {
    user("user-1", "Uma", ProfileRole::User, now)
}
