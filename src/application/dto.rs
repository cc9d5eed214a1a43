use crate::domain::{
    pager::Pager,
    profile::{Profile, ProfileId, ProfileRole},
    space::Space,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub id: String,
    pub name: String,
    pub role: ProfileRole,
    pub spaces: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Profile> for ProfileDto {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.into(),
            name: profile.name,
            role: profile.role,
            spaces: profile.spaces.into_iter().collect(),
            picture: profile.picture,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpaceDto {
    pub id: String,
    pub name: String,
}

impl From<Space> for SpaceDto {
    fn from(space: Space) -> Self {
        Self {
            id: space.id,
            name: space.name,
        }
    }
}

/// One page of the people directory.
#[derive(Debug, Clone, Serialize)]
pub struct PeoplePage {
    pub profiles: Vec<ProfileDto>,
    pub pager: Pager,
    /// Present only for administrators in bulk-edit mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spaces: Option<Vec<SpaceDto>>,
    /// The query string actually sent to the backend.
    pub query: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkEditReport {
    pub rounds: u32,
    pub batches: u32,
    pub updated: usize,
    pub protected: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthTokenDto {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub profile_id: ProfileId,
    pub name: String,
    pub role: ProfileRole,
    pub spaces: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: ProfileId,
    pub name: String,
    pub role: ProfileRole,
    pub spaces: Vec<String>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_mod(&self) -> bool {
        self.role.is_mod()
    }
}

pub fn is_admin(actor: Option<&AuthenticatedUser>) -> bool {
    actor.is_some_and(AuthenticatedUser::is_admin)
}
