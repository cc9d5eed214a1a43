use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("profile id cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> Self {
        value.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    #[default]
    User,
    Mod,
    Admin,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::User => "user",
            ProfileRole::Mod => "mod",
            ProfileRole::Admin => "admin",
        }
    }

    /// Moderators and administrators.
    pub fn is_mod(&self) -> bool {
        matches!(self, ProfileRole::Mod | ProfileRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, ProfileRole::Admin)
    }

    /// Maps the backend's `groups` attribute; unknown groups are plain users.
    pub fn from_group(group: &str) -> Self {
        match group {
            "admins" => ProfileRole::Admin,
            "mods" => ProfileRole::Mod,
            _ => ProfileRole::User,
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ProfileRole::User),
            "mod" => Ok(ProfileRole::Mod),
            "admin" => Ok(ProfileRole::Admin),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}
