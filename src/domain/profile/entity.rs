use crate::domain::profile::{
    membership::SpaceOperation,
    value_objects::{ProfileId, ProfileRole},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub role: ProfileRole,
    pub spaces: BTreeSet<String>,
    pub picture: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn new(id: ProfileId, name: impl Into<String>, role: ProfileRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            spaces: BTreeSet::new(),
            picture: None,
            created_at: None,
        }
    }

    pub fn with_spaces<I, S>(mut self, spaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spaces = spaces.into_iter().map(Into::into).collect();
        self
    }

    /// Moderator and administrator profiles are never touched by bulk edits.
    pub fn is_protected(&self) -> bool {
        self.role.is_mod()
    }

    pub fn apply_spaces(&mut self, operation: SpaceOperation, spaces: &[String]) {
        match operation {
            SpaceOperation::Add => self.spaces.extend(spaces.iter().cloned()),
            SpaceOperation::Remove => self.spaces.retain(|s| !spaces.contains(s)),
            SpaceOperation::Replace => self.spaces = spaces.iter().cloned().collect(),
        }
    }

    pub fn spaces_patch(&self) -> SpacesPatch {
        SpacesPatch {
            id: self.id.as_str().to_string(),
            spaces: self.spaces.clone(),
        }
    }
}

/// Partial-update record carrying only a profile's space memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpacesPatch {
    pub id: String,
    pub spaces: BTreeSet<String>,
}
