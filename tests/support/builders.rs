// tests/support/builders.rs
use qaboard::domain::profile::{Profile, ProfileId, ProfileRole};

pub struct ProfileBuilder {
    id: String,
    name: String,
    role: ProfileRole,
    spaces: Vec<String>,
}

impl ProfileBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: format!("Person {id}"),
            id,
            role: ProfileRole::User,
            spaces: vec!["default".into()],
        }
    }

    pub fn role(mut self, role: ProfileRole) -> Self {
        self.role = role;
        self
    }

    pub fn spaces(mut self, spaces: &[&str]) -> Self {
        self.spaces = spaces.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Profile {
        Profile::new(ProfileId::new(self.id).unwrap(), self.name, self.role)
            .with_spaces(self.spaces)
    }
}

/// `n` plain users with zero-padded ids so id order matches creation order.
pub fn population(n: usize) -> Vec<Profile> {
    (0..n)
        .map(|i| ProfileBuilder::new(format!("u{i:03}")).build())
        .collect()
}
