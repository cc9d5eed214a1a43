// src/domain/space.rs
use crate::domain::{errors::DomainResult, pager::Pager};
use async_trait::async_trait;

pub const ALL_SPACES: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: String,
    pub name: String,
}

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn find_all(&self, pager: &mut Pager) -> DomainResult<Vec<Space>>;
}
