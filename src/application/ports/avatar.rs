use crate::application::ApplicationResult;
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct AvatarImage {
    pub content_type: String,
    pub bytes: Bytes,
}

#[async_trait]
pub trait AvatarFetcher: Send + Sync {
    /// Fetches a remote avatar. Implementations reject anything that is not an
    /// image or exceeds their size limit.
    async fn fetch(&self, url: &str) -> ApplicationResult<AvatarImage>;
}
