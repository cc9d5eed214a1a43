// tests/support/mocks/avatar.rs
use async_trait::async_trait;
use bytes::Bytes;

use qaboard::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::avatar::{AvatarFetcher, AvatarImage},
};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// Serves a tiny PNG for any `https://img.example/` URL, reports an upstream
/// outage for `https://down.example/` and rejects everything else.
#[derive(Clone, Debug, Default)]
pub struct StubAvatarFetcher;

#[async_trait]
impl AvatarFetcher for StubAvatarFetcher {
    async fn fetch(&self, url: &str) -> ApplicationResult<AvatarImage> {
        if url.starts_with("https://img.example/") {
            Ok(AvatarImage {
                content_type: "image/png".into(),
                bytes: Bytes::from_static(PNG_BYTES),
            })
        } else if url.starts_with("https://down.example/") {
            Err(ApplicationError::infrastructure("connection refused"))
        } else {
            Err(ApplicationError::validation("not an image"))
        }
    }
}
