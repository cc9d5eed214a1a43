// src/infrastructure/avatar.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::avatar::{AvatarFetcher, AvatarImage},
};
use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::{Client, Url, header::CONTENT_TYPE, redirect::Policy};
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const MAX_REDIRECTS: usize = 3;

/// Fetches avatars from third-party hosts on behalf of the browser.
#[derive(Clone)]
pub struct HttpAvatarFetcher {
    http: Client,
    max_bytes: usize,
}

impl HttpAvatarFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> ApplicationResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .dns_resolver(Arc::new(PublicOnlyResolver))
            .redirect(Policy::custom(|attempt| {
                if attempt.previous().len() >= MAX_REDIRECTS {
                    attempt.error("too many redirects")
                } else if validate_avatar_url(attempt.url().as_str()).is_err() {
                    attempt.stop()
                } else {
                    attempt.follow()
                }
            }))
            .build()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self { http, max_bytes })
    }
}

/// Accepts absolute http(s) URLs that do not point at this host or a private
/// network.
pub fn validate_avatar_url(raw: &str) -> ApplicationResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ApplicationError::validation(format!("invalid avatar url: {err}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApplicationError::validation("avatar url must use http or https"));
    }

    let host = url
        .host_str()
        .ok_or_else(|| ApplicationError::validation("avatar url has no host"))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_ascii_lowercase();

    if host == "localhost" || host.ends_with(".localhost") {
        return Err(ApplicationError::validation("avatar url points at a local host"));
    }

    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_internal_ip(&ip) {
            return Err(ApplicationError::validation("avatar url points at a private address"));
        }
    }

    Ok(url)
}

fn is_internal_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_internal_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_internal_v4(&v4),
            None => {
                v6.is_loopback()
                    || v6.is_unspecified()
                    || (v6.segments()[0] & 0xfe00) == 0xfc00
                    || (v6.segments()[0] & 0xffc0) == 0xfe80
            }
        },
    }
}

fn is_internal_v4(v4: &Ipv4Addr) -> bool {
    v4.is_loopback()
        || v4.is_private()
        || v4.is_link_local()
        || v4.is_unspecified()
        || v4.is_broadcast()
        // carrier-grade NAT, 100.64.0.0/10
        || (v4.octets()[0] == 100 && (v4.octets()[1] & 0xc0) == 64)
}

/// Resolves `host` and refuses it if any address is internal, so a public
/// name pointing at a private network is caught at connect time.
pub async fn resolve_public(host: &str) -> Result<Vec<SocketAddr>, BoxError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0)).await?.collect();
    if addrs.is_empty() {
        return Err(format!("{host} did not resolve").into());
    }
    if let Some(internal) = addrs.iter().find(|addr| is_internal_ip(&addr.ip())) {
        return Err(format!("{host} resolves to internal address {}", internal.ip()).into());
    }
    Ok(addrs)
}

/// DNS resolver for the avatar client. IP-literal hosts never reach it; those
/// are vetted by `validate_avatar_url`.
struct PublicOnlyResolver;

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            let addrs = resolve_public(name.as_str()).await?;
            let addrs: Addrs = Box::new(addrs.into_iter());
            Ok(addrs)
        })
    }
}

#[async_trait]
impl AvatarFetcher for HttpAvatarFetcher {
    async fn fetch(&self, url: &str) -> ApplicationResult<AvatarImage> {
        let url = validate_avatar_url(url)?;

        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ApplicationError::not_found(format!(
                "avatar host responded with {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if !content_type.to_ascii_lowercase().starts_with("image/") {
            return Err(ApplicationError::validation(format!(
                "avatar is not an image: '{content_type}'"
            )));
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(ApplicationError::validation("avatar exceeds size limit"));
        }

        let mut buffer = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        {
            if buffer.len() + chunk.len() > self.max_bytes {
                return Err(ApplicationError::validation("avatar exceeds size limit"));
            }
            buffer.extend_from_slice(&chunk);
        }

        Ok(AvatarImage {
            content_type,
            bytes: buffer.freeze(),
        })
    }
}
