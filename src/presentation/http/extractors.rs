// src/presentation/http/extractors.rs
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::ApplicationError,
        ports::i18n::{DEFAULT_LOCALE, LanguageCatalog},
    },
    presentation::http::state::HttpState,
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::ACCEPT_LANGUAGE, request::Parts},
};
use headers::{Authorization, Cookie, HeaderMapExt, authorization::Bearer};

use super::error::HttpError;

pub const AUTH_COOKIE: &str = "qaboard-auth";
pub const SPACE_COOKIE: &str = "qaboard-space";

/// The requester, if they presented a valid token. Invalid or expired tokens
/// are treated like anonymous requests.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

/// Space requested through the space cookie, unvalidated.
#[derive(Debug, Clone)]
pub struct CurrentSpace(pub Option<String>);

/// Best supported locale from `Accept-Language`.
#[derive(Debug, Clone)]
pub struct Locale(pub String);

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
    })
}

fn credentials(headers: &HeaderMap) -> Option<String> {
    if let Some(header) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(header.token().to_string());
    }
    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(AUTH_COOKIE).map(str::to_string))
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts)?;

        let Some(token) = credentials(&parts.headers) else {
            return Ok(Self(None));
        };

        match app_state.services.token_manager().authenticate(&token).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid credentials");
                Ok(Self(None))
            }
        }
    }
}

impl<S> FromRequestParts<S> for CurrentSpace
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let space = parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(SPACE_COOKIE).map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty());
        Ok(Self(space))
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let catalog = app_state(parts)?.services.language_catalog();
        Ok(Self(negotiate_locale(&parts.headers, catalog.as_ref())))
    }
}

/// Picks the first language tag from `Accept-Language` the catalog knows,
/// comparing primary subtags only.
pub fn negotiate_locale(headers: &HeaderMap, catalog: &dyn LanguageCatalog) -> String {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            value
                .split(',')
                .filter_map(|entry| entry.split(';').next())
                .map(|tag| {
                    tag.trim()
                        .split(['-', '_'])
                        .next()
                        .unwrap_or_default()
                        .to_ascii_lowercase()
                })
                .find(|primary| !primary.is_empty() && catalog.supports(primary))
        })
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}
