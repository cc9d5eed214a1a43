// src/presentation/http/views.rs
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// A template name plus the model it is rendered with. Rendering itself
/// happens downstream; the pair is emitted as JSON.
#[derive(Debug, Serialize)]
pub struct View<M> {
    pub template: &'static str,
    pub model: M,
}

impl<M: Serialize> View<M> {
    pub fn new(template: &'static str, model: M) -> Self {
        Self { template, model }
    }
}

impl<M: Serialize> IntoResponse for View<M> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `302 Found` to `location`.
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}
