// src/presentation/http/middleware/error_page.rs
use crate::presentation::http::{
    controllers::errors::error_page, extractors::negotiate_locale, state::HttpState,
};
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Replaces the body of every 5xx response with the error page. The status is
/// kept; details of the failure never reach the client.
pub async fn render_error_page(req: Request<Body>, next: Next) -> Response {
    let state = req.extensions().get::<HttpState>().cloned();
    let locale = state.as_ref().map(|state| {
        let catalog = state.services.language_catalog();
        negotiate_locale(req.headers(), catalog.as_ref())
    });

    let response = next.run(req).await;
    if !response.status().is_server_error() {
        return response;
    }

    match (state, locale) {
        (Some(state), Some(locale)) => {
            let status = response.status();
            (status, error_page(&state, &locale)).into_response()
        }
        _ => response,
    }
}
