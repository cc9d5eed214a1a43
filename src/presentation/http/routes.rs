// src/presentation/http/routes.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::{
    controllers::people,
    error::HttpError,
    middleware::{error_page::render_error_page, rate_limit::rate_limit_layer},
    state::HttpState,
};
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub fn build_router(state: HttpState) -> Router {
    build_router_with_rate_limiter(state, true)
}

/// Router with or without the avatar rate limiter. The limiter keys on the
/// client address, so it needs connect info that in-process tests lack.
pub fn build_router_with_rate_limiter(state: HttpState, rate_limit: bool) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    let mut avatar_route = get(people::avatar);
    if rate_limit {
        match rate_limit_layer(state.avatar.rate_per_second, state.avatar.rate_burst) {
            Some(layer) => avatar_route = avatar_route.layer(layer),
            None => tracing::warn!("avatar rate limiting disabled by configuration"),
        }
    }

    Router::new()
        .route("/health", get(health))
        .route("/people", get(people::list_people))
        .route("/people/bulk-edit", post(people::bulk_edit))
        .route("/people/avatar", avatar_route)
        .fallback(not_found)
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn(render_error_page))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}

async fn not_found() -> impl IntoResponse {
    HttpError::from_error(ApplicationError::not_found("no such route"))
}
