// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Per-client-IP limiter. Returns `None` when the settings cannot form a
/// valid quota (zero rate or burst).
pub fn rate_limit_layer(
    per_second: u64,
    burst: u32,
) -> Option<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>> {
    if per_second == 0 || burst == 0 {
        return None;
    }

    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(per_second);
    builder.burst_size(burst);
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(config))
}
