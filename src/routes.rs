//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`   - Health check of the record store
//! - `/clientes/*`   - Clients
//! - `/pedidos/*`    - Orders
//! - `/entregas/*`   - Delivery pricing and lifecycle
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - `408` after `REQUEST_TIMEOUT_SECONDS`
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimitSettings};
use crate::api::middleware::tracing;
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router options taken from [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    pub request_timeout_seconds: u64,
    pub rate_limit: RateLimitSettings,
    /// When `true`, rate limiting reads client IP from `X-Forwarded-For` /
    /// `X-Real-IP` headers instead of the peer socket address; enable only when
    /// the service runs behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout_seconds: config.request_timeout_seconds,
            rate_limit: RateLimitSettings {
                per_second: config.rate_limit_per_second,
                burst: config.rate_limit_burst,
            },
            behind_proxy: config.behind_proxy,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(state: AppState, options: RouterOptions) -> Result<NormalizePath<Router>> {
    let api_router = api::routes::api_routes();
    let api_router = if options.behind_proxy {
        api_router.layer(rate_limit::proxy_layer(options.rate_limit)?)
    } else {
        api_router.layer(rate_limit::layer(options.rate_limit)?)
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api_router)
        .with_state(state)
        .layer(tracing::timeout_layer(options.request_timeout_seconds))
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
