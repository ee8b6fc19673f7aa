//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket settings applied per client IP.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    /// Tokens replenished per second.
    pub per_second: u64,
    /// Bucket size.
    pub burst: u32,
}

impl RateLimitSettings {
    /// Interval after which one token is replenished, at least 1 ms.
    fn replenish_interval_ms(&self) -> Result<u64> {
        let ms = 1000u64
            .checked_div(self.per_second)
            .context("Rate limit must allow at least one request per second")?;
        Ok(ms.max(1))
    }
}

/// Creates a rate limiter keyed by the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The server
/// must be started with `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/clientes", get(list_clients_handler))
///     .layer(rate_limit::layer(settings)?);
/// ```
///
/// # Errors
///
/// Returns an error if either setting is zero.
pub fn layer(
    settings: RateLimitSettings,
) -> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(settings.replenish_interval_ms()?)
        .burst_size(settings.burst)
        .finish()
        .context("Invalid rate limit settings")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Creates a rate limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
/// falling back to the peer address.
///
/// Use only behind a trusted reverse proxy: clients can set these headers freely.
///
/// # Errors
///
/// Returns an error if either setting is zero.
pub fn proxy_layer(
    settings: RateLimitSettings,
) -> Result<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_millisecond(settings.replenish_interval_ms()?)
        .burst_size(settings.burst)
        .finish()
        .context("Invalid rate limit settings")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_burst_is_rejected() {
        let settings = RateLimitSettings {
            per_second: 1,
            burst: 0,
        };
        assert!(layer(settings).is_err());
        assert!(proxy_layer(settings).is_err());
    }

    #[test]
    fn test_replenish_interval() {
        let settings = RateLimitSettings {
            per_second: 20,
            burst: 100,
        };
        assert_eq!(settings.replenish_interval_ms().unwrap(), 50);

        let fast = RateLimitSettings {
            per_second: 5000,
            burst: 100,
        };
        assert_eq!(fast.replenish_interval_ms().unwrap(), 1);

        let stopped = RateLimitSettings {
            per_second: 0,
            burst: 100,
        };
        assert!(stopped.replenish_interval_ms().is_err());
    }

    #[test]
    fn test_valid_settings_build() {
        let settings = RateLimitSettings {
            per_second: 20,
            burst: 100,
        };
        assert!(layer(settings).is_ok());
    }
}
