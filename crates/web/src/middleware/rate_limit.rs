//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Only the JSON API is limited: every call there costs a round trip to the
//! spreadsheet webhook.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::ConnectInfo,
    http::Request,
    response::{IntoResponse, Response},
};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

use crate::error::ApiError;

// =============================================================================
// Client IP Key Extractor
// =============================================================================

/// Headers that carry the client IP behind a proxy, most trusted first.
const SINGLE_IP_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-real-ip", "fly-client-ip"];

/// Key extractor that reads the client IP from proxy headers.
///
/// Checks Cloudflare's `CF-Connecting-IP`, then `X-Real-IP`, then Fly.io's
/// `Fly-Client-IP`, then the first entry of `X-Forwarded-For`, then the peer
/// address. Requests with none of these share a single bucket.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        for name in SINGLE_IP_HEADERS {
            if let Some(ip) = headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<IpAddr>().ok())
            {
                return Ok(ip);
            }
        }

        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok());
        let peer = || {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        };

        Ok(forwarded
            .or_else(peer)
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)))
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for the API: ~30 requests per minute per IP.
///
/// Configuration: 1 request every 2 seconds (replenish), burst of 10.
///
/// Returns `None` if the governor configuration is rejected.
#[must_use]
pub fn api_rate_limiter() -> Option<RateLimiterLayer> {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(2)
        .burst_size(10)
        .finish()?;
    Some(GovernorLayer::new(Arc::new(config)).error_handler(rate_limit_response))
}

/// Render governor failures as the API error envelope.
///
/// Rate-limit headers such as `retry-after` are kept on the response.
fn rate_limit_response(err: GovernorError) -> Response {
    let (error, headers) = match err {
        GovernorError::TooManyRequests { wait_time, headers } => {
            (ApiError::TooManyRequests { wait_time }, headers)
        }
        GovernorError::UnableToExtractKey => (
            ApiError::Internal("No se pudo identificar al cliente".to_string()),
            None,
        ),
        GovernorError::Other { msg, headers, .. } => (
            ApiError::Internal(msg.unwrap_or_else(|| "Error interno".to_string())),
            headers,
        ),
    };

    let mut response = error.into_response();
    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response
}
