//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the span, echoed in the response)
//! 4. Security headers (CSP, frame, referrer, default caching)
//! 5. Rate limiting on `/api` (governor)
//!
//! [`PageContext`] is an extractor rather than a layer: pages ask for it.

pub mod page;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use page::{PageContext, UtmParams};
pub use rate_limit::{RateLimiterLayer, api_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
