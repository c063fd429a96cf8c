//! Middleware
//!
//! CORS and security response headers.

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Configures CORS (Cross-Origin Resource Sharing).
///
/// An empty origin list allows any origin; board front-ends are commonly
/// served from a different host than the API.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Headers added to every response unless a handler already set them.
pub fn security_headers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        header_layer(header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        header_layer(header::REFERRER_POLICY, "same-origin"),
        header_layer(header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    ]
}

fn header_layer(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}
