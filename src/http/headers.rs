//! Development response headers
//!
//! Every response leaves the server with permissive CORS headers and caching
//! disabled, whatever its status.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

/// Fixed headers appended to every response
pub const DEV_HEADERS: [(&str, &str); 6] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
    ("expires", "0"),
];

/// Value of the `Server` header
pub const SERVER_NAME: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Insert the CORS/no-cache headers, replacing any earlier values
pub fn apply_dev_headers(headers: &mut HeaderMap) {
    for (name, value) in DEV_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers.insert(
        hyper::header::SERVER,
        HeaderValue::from_static(SERVER_NAME),
    );
}
