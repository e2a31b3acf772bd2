//! HTTP protocol layer module
//!
//! Content-type resolution, the development header set, conditional GET and
//! response builders. Nothing here touches the filesystem.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use headers::apply_dev_headers;
pub use mime::ContentTypes;
pub use response::{
    build_304_response, build_error_response, build_file_response, build_html_response,
    build_options_response, build_redirect_response,
};
