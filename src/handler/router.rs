//! Request dispatch module
//!
//! Entry point for HTTP request processing: method dispatch, development
//! header injection and access logging.

use crate::config::ServerConfig;
use crate::error::ServeError;
use crate::handler::static_files;
use crate::http::{self, ContentTypes};
use crate::logger::{AccessLog, LogRecord};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
    pub if_none_match: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn from_parts(parts: &'a Parts) -> Self {
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            if_modified_since: header_str(parts, "if-modified-since"),
            if_none_match: header_str(parts, "if-none-match"),
        }
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Request handler shared by all connection tasks
///
/// Holds only read-only state (root, type table, log sink), so one instance
/// behind an `Arc` serves every connection concurrently.
pub struct RequestHandler {
    root: PathBuf,
    content_types: ContentTypes,
    access_log: Arc<dyn AccessLog>,
}

impl RequestHandler {
    pub fn new(config: &ServerConfig, access_log: Arc<dyn AccessLog>) -> Self {
        Self {
            root: config.root.clone(),
            content_types: ContentTypes::new(),
            access_log,
        }
    }

    /// Produce the response for a request; never fails
    ///
    /// The request body is never read.
    pub async fn handle<B>(&self, req: Request<B>, peer: SocketAddr) -> Response<Full<Bytes>> {
        let (parts, _body) = req.into_parts();
        let remote_addr = peer.ip().to_string();
        let request_line = format!("{} {} {:?}", parts.method, parts.uri, parts.version);
        let is_head = parts.method == Method::HEAD;

        let result = match &parts.method {
            &Method::GET | &Method::HEAD => {
                let ctx = RequestContext::from_parts(&parts);
                static_files::serve_path(&ctx, &self.root, &self.content_types).await
            }
            &Method::OPTIONS => Ok(http::build_options_response()),
            other => Err(ServeError::UnsupportedMethod(other.to_string())),
        };

        let mut response = match result {
            Ok(resp) => resp,
            Err(err) => {
                self.access_log.record(&LogRecord::error(
                    remote_addr.clone(),
                    err.status().as_u16(),
                    err.to_string(),
                ));
                http::build_error_response(&err, is_head)
            }
        };

        http::apply_dev_headers(response.headers_mut());

        self.access_log.record(&LogRecord::completed(
            remote_addr,
            request_line,
            response.status().as_u16(),
        ));

        response
    }

    /// Record a request that hyper rejected before it reached `handle`
    pub fn log_rejected(&self, peer: SocketAddr, err: &hyper::Error) {
        let remote_addr = peer.ip().to_string();
        let status = StatusCode::BAD_REQUEST.as_u16();
        self.access_log.record(&LogRecord::error(
            remote_addr.clone(),
            status,
            format!("Bad request syntax ({err})"),
        ));
        self.access_log
            .record(&LogRecord::completed(remote_addr, "-".to_string(), status));
    }
}
