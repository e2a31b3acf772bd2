//! Local static-file server for AR development.
//!
//! Serves the directory holding the executable with permissive CORS headers,
//! caching disabled, and correct content types for glTF models, WebAssembly
//! and ES modules.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
