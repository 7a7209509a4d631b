//! Lighthouse - minimal HTTP/1.0 static file server
//!
//! Core library: request parsing, path confinement, resource resolution
//! and response serialization.

pub mod config;
pub mod http;
pub mod server;
