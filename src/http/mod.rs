//! HTTP/1.0 protocol implementation.
//!
//! Each accepted connection carries exactly one request and one response,
//! after which it is closed.
//!
//! # Architecture
//!
//! - **`parser`**: Reads the request line, headers and optional body from a buffered stream
//! - **`request`**: HTTP request representation
//! - **`path`**: Confines a request path to the document root
//! - **`resource`**: Decides which file (if any) a confined path serves
//! - **`mime`**: MIME type detection based on file extensions
//! - **`status`**: Status codes and the reason phrase table
//! - **`response`**: HTTP response representation with builder
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: The per-connection state machine tying it all together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Parse request line, headers, body
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌─────────────┐
//!        │   Parsed    │
//!        └──────┬──────┘
//!               │
//!               ▼
//!        ┌─────────────┐
//!        │  Resolving  │ ← Confine path, locate and load resource
//!        └──────┬──────┘
//!               │ Response ready (or any failure → error response)
//!               ▼
//!        ┌─────────────┐
//!        │ Responding  │ ← Send response to client
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │   Closed    │
//!        └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lighthouse::config::SiteConfig;
//! use lighthouse::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let site = Arc::new(SiteConfig::default());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let site = site.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, site);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod parser;
pub mod path;
pub mod resource;
pub mod mime;
pub mod status;
pub mod response;
pub mod writer;
pub mod connection;

/// The only protocol version this server speaks.
pub const HTTP_VERSION: &str = "HTTP/1.0";
