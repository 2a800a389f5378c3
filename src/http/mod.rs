//! HTTP server module.
//!
//! One router, two ways to run it:
//! - **Threaded (default)**: multi-threaded runtime with a fixed worker pool,
//!   served through `axum-server` with a shutdown handle
//! - **Development**: single-threaded runtime with a plain `axum::serve` listener
//!
//! Both modes shut down gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{build_runtime, serve_development, serve_threaded, start_server, ServerError};
