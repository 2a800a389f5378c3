//! EC2 Auto Scaling Demo: a small web service that reports which instance
//! answered a request.
//!
//! Serves a landing page, a health check carrying the instance identity, and
//! static application metadata. The binary in `main.rs` wires configuration,
//! tracing and the runtime around [`routes::create_router`].

pub mod clock;
pub mod config;
pub mod environment;
pub mod error;
pub mod http;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
