//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::environment::{EnvSource, ProcessEnv};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Built once at startup and never mutated. Handlers read the environment and
/// the clock through it, so tests can pin both.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub env: Arc<dyn EnvSource>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates state backed by the process environment and the system clock.
    pub fn new(config: AppConfig, tera: Tera) -> Self {
        Self::with_sources(config, tera, Arc::new(ProcessEnv), Arc::new(SystemClock))
    }

    pub fn with_sources(
        config: AppConfig,
        tera: Tera,
        env: Arc<dyn EnvSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            env,
            clock,
        }
    }
}
