//! Environment-derived instance identity.
//!
//! The deployment pipeline injects `INSTANCE_ID` and `AWS_REGION` into the
//! process environment. Lookups go through [`EnvSource`] so handlers can be
//! exercised against a fixed environment in tests.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::{ENV_AWS_REGION, ENV_INSTANCE_ID, UNKNOWN};

/// Read-only view of environment variables.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, independent of the process environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv(HashMap<String, String>);

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Look up `name`, returning `default` when it is unset or empty.
pub fn getenv_or(env: &dyn EnvSource, name: &str, default: &str) -> String {
    env.var(name)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Which instance answered a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceIdentity {
    pub instance_id: String,
    pub region: String,
}

impl InstanceIdentity {
    pub fn from_env(env: &dyn EnvSource) -> Self {
        Self {
            instance_id: getenv_or(env, ENV_INSTANCE_ID, UNKNOWN),
            region: getenv_or(env, ENV_AWS_REGION, UNKNOWN),
        }
    }
}
