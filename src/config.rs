//! Configuration loading and constants.
//!
//! Defines the fixed listen address, the static application metadata served by
//! `/api/info`, HTTP cache headers and logging defaults. `AppConfig` is the root
//! configuration struct, loaded from an optional TOML file at startup.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use const_format::formatcp;
use serde::Deserialize;

// =============================================================================
// Listen Address
// =============================================================================

/// Listen host (all interfaces, so the load balancer can reach the instance)
pub const LISTEN_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;

/// Listen port expected by the target group health check
pub const LISTEN_PORT: u16 = 8080;

/// Fixed socket address the server binds to
pub const LISTEN_ADDR: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(LISTEN_HOST), LISTEN_PORT);

// =============================================================================
// Application Metadata
// =============================================================================

pub const APP_NAME: &str = "EC2 Auto Scaling Demo";

/// Reported application version (independent of the crate version)
pub const APP_VERSION: &str = "1.0.0";

pub const APP_DESCRIPTION: &str = "Flask application running on EC2 Auto Scaling Group";

/// Feature list in display order
pub const APP_FEATURES: [&str; 4] = [
    "Auto Scaling",
    "Load Balancer",
    "CodeDeploy",
    "GitHub Actions CI/CD",
];

// =============================================================================
// Instance Identity
// =============================================================================

/// Environment variable holding the EC2 instance id
pub const ENV_INSTANCE_ID: &str = "INSTANCE_ID";

/// Environment variable holding the AWS region
pub const ENV_AWS_REGION: &str = "AWS_REGION";

/// Value reported when an identity variable is unset or empty
pub const UNKNOWN: &str = "unknown";

/// Constant `status` field of the health response
pub const HEALTHY: &str = "healthy";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Health responses carry no Cache-Control header so probes always see fresh data.

/// Landing page - static content
pub const HTTP_CACHE_HOME_MAX_AGE: u32 = 60;

/// Application info - compile-time constants
pub const HTTP_CACHE_INFO_MAX_AGE: u32 = 300;

pub const CACHE_CONTROL_HOME: &str = formatcp!("public, max-age={}", HTTP_CACHE_HOME_MAX_AGE);

pub const CACHE_CONTROL_INFO: &str = formatcp!("public, max-age={}", HTTP_CACHE_INFO_MAX_AGE);

// =============================================================================
// Server Constants
// =============================================================================

/// Worker pool size for the threaded server
pub const DEFAULT_WORKER_THREADS: usize = 4;

/// Seconds to wait for in-flight connections on shutdown
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Name of the landing page template
pub const INDEX_TEMPLATE: &str = "index.html";

/// Glob appended to a template override directory
pub const TEMPLATE_GLOB: &str = "**/*";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "ec2_autoscaling_demo=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server startup settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Template overrides
    #[serde(default)]
    pub templates: TemplateConfig,
}

/// How the listener is started.
///
/// Both modes serve the same router; they differ only in runtime flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServerMode {
    /// Multi-threaded runtime with a fixed worker pool
    #[default]
    Threaded,
    /// Single-threaded runtime, simple listener
    Development,
}

impl std::fmt::Display for ServerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerMode::Threaded => f.write_str("threaded"),
            ServerMode::Development => f.write_str("development"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub mode: ServerMode,
    /// Worker threads in threaded mode (default: 4)
    #[serde(default = "ServerConfig::default_worker_threads")]
    pub worker_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            mode: ServerMode::default(),
            worker_threads: Self::default_worker_threads(),
        }
    }
}

impl ServerConfig {
    fn default_worker_threads() -> usize {
        DEFAULT_WORKER_THREADS
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    /// Directory whose templates replace the built-in ones
    pub dir: Option<String>,
}

impl TemplateConfig {
    /// Glob pattern for the override directory, if one is configured
    pub fn glob(&self) -> Option<String> {
        self.dir
            .as_ref()
            .map(|dir| format!("{}/{}", dir.trim_end_matches('/'), TEMPLATE_GLOB))
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load the file if present, otherwise fall back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.worker_threads == 0 {
            return Err(ConfigError::Validation(
                "server.worker_threads must be at least 1".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
