//! EC2 Auto Scaling Demo web service.
//!
//! This is the application entry point. It parses the command line, initializes
//! tracing, loads the optional TOML configuration, builds the runtime for the
//! selected server mode and serves the router on 0.0.0.0:8080.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ec2_autoscaling_demo::config::{
    AppConfig, LoggingConfig, ServerMode, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER,
};
use ec2_autoscaling_demo::environment::{InstanceIdentity, ProcessEnv};
use ec2_autoscaling_demo::http::{build_runtime, start_server};
use ec2_autoscaling_demo::templates::init_templates;
use ec2_autoscaling_demo::{create_router, AppState};

/// EC2 Auto Scaling Demo: reports instance health and identity
#[derive(Parser, Debug)]
#[command(name = "ec2-autoscaling-demo", version, about)]
struct Args {
    /// Path to configuration file (defaults are used if the default path is absent)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "ec2_autoscaling_demo=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Server mode, overriding the configuration file
    #[arg(short, long, value_enum)]
    mode: Option<ServerMode>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration; an explicit path must exist
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    if let Some(mode) = args.mode {
        config.server.mode = mode;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        mode = %config.server.mode,
        workers = config.server.worker_threads,
        "Loaded configuration"
    );

    let runtime = build_runtime(&config.server)?;
    runtime.block_on(run(config))
}

fn init_tracing(filter: &str, logging: &LoggingConfig) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize Tera templates
    let tera = init_templates(&config.templates)?;
    tracing::info!("Initialized templates");

    let identity = InstanceIdentity::from_env(&ProcessEnv);
    let server_config = config.server.clone();

    // Create application state and router
    let state = AppState::new(config, tera);
    let app = create_router(state);

    start_server(app, &server_config, &identity).await?;

    tracing::info!("Server stopped");
    Ok(())
}
