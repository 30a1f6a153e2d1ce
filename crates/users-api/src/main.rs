//! # Users API
//!
//! Starts the user store actor and serves it over HTTP until Ctrl+C.
//!
//! Configuration is layered: defaults, then `--config <file.yaml>`, then `USERS_API_*`
//! environment variables, then the remaining command-line flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use resource_actor::tracing::setup_tracing;
use resource_actor::IdPolicy;
use tokio::net::TcpListener;
use tracing::info;
use users_api::api;
use users_api::config::{CliOverrides, ServiceConfig};
use users_api::lifecycle::UserSystem;

#[derive(Parser, Debug)]
#[command(name = "users-api", version, about = "In-memory users REST API")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Socket address to bind, e.g. 127.0.0.1:8080
    #[arg(long)]
    bind: Option<String>,

    /// Port override; keeps the configured host
    #[arg(short, long)]
    port: Option<u16>,

    /// How ids of created users are chosen (collection_length | monotonic)
    #[arg(long)]
    id_policy: Option<IdPolicy>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Disable request/response logging
    #[arg(short, long)]
    quiet: bool,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind: self.bind.clone(),
            port: self.port,
            id_policy: self.id_policy,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&cli.overrides());
    config.validate()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    setup_tracing(&config.log_level);

    let addr = config.socket_addr()?;
    let system = UserSystem::start(config.channel_capacity, config.id_policy);
    let app = api::router(system.user_client.clone(), &config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("REST API is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
