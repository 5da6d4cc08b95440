//! Serve command - run the demo server with request logging

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::Config;
use crate::core::logger::RequestLogger;
use crate::http;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Log the client IP
    #[arg(long)]
    pub log_ip: bool,

    /// Log the User-Agent header
    #[arg(long)]
    pub log_user_agent: bool,

    /// Append plain log lines to this file instead of the console
    #[arg(long, value_name = "PATH")]
    pub log_to_file: Option<PathBuf>,

    /// Skip the line written when a request arrives
    #[arg(long)]
    pub no_incoming: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.log_ip {
            config.logger.log_ip = true;
        }
        if self.log_user_agent {
            config.logger.log_user_agent = true;
        }
        if let Some(path) = &self.log_to_file {
            config.logger.log_to_file = true;
            config.logger.log_file_path = path.clone();
        }
        if self.no_incoming {
            config.logger.log_incoming = false;
        }
    }
}

/// Execute the serve command
pub async fn execute(
    args: ServeArgs,
    mut config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    args.apply(&mut config);
    config.validate()?;
    config.log_config();

    let logger = RequestLogger::new(config.logger.clone())?;
    let app = http::demo_router(logger);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Diagnostics go to stderr; stdout belongs to request lines
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reqlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
