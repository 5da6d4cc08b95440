//! CLI adapter for reqlog
//!
//! Runs a demo HTTP server with the request logger installed, and
//! inspects the effective configuration. Depends on `core/` and
//! `http/`.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// reqlog - HTTP request/response logging middleware
///
/// Logs method, path, status code, duration and optionally client IP
/// and user agent for every request, to the console or a file.
#[derive(Parser, Debug)]
#[command(name = "reqlog")]
#[command(author = "RHOBIMD HEALTH")]
#[command(version)]
#[command(about = "HTTP request/response logger", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a demo HTTP server with request logging enabled
    Serve(commands::ServeArgs),

    /// Show the effective configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  reqlog completions bash > ~/.local/share/bash-completion/completions/reqlog
    ///   zsh:   reqlog completions zsh > ~/.zfunc/_reqlog
    ///   fish:  reqlog completions fish > ~/.config/fish/completions/reqlog.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;

    // Handle completions command early (doesn't need config)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let config = Config::load()?;

    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &config, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
