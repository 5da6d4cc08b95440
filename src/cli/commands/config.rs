//! Config command - show current configuration

use crate::cli::output::{self, colors, format_flag_colored};
use crate::cli::OutputFormat;
use crate::core::config::{user_config_file, Config};
use clap::Args;
use serde::Serialize;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print the location of the user config file
    #[arg(long)]
    pub path: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = user_config_file().to_string_lossy().into_owned();

    if args.path {
        println!("{config_file}");
        return Ok(());
    }

    let response = ConfigResponse {
        config_file,
        config,
    };

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => output::print_json(&response)?,
    }

    Ok(())
}

fn print_human(response: &ConfigResponse<'_>) {
    let logger = &response.config.logger;

    output::print_header("Configuration:");
    println!(
        "  {} {}",
        colors::label("config_file:"),
        colors::file_path(&response.config_file)
    );
    println!("  {}", colors::label("server:"));
    println!("    host: {}", response.config.server.host);
    println!("    port: {}", response.config.server.port);
    println!("  {}", colors::label("logger:"));
    println!("    log_incoming: {}", format_flag_colored(logger.log_incoming));
    println!("    log_method: {}", format_flag_colored(logger.log_method));
    println!("    log_path: {}", format_flag_colored(logger.log_path));
    println!("    log_status_code: {}", format_flag_colored(logger.log_status_code));
    println!("    log_duration: {}", format_flag_colored(logger.log_duration));
    println!("    log_ip: {}", format_flag_colored(logger.log_ip));
    println!("    log_user_agent: {}", format_flag_colored(logger.log_user_agent));
    println!("    log_to_file: {}", format_flag_colored(logger.log_to_file));
    println!(
        "    log_file_path: {}",
        colors::file_path(&logger.log_file_path.to_string_lossy())
    );
    println!("    ip_header: {}", logger.ip_header);
}
