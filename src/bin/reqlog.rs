//! reqlog CLI - demo server and configuration inspection
//!
//! # Examples
//!
//! ```bash
//! # Serve with client IPs in the log
//! reqlog serve --port 3000 --log-ip
//!
//! # Log to a file instead of the console
//! reqlog serve --log-to-file ./logs.txt
//!
//! # Show configuration
//! reqlog show-config --format json
//! ```

use clap::Parser;
use reqlog::cli::{output, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
