// ABOUTME: Basebody CLI - walk-to-earn client for the terminal
// ABOUTME: Account login, Google Fit step sync, step history, and reward claims
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//!
//! Usage:
//! ```bash
//! # Create an account and keep the session
//! basebody-cli register --email walker@example.com --password secret --name Walker
//!
//! # Log in to an existing account
//! basebody-cli login --email walker@example.com --password secret
//!
//! # Connect Google Fit and record today's steps
//! basebody-cli sync
//!
//! # Daily steps for the last two weeks
//! basebody-cli history --days 14
//!
//! # Claim rewards and list reward history
//! basebody-cli claim
//! basebody-cli rewards
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use basebody::config::BasebodyConfig;
use basebody::logging::LoggingConfig;
use basebody::providers::install_shared_client;
use clap::{Parser, Subcommand};
use helpers::context::CliContext;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "basebody-cli",
    about = "Basebody walk-to-earn client",
    long_about = "Sync Google Fit steps to the Basebody rewards backend, browse step history, and claim rewards."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create a backend account and store its session
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Log in to the backend and store the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Forget the stored backend session
    Logout,

    /// Show session, totals, and Google Fit configuration
    Status,

    /// Connect Google Fit and record today's steps
    Sync,

    /// Show daily step counts from Google Fit
    History {
        /// Number of days to show, today included
        #[arg(long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..=90))]
        days: u32,
    },

    /// Claim earned rewards
    Claim,

    /// List reward history
    Rewards,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.verbose()
    } else {
        logging
    };
    logging.init()?;

    let config = BasebodyConfig::from_env()?;
    install_shared_client(config.http.timeouts())?;
    debug!(api_url = %config.api_url, "Basebody CLI starting");

    let ctx = CliContext::new(config);

    match cli.command {
        Command::Register {
            email,
            password,
            name,
        } => commands::account::register(&ctx, email, password, name).await,
        Command::Login { email, password } => {
            commands::account::login(&ctx, email, password).await
        }
        Command::Logout => commands::account::logout(&ctx),
        Command::Status => commands::account::status(&ctx).await,
        Command::Sync => commands::steps::sync(&ctx).await,
        Command::History { days } => commands::steps::history(&ctx, days).await,
        Command::Claim => commands::rewards::claim(&ctx).await,
        Command::Rewards => commands::rewards::list(&ctx).await,
    }
}
