// ABOUTME: Account commands for basebody-cli
// ABOUTME: Register, login, logout, and status against the rewards backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::helpers::context::CliContext;
use crate::helpers::display::display_session;
use anyhow::Result;
use basebody::backend::{login_and_store, register_and_store, BackendApi, TokenStore};
use basebody::dashboard::format_thousands;
use basebody::models::Credentials;
use tracing::{info, warn};

/// Create an account and store its session
pub async fn register(
    ctx: &CliContext,
    email: String,
    password: String,
    name: Option<String>,
) -> Result<()> {
    info!("Registering {email}");
    let credentials = Credentials {
        email,
        password,
        name,
    };
    let session =
        register_and_store(ctx.backend.as_ref(), ctx.tokens.as_ref(), &credentials).await?;
    display_session("Registration", &session);
    Ok(())
}

/// Log in and store the session
pub async fn login(ctx: &CliContext, email: String, password: String) -> Result<()> {
    info!("Logging in as {email}");
    let credentials = Credentials::login(email, password);
    let session = login_and_store(ctx.backend.as_ref(), ctx.tokens.as_ref(), &credentials).await?;
    display_session("Login", &session);
    Ok(())
}

/// Forget the stored session
pub fn logout(ctx: &CliContext) -> Result<()> {
    ctx.tokens.clear()?;
    println!("Logged out.");
    Ok(())
}

/// Show session state, recorded totals, and Google Fit configuration
pub async fn status(ctx: &CliContext) -> Result<()> {
    println!("Backend:    {}", ctx.backend.base_url());
    println!("Session:    {}", ctx.tokens.path().display());

    if ctx.has_session()? {
        match ctx.backend.get_steps().await {
            Ok(summary) => println!(
                "Logged in:  yes ({} steps recorded)",
                format_thousands(summary.total_steps)
            ),
            Err(err) => {
                warn!(error = %err, "Could not read recorded steps");
                println!("Logged in:  yes (totals unavailable: {err})");
            }
        }
    } else {
        println!("Logged in:  no");
    }

    match &ctx.config.google_fit {
        Some(google) => println!("Google Fit: configured (client {})", google.client_id),
        None => println!("Google Fit: not configured"),
    }
    Ok(())
}
