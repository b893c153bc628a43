// ABOUTME: Step commands for basebody-cli
// ABOUTME: Google Fit sync to the backend and daily step history
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::helpers::context::CliContext;
use crate::helpers::display::display_history;
use anyhow::{anyhow, bail, Result};
use basebody::dashboard::{format_thousands, Dashboard};

fn last_message(dashboard: &Dashboard) -> String {
    dashboard.view().message.unwrap_or_default()
}

/// Initialize Google Fit through the dashboard, failing with its message
async fn mount(ctx: &CliContext) -> Result<Dashboard> {
    ctx.require_session()?;
    let dashboard = ctx.dashboard()?;
    dashboard.mount().await;
    if !dashboard.view().google_initialized {
        bail!(last_message(&dashboard));
    }
    Ok(dashboard)
}

/// Connect Google Fit and record today's steps
pub async fn sync(ctx: &CliContext) -> Result<()> {
    let dashboard = mount(ctx).await?;

    let synced = dashboard.connect_google_fit().await;
    let view = dashboard.view();
    if !synced {
        bail!(last_message(&dashboard));
    }

    println!("{}", view.message.unwrap_or_default());
    println!("Today's steps: {}", format_thousands(view.today_steps));
    println!("Total steps:   {}", format_thousands(view.total_steps));
    Ok(())
}

/// Show daily step counts for the last `days` days
pub async fn history(ctx: &CliContext, days: u32) -> Result<()> {
    let dashboard = mount(ctx).await?;

    dashboard
        .adapter()
        .sign_in()
        .await
        .map_err(|e| anyhow!("Failed to connect Google Fit: {e}"))?;

    if !dashboard.load_history(days).await {
        bail!(last_message(&dashboard));
    }
    display_history(&dashboard.view().history);
    Ok(())
}
