// ABOUTME: Reward commands for basebody-cli
// ABOUTME: Claim earned rewards and list reward history
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::helpers::context::CliContext;
use crate::helpers::display::display_rewards;
use anyhow::{bail, Result};
use basebody::backend::BackendApi;
use basebody::errors::BackendError;

/// Claim earned rewards
pub async fn claim(ctx: &CliContext) -> Result<()> {
    ctx.require_session()?;
    match ctx.backend.claim_reward().await {
        Ok(receipt) => {
            println!("Reward claimed! TxHash: {}", receipt.tx_hash);
            Ok(())
        }
        Err(BackendError::Api {
            message: Some(message),
            ..
        }) => bail!(message),
        Err(err) => bail!("Failed to claim reward: {err}"),
    }
}

/// List reward history
pub async fn list(ctx: &CliContext) -> Result<()> {
    ctx.require_session()?;
    let rewards = ctx.backend.get_rewards().await?;
    display_rewards(&rewards);
    Ok(())
}
