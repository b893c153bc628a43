// ABOUTME: Output formatting helpers for basebody-cli
// ABOUTME: Session, step history, and reward tables printed to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use basebody::dashboard::format_thousands;
use basebody::models::{AuthSession, DailySteps, RewardRecord};

/// Display the account behind a freshly issued session
pub fn display_session(action: &str, session: &AuthSession) {
    println!("\n{action} successful.");
    if let Some(user) = &session.user {
        println!("   Email: {}", user.email);
        if let Some(name) = &user.name {
            println!("   Name: {name}");
        }
        if let Some(wallet) = &user.wallet_address {
            println!("   Wallet: {wallet}");
        }
    }
}

/// Display daily step counts with a total line
pub fn display_history(days: &[DailySteps]) {
    println!("\n{:<12} {:>10}", "Date", "Steps");
    println!("{}", "=".repeat(23));
    for day in days {
        println!(
            "{:<12} {:>10}",
            day.date.format("%Y-%m-%d"),
            format_thousands(day.steps)
        );
    }
    println!("{}", "-".repeat(23));
    let total: u64 = days.iter().map(|day| day.steps).sum();
    println!("{:<12} {:>10}", "Total", format_thousands(total));
}

/// Display reward history
pub fn display_rewards(rewards: &[RewardRecord]) {
    if rewards.is_empty() {
        println!("No rewards yet. Sync some steps first!");
        return;
    }

    println!(
        "\n{:<17} {:>10} {:<10} Transaction",
        "Created", "Amount", "Status"
    );
    println!("{}", "=".repeat(80));
    for reward in rewards {
        println!(
            "{:<17} {:>10.2} {:<10} {}",
            reward.created_at.format("%Y-%m-%d %H:%M"),
            reward.amount,
            reward.status,
            reward.tx_hash.as_deref().unwrap_or("-")
        );
    }
}
