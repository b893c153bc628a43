// ABOUTME: Command modules for basebody-cli
// ABOUTME: Account, step sync, and reward commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod account;
pub mod rewards;
pub mod steps;
