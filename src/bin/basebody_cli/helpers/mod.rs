// ABOUTME: Helper modules for basebody-cli
// ABOUTME: Shared command context, console consent prompt, and output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod consent;
pub mod context;
pub mod display;
