// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Clan-Rewards: report weekly Destiny 2 clan rewards
//!
//! This crate queries the Bungie.net platform for a player's clan, finds
//! which clan fireteams completed each rewarded activity first in every
//! weekly reward period, and renders the result as text.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{render_reports, BungieClient, DestinyApi, RewardReporter};

/// Build the full report text for the configured user.
pub async fn run<A: DestinyApi + ?Sized>(api: &A, config: &Config) -> error::Result<String> {
    let reports = RewardReporter::new(api)
        .build_reports(&config.username)
        .await?;
    Ok(render_reports(&reports))
}

/// Create the platform client for a configuration.
pub fn client_for(config: &Config) -> BungieClient {
    BungieClient::new(config.api_key.clone())
}
