// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command-line interface definition.

use clap::Parser;

/// Report which weekly clan rewards were earned and which clan fireteams
/// completed each activity first.
#[derive(Parser, Debug)]
#[command(name = "clan-rewards")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The Bungie API key (defaults to $BUNGIE_API_KEY)
    #[arg(long = "apikey", alias = "api-key")]
    pub api_key: Option<String>,

    /// The user to query
    #[arg(long = "user", alias = "username")]
    pub username: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
