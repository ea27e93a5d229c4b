// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run configuration, merged from command-line flags and the environment.

use crate::cli::Cli;
use std::env;

/// Environment variable consulted when `--apikey` is not given.
pub const API_KEY_ENV: &str = "BUNGIE_API_KEY";

/// Configuration for a single report run.
#[derive(Clone)]
pub struct Config {
    /// Bungie.net API key sent as `X-API-Key`
    pub api_key: String,
    /// Display name of the player whose clan is reported
    pub username: String,
    /// Enable debug logging for this crate
    pub verbose: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Config {
    /// Build configuration from parsed flags.
    ///
    /// The API key falls back to `BUNGIE_API_KEY` (a `.env` file is loaded
    /// first if present).
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = match cli.api_key {
            Some(key) => key,
            None => env::var(API_KEY_ENV).map_err(|_| ConfigError::Missing(API_KEY_ENV))?,
        };
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::Missing(API_KEY_ENV));
        }

        let username = cli.username.unwrap_or_default().trim().to_string();
        if username.is_empty() {
            return Err(ConfigError::Missing("--user"));
        }

        Ok(Self {
            api_key,
            username,
            verbose: cli.verbose,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}
