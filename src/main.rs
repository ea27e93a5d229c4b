// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Clan-Rewards CLI
//!
//! Prints the weekly clan reward state and the earliest clan completions of
//! each rewarded activity for the clan of the given player.

use clan_rewards::{cli::Cli, config::Config};
use clap::Parser;
use std::process::ExitCode;
use tracing::Instrument;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, EnvFilter, Registry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logging is scoped to this run rather than installed process-wide
    let _log_guard = tracing::subscriber::set_default(build_subscriber(config.verbose));
    let span = tracing::info_span!("clan_rewards", user = %config.username);

    let api = clan_rewards::client_for(&config);
    match clan_rewards::run(&api, &config).instrument(span).await {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.is_invariant_violation() {
                tracing::error!(error = %e, "Activity data violated the victory model");
            } else if e.is_api_key_error() {
                tracing::error!(error = %e, "API key rejected; check --apikey or BUNGIE_API_KEY");
            } else {
                tracing::error!(error = %e, "Report failed");
            }
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Build the stderr log subscriber.
///
/// Quiet by default (`RUST_LOG` applies); `--verbose` enables debug output
/// for this crate.
fn build_subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if verbose {
        if let Ok(directive) = "clan_rewards=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    Registry::default().with(filter).with(format)
}
