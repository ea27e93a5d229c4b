// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity_filter;
pub mod bungie;
pub mod clan;
pub mod destiny_api;
pub mod fireteam;
pub mod report;
pub mod rewards;
pub mod selector;
pub mod victory;
pub mod window;

pub use bungie::BungieClient;
pub use destiny_api::DestinyApi;
pub use report::{render_reports, WeekReport};
pub use rewards::RewardReporter;
pub use selector::CompletionSelector;
pub use window::WeeklyWindows;
