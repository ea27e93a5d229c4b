// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly clan reward report.
//!
//! Handles the core workflow:
//! 1. Resolve the player and their clan
//! 2. Fetch the clan reward state and roster
//! 3. Walk reward categories against successive past weeks
//! 4. Select the earliest clan completion per mode for each week

use crate::error::Result;
use crate::models::reward::CLAN_REWARDS_MILESTONE_HASH;
use crate::services::clan::{fetch_roster, find_clan, find_member};
use crate::services::report::WeekReport;
use crate::services::selector::CompletionSelector;
use crate::services::window::WeeklyWindows;
use crate::services::DestinyApi;

/// Builds weekly reward reports for a player's clan.
pub struct RewardReporter<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A: DestinyApi + ?Sized> RewardReporter<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Build one report per reward category of the player's clan.
    ///
    /// The first category is evaluated against the current reward period,
    /// each following one against the week before the previous.
    pub async fn build_reports(&self, username: &str) -> Result<Vec<WeekReport>> {
        let member = find_member(self.api, username).await?;
        let clan = find_clan(self.api, &member).await?;
        tracing::info!(clan = %clan.name, group_id = clan.group_id, "Found clan");

        tracing::debug!(group_id = clan.group_id, "Getting clan reward state");
        let rewards = self.api.clan_reward_state(clan.group_id).await?;
        let roster = fetch_roster(self.api, clan.group_id).await?;

        let definition = self
            .api
            .milestone_definition(CLAN_REWARDS_MILESTONE_HASH)
            .await?;

        let selector = CompletionSelector::new(self.api, &roster);
        let windows = WeeklyWindows::new(rewards.period, rewards.categories.len());

        let mut reports = Vec::with_capacity(rewards.categories.len());
        for (category, window) in rewards.categories.iter().zip(windows) {
            tracing::info!(
                category_hash = category.category_hash,
                start = %window.start,
                end = %window.end,
                "Evaluating reward window"
            );

            let completions = selector.earliest_completions(&window).await?;

            reports.push(WeekReport {
                period: window,
                category_name: definition.category_name(category.category_hash),
                entries: category
                    .entries
                    .iter()
                    .map(|e| {
                        (
                            e.earned,
                            definition.entry_name(category.category_hash, e.entry_hash),
                        )
                    })
                    .collect(),
                completions,
            });
        }

        Ok(reports)
    }
}
