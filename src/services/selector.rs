// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Earliest clan completion selection.
//!
//! For each mode, every roster member's every character's history inside the
//! window is scanned, in roster order. A candidate must be:
//! 1. Inside the window
//! 2. A victory
//! 3. Completed by at least the mode's quorum of clan members
//!
//! The candidate with the strictly earliest end wins; on equal ends the one
//! scanned first is kept.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::error::Result;
use crate::models::{ActivityMode, Character, ClanCompletions, Completion, Member, RewardPeriod};
use crate::services::activity_filter::collect_window_activities;
use crate::services::fireteam::resolve_fireteam;
use crate::services::victory::is_victory;
use crate::services::DestinyApi;

/// Whether enough clan members completed together for the mode.
pub fn meets_quorum(mode: ActivityMode, clan_members: usize) -> bool {
    clan_members >= mode.quorum()
}

/// Whether a candidate ending at `end` would replace the current best.
///
/// Only a strictly earlier end replaces; ties keep the incumbent.
pub fn beats(best: Option<&Completion>, end: DateTime<Utc>) -> bool {
    best.is_none_or(|b| end < b.end)
}

/// Scans a clan roster for the earliest qualifying completions.
pub struct CompletionSelector<'a, A: ?Sized> {
    api: &'a A,
    roster: &'a [Member],
    roster_ids: HashSet<i64>,
}

impl<'a, A: DestinyApi + ?Sized> CompletionSelector<'a, A> {
    /// Create a selector over a roster; scan order is the slice order.
    pub fn new(api: &'a A, roster: &'a [Member]) -> Self {
        Self {
            api,
            roster,
            roster_ids: roster.iter().map(|m| m.membership_id).collect(),
        }
    }

    /// Earliest completion of every mode inside the window.
    pub async fn earliest_completions(&self, window: &RewardPeriod) -> Result<ClanCompletions> {
        let mut completions = ClanCompletions::default();

        for member in self.roster {
            let characters = self.characters(member).await?;
            for mode in ActivityMode::ALL {
                let slot = completions.get_mut(mode);
                let best = slot.take();
                *slot = self
                    .scan_member(member, &characters, mode, window, best)
                    .await?;
            }
        }

        Ok(completions)
    }

    /// Earliest completion of a single mode inside the window.
    pub async fn earliest_completion(
        &self,
        window: &RewardPeriod,
        mode: ActivityMode,
    ) -> Result<Option<Completion>> {
        let mut best = None;
        for member in self.roster {
            let characters = self.characters(member).await?;
            best = self
                .scan_member(member, &characters, mode, window, best)
                .await?;
        }
        Ok(best)
    }

    async fn characters(&self, member: &Member) -> Result<Vec<Character>> {
        tracing::debug!(
            member_id = member.membership_id,
            member = %member.display_name,
            "Fetching characters"
        );
        let characters = self.api.characters(member).await?;
        if characters.is_empty() {
            tracing::debug!(
                member_id = member.membership_id,
                member = %member.display_name,
                "No characters"
            );
        }
        Ok(characters)
    }

    /// Fold one member's candidates into `best`.
    async fn scan_member(
        &self,
        member: &Member,
        characters: &[Character],
        mode: ActivityMode,
        window: &RewardPeriod,
        mut best: Option<Completion>,
    ) -> Result<Option<Completion>> {
        for character in characters {
            let activities =
                collect_window_activities(self.api, member, character, mode, window).await?;

            for activity in activities {
                if !is_victory(&activity)? {
                    continue;
                }

                let Some(end) = activity.end() else {
                    continue;
                };
                // Skip the report fetch for candidates that cannot win
                if !beats(best.as_ref(), end) {
                    continue;
                }

                let fireteam =
                    resolve_fireteam(self.api, activity.instance_id, &self.roster_ids).await?;
                if !meets_quorum(mode, fireteam.len()) {
                    tracing::debug!(
                        %mode,
                        instance_id = activity.instance_id,
                        clan_members = fireteam.len(),
                        required = mode.quorum(),
                        "Not enough clan members in fireteam"
                    );
                    continue;
                }

                tracing::debug!(
                    %mode,
                    instance_id = activity.instance_id,
                    %end,
                    "New earliest clan completion"
                );
                best = Some(Completion {
                    instance_id: activity.instance_id,
                    end,
                    fireteam,
                });
            }
        }

        Ok(best)
    }
}
