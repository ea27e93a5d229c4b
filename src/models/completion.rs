// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Clan completions selected per activity mode.

use chrono::{DateTime, Utc};

use crate::models::{ActivityMode, Member};

/// A qualifying clan clear of one activity instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Instance that was cleared
    pub instance_id: i64,
    /// End time of the instance
    pub end: DateTime<Utc>,
    /// Clan members who completed it together (at least the mode's quorum)
    pub fireteam: Vec<Member>,
}

impl Completion {
    /// Fireteam display names, sorted alphabetically and joined with commas.
    ///
    /// Names are ordered ignoring case first; names equal up to case fall back
    /// to byte order so the result is deterministic.
    pub fn fireteam_names(&self) -> String {
        let mut names: Vec<&str> = self
            .fireteam
            .iter()
            .map(|m| m.display_name.as_str())
            .collect();
        names.sort_unstable_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        names.join(",")
    }
}

/// Earliest clan completion for each mode within one window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClanCompletions {
    pub raid: Option<Completion>,
    pub nightfall: Option<Completion>,
    pub trials: Option<Completion>,
    pub crucible: Option<Completion>,
}

impl ClanCompletions {
    pub fn get(&self, mode: ActivityMode) -> Option<&Completion> {
        self.slot(mode).as_ref()
    }

    pub fn get_mut(&mut self, mode: ActivityMode) -> &mut Option<Completion> {
        match mode {
            ActivityMode::Raid => &mut self.raid,
            ActivityMode::Nightfall => &mut self.nightfall,
            ActivityMode::Trials => &mut self.trials,
            ActivityMode::Crucible => &mut self.crucible,
        }
    }

    fn slot(&self, mode: ActivityMode) -> &Option<Completion> {
        match mode {
            ActivityMode::Raid => &self.raid,
            ActivityMode::Nightfall => &self.nightfall,
            ActivityMode::Trials => &self.trials,
            ActivityMode::Crucible => &self.crucible,
        }
    }
}
