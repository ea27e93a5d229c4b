// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity modes, activity history records and fireteam entries.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt;

use crate::models::Member;

/// Stat key holding the activity duration in seconds.
pub const STAT_DURATION_SECONDS: &str = "activityDurationSeconds";
/// Stat key holding the completed flag (non-zero = completed).
pub const STAT_COMPLETED: &str = "completed";

/// A stat that can decide whether an activity was won.
///
/// A signal only decides when it is present on the record; `0` is the win
/// code for every signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictorySignal {
    Standing,
    CompletionReason,
}

impl VictorySignal {
    /// Stat key of this signal in the activity values.
    pub fn stat_key(self) -> &'static str {
        match self {
            VictorySignal::Standing => "standing",
            VictorySignal::CompletionReason => "completionReason",
        }
    }
}

/// The closed set of activity categories the clan rewards track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityMode {
    Raid,
    Nightfall,
    Trials,
    Crucible,
}

impl ActivityMode {
    /// All modes, in report order.
    pub const ALL: [ActivityMode; 4] = [
        ActivityMode::Raid,
        ActivityMode::Nightfall,
        ActivityMode::Trials,
        ActivityMode::Crucible,
    ];

    /// Numeric mode code used by the activity history endpoint.
    pub fn code(self) -> i32 {
        match self {
            ActivityMode::Raid => 4,
            ActivityMode::Nightfall => 16,
            ActivityMode::Trials => 39,
            ActivityMode::Crucible => 5,
        }
    }

    /// Minimum number of clan members that must have completed the activity
    /// together for it to count as a clan clear.
    pub fn quorum(self) -> usize {
        match self {
            ActivityMode::Raid => 3,
            ActivityMode::Nightfall | ActivityMode::Trials | ActivityMode::Crucible => 2,
        }
    }

    /// Victory signals in precedence order.
    pub fn victory_signals(self) -> &'static [VictorySignal] {
        const STANDING_FIRST: &[VictorySignal] =
            &[VictorySignal::Standing, VictorySignal::CompletionReason];
        match self {
            ActivityMode::Raid
            | ActivityMode::Nightfall
            | ActivityMode::Trials
            | ActivityMode::Crucible => STANDING_FIRST,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActivityMode::Raid => "Raid",
            ActivityMode::Nightfall => "Nightfall",
            ActivityMode::Trials => "Trials",
            ActivityMode::Crucible => "Crucible",
        }
    }
}

impl fmt::Display for ActivityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a character's activity history.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityInstance {
    /// Unique instance ID (key for the post-game report)
    pub instance_id: i64,
    /// Mode the history was queried for
    pub mode: ActivityMode,
    /// Start time
    pub period: DateTime<Utc>,
    /// Basic stat values keyed by stat name
    pub values: HashMap<String, f64>,
}

impl ActivityInstance {
    /// Look up a basic stat value.
    pub fn stat(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Duration of the session (zero if not reported).
    ///
    /// `None` when the reported value is outside the representable range.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_seconds(self.stat(STAT_DURATION_SECONDS).unwrap_or(0.0) as i64)
    }

    /// Computed end time: start plus duration.
    ///
    /// `None` when the duration is unrepresentable or the sum overflows.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.period.checked_add_signed(self.duration()?)
    }

    /// Whether the character stayed to the end of the activity.
    pub fn completed(&self) -> bool {
        self.stat(STAT_COMPLETED).is_some_and(|v| v != 0.0)
    }
}

/// One participant of an activity instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FireteamEntry {
    pub player: Member,
    /// Whether this participant completed the activity
    pub completed: bool,
}
