//! Weekly clan reward state and reward definitions.
//!
//! The reward state only carries hashes; display names come from the
//! milestone definition.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Hash of the clan weekly rewards milestone definition.
pub const CLAN_REWARDS_MILESTONE_HASH: u32 = 4253138191;

/// One week's evaluation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RewardPeriod {
    /// Whether `[span_start, span_end]` lies fully inside this period.
    ///
    /// Both boundaries are inclusive.
    pub fn contains_span(&self, span_start: DateTime<Utc>, span_end: DateTime<Utc>) -> bool {
        span_start >= self.start && span_end <= self.end
    }
}

/// Reward state of a clan for the current period.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardState {
    pub period: RewardPeriod,
    pub categories: Vec<RewardCategory>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewardCategory {
    pub category_hash: u32,
    pub entries: Vec<RewardEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardEntry {
    pub entry_hash: u32,
    pub earned: bool,
}

/// Display names from the clan rewards milestone definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneDefinition {
    pub rewards: HashMap<u32, RewardCategoryDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardCategoryDefinition {
    pub name: String,
    pub entries: HashMap<u32, String>,
}

impl MilestoneDefinition {
    /// Display name of a reward category, or a placeholder if unknown.
    pub fn category_name(&self, category_hash: u32) -> String {
        self.rewards
            .get(&category_hash)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| unknown_reward(category_hash))
    }

    /// Display name of a reward entry, or a placeholder if unknown.
    pub fn entry_name(&self, category_hash: u32, entry_hash: u32) -> String {
        self.rewards
            .get(&category_hash)
            .and_then(|c| c.entries.get(&entry_hash))
            .cloned()
            .unwrap_or_else(|| unknown_reward(entry_hash))
    }
}

fn unknown_reward(hash: u32) -> String {
    format!("Unknown reward {}", hash)
}
