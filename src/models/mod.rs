// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod completion;
pub mod member;
pub mod reward;

pub use activity::{ActivityInstance, ActivityMode, FireteamEntry, VictorySignal};
pub use completion::{ClanCompletions, Completion};
pub use member::{Character, Clan, Member, Page};
pub use reward::{
    MilestoneDefinition, RewardCategory, RewardCategoryDefinition, RewardEntry, RewardPeriod,
    RewardState,
};
