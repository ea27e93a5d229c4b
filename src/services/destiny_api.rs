// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Narrow fetch interface over the remote statistics service.
//!
//! The selector and filters only talk to this trait, so they can run
//! against in-memory data in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ActivityInstance, ActivityMode, Character, Clan, FireteamEntry, Member, MilestoneDefinition,
    Page, RewardState,
};

/// Raw lookups against the Destiny 2 platform.
///
/// Implementations perform exactly one request per call and do no
/// filtering beyond decoding.
#[async_trait]
pub trait DestinyApi: Send + Sync {
    /// Search all platforms for players with this display name.
    async fn search_players(&self, display_name: &str) -> Result<Vec<Member>>;

    /// Clans the member belongs to.
    async fn clans_for_member(&self, member: &Member) -> Result<Vec<Clan>>;

    /// One page (1-based) of a clan's roster.
    async fn clan_members_page(&self, group_id: i64, page: u32) -> Result<Page<Member>>;

    /// Weekly reward state of a clan.
    async fn clan_reward_state(&self, group_id: i64) -> Result<RewardState>;

    /// Characters of a member (possibly none).
    async fn characters(&self, member: &Member) -> Result<Vec<Character>>;

    /// One page (0-based, newest first) of a character's history for a mode.
    async fn activity_page(
        &self,
        member: &Member,
        character: &Character,
        mode: ActivityMode,
        page: u32,
        count: u32,
    ) -> Result<Vec<ActivityInstance>>;

    /// All participants of an activity instance.
    async fn fireteam(&self, instance_id: i64) -> Result<Vec<FireteamEntry>>;

    /// Milestone definition used to render reward names.
    async fn milestone_definition(&self, milestone_hash: u32) -> Result<MilestoneDefinition>;
}
