// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use clan_rewards::error::{AppError, Result};
use clan_rewards::models::activity::{STAT_COMPLETED, STAT_DURATION_SECONDS};
use clan_rewards::models::{
    ActivityInstance, ActivityMode, Character, Clan, FireteamEntry, Member, MilestoneDefinition,
    Page, RewardPeriod, RewardState,
};
use clan_rewards::services::DestinyApi;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the platform API.
#[derive(Default)]
#[allow(dead_code)]
pub struct StubApi {
    pub players: Vec<Member>,
    pub clans: Vec<Clan>,
    /// Roster pages, served in order (page 1 is index 0)
    pub roster_pages: Vec<Vec<Member>>,
    pub reward_state: Option<RewardState>,
    pub definition: MilestoneDefinition,
    pub characters: HashMap<i64, Vec<Character>>,
    /// Full history per (character, mode), newest first; paged on request
    pub history: HashMap<(i64, ActivityMode), Vec<ActivityInstance>>,
    pub fireteams: HashMap<i64, Vec<FireteamEntry>>,
    pub fireteam_calls: AtomicUsize,
    pub page_requests: Mutex<Vec<(i64, ActivityMode, u32)>>,
}

#[allow(dead_code)]
impl StubApi {
    pub fn fireteam_calls(&self) -> usize {
        self.fireteam_calls.load(Ordering::SeqCst)
    }

    /// Give each member one character whose ID is the member ID times ten.
    pub fn with_single_characters(mut self, roster: &[Member]) -> Self {
        for m in roster {
            self.characters.insert(
                m.membership_id,
                vec![Character {
                    character_id: m.membership_id * 10,
                }],
            );
        }
        self
    }

    pub fn add_history(&mut self, character_id: i64, activity: ActivityInstance) {
        self.history
            .entry((character_id, activity.mode))
            .or_default()
            .push(activity);
    }
}

#[async_trait]
impl DestinyApi for StubApi {
    async fn search_players(&self, display_name: &str) -> Result<Vec<Member>> {
        Ok(self
            .players
            .iter()
            .filter(|m| m.display_name == display_name)
            .cloned()
            .collect())
    }

    async fn clans_for_member(&self, _member: &Member) -> Result<Vec<Clan>> {
        Ok(self.clans.clone())
    }

    async fn clan_members_page(&self, _group_id: i64, page: u32) -> Result<Page<Member>> {
        let index = page as usize - 1;
        Ok(Page {
            results: self.roster_pages.get(index).cloned().unwrap_or_default(),
            has_more: index + 1 < self.roster_pages.len(),
        })
    }

    async fn clan_reward_state(&self, _group_id: i64) -> Result<RewardState> {
        self.reward_state
            .clone()
            .ok_or_else(|| AppError::NotFound("reward state".to_string()))
    }

    async fn characters(&self, member: &Member) -> Result<Vec<Character>> {
        Ok(self
            .characters
            .get(&member.membership_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn activity_page(
        &self,
        _member: &Member,
        character: &Character,
        mode: ActivityMode,
        page: u32,
        count: u32,
    ) -> Result<Vec<ActivityInstance>> {
        self.page_requests
            .lock()
            .unwrap()
            .push((character.character_id, mode, page));
        let all = self
            .history
            .get(&(character.character_id, mode))
            .cloned()
            .unwrap_or_default();
        Ok(all
            .into_iter()
            .skip((page * count) as usize)
            .take(count as usize)
            .collect())
    }

    async fn fireteam(&self, instance_id: i64) -> Result<Vec<FireteamEntry>> {
        self.fireteam_calls.fetch_add(1, Ordering::SeqCst);
        self.fireteams
            .get(&instance_id)
            .cloned()
            .ok_or_else(|| AppError::BungieApi(format!("no report for {}", instance_id)))
    }

    async fn milestone_definition(&self, _milestone_hash: u32) -> Result<MilestoneDefinition> {
        Ok(self.definition.clone())
    }
}

#[allow(dead_code)]
pub fn member(id: i64, name: &str) -> Member {
    Member {
        membership_id: id,
        membership_type: 3,
        display_name: name.to_string(),
    }
}

/// Window of the reward week starting 2024-01-09 17:00 UTC.
#[allow(dead_code)]
pub fn week() -> RewardPeriod {
    RewardPeriod {
        start: Utc.with_ymd_and_hms(2024, 1, 9, 17, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 1, 16, 17, 0, 0).unwrap(),
    }
}

/// A completed activity with the given victory stat.
#[allow(dead_code)]
pub fn activity(
    instance_id: i64,
    mode: ActivityMode,
    start: DateTime<Utc>,
    duration: Duration,
    standing: Option<f64>,
) -> ActivityInstance {
    let mut values = HashMap::from([
        (STAT_COMPLETED.to_string(), 1.0),
        (
            STAT_DURATION_SECONDS.to_string(),
            duration.num_seconds() as f64,
        ),
    ]);
    match standing {
        Some(v) => values.insert("standing".to_string(), v),
        None => values.insert("completionReason".to_string(), 0.0),
    };
    ActivityInstance {
        instance_id,
        mode,
        period: start,
        values,
    }
}

/// Fireteam entries for members who all completed.
#[allow(dead_code)]
pub fn completed_by(members: &[&Member]) -> Vec<FireteamEntry> {
    members
        .iter()
        .map(|m| FireteamEntry {
            player: (*m).clone(),
            completed: true,
        })
        .collect()
}
