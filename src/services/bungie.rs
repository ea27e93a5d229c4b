// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bungie.net platform API client.
//!
//! Handles:
//! - API key authentication (`X-API-Key`)
//! - Platform response envelope decoding and error mapping
//! - Conversion of wire records into domain models

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{
    activity::STAT_COMPLETED, ActivityInstance, ActivityMode, Character, Clan, FireteamEntry,
    Member, MilestoneDefinition, Page, RewardCategory, RewardCategoryDefinition, RewardEntry,
    RewardPeriod, RewardState,
};
use crate::services::DestinyApi;

/// Membership type that searches across every platform.
const MEMBERSHIP_TYPE_ALL: i32 = -1;
/// Group type of clans.
const GROUP_TYPE_CLAN: i32 = 1;
/// Profile component carrying characters.
const COMPONENT_CHARACTERS: u32 = 200;
/// Platform error code for success.
const PLATFORM_SUCCESS: i32 = 1;

/// Bungie.net API client.
#[derive(Clone)]
pub struct BungieClient {
    http: reqwest::Client,
    base_url: String,
    stats_base_url: String,
    api_key: String,
}

impl BungieClient {
    /// Create a new client authenticating with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://www.bungie.net/Platform".to_string(),
            stats_base_url: "https://stats.bungie.net/Platform".to_string(),
            api_key,
        }
    }

    /// Generic GET request returning the decoded `Response` payload.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        tracing::trace!(url, "GET");
        let response = self
            .http
            .get(url)
            .header("X-API-Key", &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::BungieApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Like `get_json`, but a missing payload is an error.
    async fn get_required<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.get_json(url, query)
            .await?
            .ok_or_else(|| AppError::BungieApi(format!("Empty response from {}", url)))
    }

    /// Check response status, then unwrap the platform envelope.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Bungie rate limit hit (429)");
            }

            return Err(AppError::BungieApi(format!("HTTP {}: {}", status, body)));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::BungieApi(format!("JSON parse error: {}", e)))?;

        envelope.into_response()
    }
}

#[async_trait]
impl DestinyApi for BungieClient {
    async fn search_players(&self, display_name: &str) -> Result<Vec<Member>> {
        let url = format!(
            "{}/Destiny2/SearchDestinyPlayer/{}/{}/",
            self.base_url,
            MEMBERSHIP_TYPE_ALL,
            urlencoding::encode(display_name)
        );
        let cards: Vec<UserInfoCard> = self.get_json(&url, &[]).await?.unwrap_or_default();
        Ok(cards.into_iter().map(UserInfoCard::into_member).collect())
    }

    async fn clans_for_member(&self, member: &Member) -> Result<Vec<Clan>> {
        let url = format!(
            "{}/GroupV2/User/{}/{}/0/{}/",
            self.base_url, member.membership_type, member.membership_id, GROUP_TYPE_CLAN
        );
        let resp: GroupMembershipSearch = self.get_required(&url, &[]).await?;
        Ok(resp
            .results
            .into_iter()
            .map(|m| Clan {
                group_id: m.group.group_id,
                name: m.group.name,
            })
            .collect())
    }

    async fn clan_members_page(&self, group_id: i64, page: u32) -> Result<Page<Member>> {
        let url = format!("{}/GroupV2/{}/Members/", self.base_url, group_id);
        let resp: GroupMemberSearch = self
            .get_required(&url, &[("currentpage", page.to_string())])
            .await?;
        Ok(Page {
            results: resp
                .results
                .into_iter()
                .map(|m| m.destiny_user_info.into_member())
                .collect(),
            has_more: resp.has_more,
        })
    }

    async fn clan_reward_state(&self, group_id: i64) -> Result<RewardState> {
        let url = format!(
            "{}/Destiny2/Clan/{}/WeeklyRewardState/",
            self.base_url, group_id
        );
        let milestone: MilestoneWire = self.get_required(&url, &[]).await?;
        milestone.into_reward_state()
    }

    async fn characters(&self, member: &Member) -> Result<Vec<Character>> {
        let url = format!(
            "{}/Destiny2/{}/Profile/{}/",
            self.base_url, member.membership_type, member.membership_id
        );
        let profile: Option<ProfileWire> = self
            .get_json(&url, &[("components", COMPONENT_CHARACTERS.to_string())])
            .await?;
        Ok(profile.map(ProfileWire::into_characters).unwrap_or_default())
    }

    async fn activity_page(
        &self,
        member: &Member,
        character: &Character,
        mode: ActivityMode,
        page: u32,
        count: u32,
    ) -> Result<Vec<ActivityInstance>> {
        let url = format!(
            "{}/Destiny2/{}/Account/{}/Character/{}/Stats/Activities/",
            self.base_url, member.membership_type, member.membership_id, character.character_id
        );
        let history: Option<ActivityHistoryWire> = self
            .get_json(
                &url,
                &[
                    ("count", count.to_string()),
                    ("mode", mode.code().to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        Ok(history
            .map(|h| h.into_instances(mode))
            .unwrap_or_default())
    }

    async fn fireteam(&self, instance_id: i64) -> Result<Vec<FireteamEntry>> {
        let url = format!(
            "{}/Destiny2/Stats/PostGameCarnageReport/{}/",
            self.stats_base_url, instance_id
        );
        let report: CarnageReportWire = self.get_required(&url, &[]).await?;
        Ok(report.into_entries())
    }

    async fn milestone_definition(&self, milestone_hash: u32) -> Result<MilestoneDefinition> {
        let url = format!(
            "{}/Destiny2/Manifest/DestinyMilestoneDefinition/{}/",
            self.base_url, milestone_hash
        );
        let def: MilestoneDefinitionWire = self.get_required(&url, &[]).await?;
        Ok(def.into_definition())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

/// Platform response envelope wrapping every payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope<T> {
    response: Option<T>,
    error_code: i32,
    #[serde(default)]
    error_status: String,
    #[serde(default)]
    message: String,
}

impl<T> Envelope<T> {
    fn into_response(self) -> Result<Option<T>> {
        if self.error_code != PLATFORM_SUCCESS {
            return Err(AppError::BungieApi(format!(
                "{} ({}): {}",
                self.error_status, self.error_code, self.message
            )));
        }
        Ok(self.response)
    }
}

/// 64-bit IDs arrive as JSON strings.
fn de_i64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
        Raw::Num(n) => Ok(n),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfoCard {
    #[serde(deserialize_with = "de_i64")]
    membership_id: i64,
    membership_type: i32,
    #[serde(default)]
    display_name: String,
}

impl UserInfoCard {
    fn into_member(self) -> Member {
        Member {
            membership_id: self.membership_id,
            membership_type: self.membership_type,
            display_name: self.display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroupMembershipSearch {
    #[serde(default)]
    results: Vec<GroupMembership>,
}

#[derive(Debug, Deserialize)]
struct GroupMembership {
    group: GroupWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupWire {
    #[serde(deserialize_with = "de_i64")]
    group_id: i64,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupMemberSearch {
    #[serde(default)]
    results: Vec<GroupMemberWire>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupMemberWire {
    destiny_user_info: UserInfoCard,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneWire {
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    rewards: Vec<RewardCategoryWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewardCategoryWire {
    reward_category_hash: u32,
    #[serde(default)]
    entries: Vec<RewardEntryWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewardEntryWire {
    reward_entry_hash: u32,
    #[serde(default)]
    earned: bool,
}

impl MilestoneWire {
    fn into_reward_state(self) -> Result<RewardState> {
        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AppError::NotFound(
                    "Reward period dates in clan reward state".to_string(),
                ))
            }
        };

        Ok(RewardState {
            period: RewardPeriod { start, end },
            categories: self
                .rewards
                .into_iter()
                .map(|c| RewardCategory {
                    category_hash: c.reward_category_hash,
                    entries: c
                        .entries
                        .into_iter()
                        .map(|e| RewardEntry {
                            entry_hash: e.reward_entry_hash,
                            earned: e.earned,
                        })
                        .collect(),
                })
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProfileWire {
    characters: Option<ComponentWire<CharacterWire>>,
}

#[derive(Debug, Deserialize)]
struct ComponentWire<T> {
    data: Option<HashMap<String, T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterWire {
    #[serde(deserialize_with = "de_i64")]
    character_id: i64,
}

impl ProfileWire {
    /// Characters ordered by ID so repeated runs scan them identically.
    fn into_characters(self) -> Vec<Character> {
        let mut characters: Vec<Character> = self
            .characters
            .and_then(|c| c.data)
            .unwrap_or_default()
            .into_values()
            .map(|c| Character {
                character_id: c.character_id,
            })
            .collect();
        characters.sort_by_key(|c| c.character_id);
        characters
    }
}

#[derive(Debug, Deserialize)]
struct ActivityHistoryWire {
    #[serde(default)]
    activities: Vec<HistoricalPeriodWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoricalPeriodWire {
    period: DateTime<Utc>,
    activity_details: ActivityDetailsWire,
    #[serde(default)]
    values: HashMap<String, StatValueWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityDetailsWire {
    #[serde(deserialize_with = "de_i64")]
    instance_id: i64,
}

#[derive(Debug, Deserialize)]
struct StatValueWire {
    basic: BasicValueWire,
}

#[derive(Debug, Deserialize)]
struct BasicValueWire {
    value: f64,
}

fn flatten_values(values: HashMap<String, StatValueWire>) -> HashMap<String, f64> {
    values
        .into_iter()
        .map(|(k, v)| (k, v.basic.value))
        .collect()
}

impl ActivityHistoryWire {
    fn into_instances(self, mode: ActivityMode) -> Vec<ActivityInstance> {
        self.activities
            .into_iter()
            .map(|a| ActivityInstance {
                instance_id: a.activity_details.instance_id,
                mode,
                period: a.period,
                values: flatten_values(a.values),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct CarnageReportWire {
    #[serde(default)]
    entries: Vec<CarnageEntryWire>,
}

#[derive(Debug, Deserialize)]
struct CarnageEntryWire {
    player: CarnagePlayerWire,
    #[serde(default)]
    values: HashMap<String, StatValueWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CarnagePlayerWire {
    destiny_user_info: UserInfoCard,
}

impl CarnageReportWire {
    fn into_entries(self) -> Vec<FireteamEntry> {
        self.entries
            .into_iter()
            .map(|e| {
                let completed = e
                    .values
                    .get(STAT_COMPLETED)
                    .is_some_and(|v| v.basic.value != 0.0);
                FireteamEntry {
                    player: e.player.destiny_user_info.into_member(),
                    completed,
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneDefinitionWire {
    #[serde(default)]
    rewards: HashMap<String, RewardCategoryDefinitionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewardCategoryDefinitionWire {
    display_properties: DisplayPropertiesWire,
    #[serde(default)]
    reward_entries: HashMap<String, RewardEntryDefinitionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewardEntryDefinitionWire {
    display_properties: DisplayPropertiesWire,
}

#[derive(Debug, Deserialize)]
struct DisplayPropertiesWire {
    #[serde(default)]
    name: String,
}

impl MilestoneDefinitionWire {
    fn into_definition(self) -> MilestoneDefinition {
        // Hash keys that are not numbers can never be looked up; drop them.
        let rewards = self
            .rewards
            .into_iter()
            .filter_map(|(hash, category)| {
                let hash = hash.parse::<u32>().ok()?;
                let entries = category
                    .reward_entries
                    .into_iter()
                    .filter_map(|(entry_hash, entry)| {
                        Some((entry_hash.parse::<u32>().ok()?, entry.display_properties.name))
                    })
                    .collect();
                Some((
                    hash,
                    RewardCategoryDefinition {
                        name: category.display_properties.name,
                        entries,
                    },
                ))
            })
            .collect();
        MilestoneDefinition { rewards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_envelope_error_code_maps_to_bungie_error() {
        let envelope: Envelope<Vec<UserInfoCard>> = serde_json::from_value(json!({
            "ErrorCode": 2101,
            "ErrorStatus": "ApiInvalidOrExpiredKey",
            "Message": "Invalid API key",
            "Response": null
        }))
        .unwrap();

        let err = envelope.into_response().unwrap_err();
        assert!(matches!(err, AppError::BungieApi(_)));
        assert!(err.is_api_key_error());
    }

    #[test]
    fn test_user_info_card_parses_string_ids() {
        let envelope: Envelope<Vec<UserInfoCard>> = serde_json::from_value(json!({
            "ErrorCode": 1,
            "ErrorStatus": "Success",
            "Message": "Ok",
            "Response": [{
                "membershipId": "4611686018467284386",
                "membershipType": 3,
                "displayName": "Guardian"
            }]
        }))
        .unwrap();

        let cards = envelope.into_response().unwrap().unwrap();
        let member = cards.into_iter().next().unwrap().into_member();
        assert_eq!(member.membership_id, 4611686018467284386);
        assert_eq!(member.membership_type, 3);
        assert_eq!(member.display_name, "Guardian");
    }

    #[test]
    fn test_missing_response_is_none() {
        let envelope: Envelope<ProfileWire> = serde_json::from_value(json!({
            "ErrorCode": 1,
            "ErrorStatus": "Success",
            "Message": "Ok"
        }))
        .unwrap();
        assert!(envelope.into_response().unwrap().is_none());
    }

    #[test]
    fn test_activity_history_flattens_values() {
        let history: ActivityHistoryWire = serde_json::from_value(json!({
            "activities": [{
                "period": "2024-01-10T20:00:00Z",
                "activityDetails": { "instanceId": "12345", "mode": 4 },
                "values": {
                    "completed": { "basic": { "value": 1.0, "displayValue": "Yes" } },
                    "activityDurationSeconds": { "basic": { "value": 3600.0 } },
                    "completionReason": { "basic": { "value": 0.0 } }
                }
            }]
        }))
        .unwrap();

        let instances = history.into_instances(ActivityMode::Raid);
        assert_eq!(instances.len(), 1);
        let instance = &instances[0];
        assert_eq!(instance.instance_id, 12345);
        assert_eq!(instance.mode, ActivityMode::Raid);
        assert!(instance.completed());
        assert_eq!(instance.stat("completionReason"), Some(0.0));
        assert_eq!(
            instance.end(),
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 21, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_empty_history_has_no_activities() {
        let history: ActivityHistoryWire = serde_json::from_value(json!({})).unwrap();
        assert!(history.into_instances(ActivityMode::Trials).is_empty());
    }

    #[test]
    fn test_carnage_report_completed_flags() {
        let report: CarnageReportWire = serde_json::from_value(json!({
            "entries": [
                {
                    "player": {
                        "destinyUserInfo": {
                            "membershipId": "1",
                            "membershipType": 3,
                            "displayName": "a"
                        }
                    },
                    "values": { "completed": { "basic": { "value": 1.0 } } }
                },
                {
                    "player": {
                        "destinyUserInfo": {
                            "membershipId": "2",
                            "membershipType": 3,
                            "displayName": "b"
                        }
                    },
                    "values": { "completed": { "basic": { "value": 0.0 } } }
                },
                {
                    "player": {
                        "destinyUserInfo": {
                            "membershipId": "3",
                            "membershipType": 3,
                            "displayName": "c"
                        }
                    }
                }
            ]
        }))
        .unwrap();

        let entries = report.into_entries();
        let completed: Vec<bool> = entries.iter().map(|e| e.completed).collect();
        assert_eq!(completed, vec![true, false, false]);
    }

    #[test]
    fn test_profile_characters_sorted_by_id() {
        let profile: ProfileWire = serde_json::from_value(json!({
            "characters": { "data": {
                "2305843009301234568": { "characterId": "2305843009301234568" },
                "2305843009301234567": { "characterId": "2305843009301234567" }
            }}
        }))
        .unwrap();

        let ids: Vec<i64> = profile
            .into_characters()
            .iter()
            .map(|c| c.character_id)
            .collect();
        assert_eq!(ids, vec![2305843009301234567, 2305843009301234568]);
    }

    #[test]
    fn test_reward_state_requires_dates() {
        let wire: MilestoneWire = serde_json::from_value(json!({ "rewards": [] })).unwrap();
        let err = wire.into_reward_state().unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_reward_state_conversion() {
        let wire: MilestoneWire = serde_json::from_value(json!({
            "milestoneHash": 4253138191u32,
            "startDate": "2024-01-09T17:00:00Z",
            "endDate": "2024-01-16T17:00:00Z",
            "rewards": [{
                "rewardCategoryHash": 1064137897,
                "entries": [
                    { "rewardEntryHash": 3789021730u32, "earned": true, "redeemed": false },
                    { "rewardEntryHash": 248695599, "earned": false, "redeemed": false }
                ]
            }]
        }))
        .unwrap();

        let state = wire.into_reward_state().unwrap();
        assert_eq!(
            state.period.start,
            Utc.with_ymd_and_hms(2024, 1, 9, 17, 0, 0).unwrap()
        );
        assert_eq!(state.categories.len(), 1);
        assert_eq!(state.categories[0].category_hash, 1064137897);
        assert!(state.categories[0].entries[0].earned);
        assert!(!state.categories[0].entries[1].earned);
    }

    #[test]
    fn test_milestone_definition_names() {
        let wire: MilestoneDefinitionWire = serde_json::from_value(json!({
            "rewards": {
                "1064137897": {
                    "displayProperties": { "name": "Clan Engrams" },
                    "rewardEntries": {
                        "3789021730": { "displayProperties": { "name": "Raid" } }
                    }
                }
            }
        }))
        .unwrap();

        let def = wire.into_definition();
        assert_eq!(def.category_name(1064137897), "Clan Engrams");
        assert_eq!(def.entry_name(1064137897, 3789021730), "Raid");
    }
}
