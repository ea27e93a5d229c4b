// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fireteam resolution against the clan roster.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{FireteamEntry, Member};
use crate::services::DestinyApi;

/// Clan members of a fireteam who completed the activity.
pub fn clan_participants(entries: Vec<FireteamEntry>, roster: &HashSet<i64>) -> Vec<Member> {
    entries
        .into_iter()
        .filter(|e| e.completed)
        .filter(|e| roster.contains(&e.player.membership_id))
        .map(|e| {
            tracing::debug!(
                member_id = e.player.membership_id,
                member = %e.player.display_name,
                "Clan member was a member of the fireteam"
            );
            e.player
        })
        .collect()
}

/// Fetch an instance's post-game report and resolve its clan participants.
pub async fn resolve_fireteam<A: DestinyApi + ?Sized>(
    api: &A,
    instance_id: i64,
    roster: &HashSet<i64>,
) -> Result<Vec<Member>> {
    tracing::debug!(instance_id, "Fetching fireteam");
    let entries = api.fireteam(instance_id).await?;
    Ok(clan_participants(entries, roster))
}
