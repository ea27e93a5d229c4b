// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player, clan and roster resolution.

use crate::error::{AppError, Result};
use crate::models::{Clan, Member};
use crate::services::DestinyApi;

/// Find the single player with this display name.
pub async fn find_member<A: DestinyApi + ?Sized>(api: &A, display_name: &str) -> Result<Member> {
    tracing::debug!(user = display_name, "Getting destiny user");
    let mut matches = api.search_players(display_name).await?;
    match matches.len() {
        0 => Err(AppError::NotFound(format!(
            "No destiny user named {:?}",
            display_name
        ))),
        1 => Ok(matches.remove(0)),
        n => Err(AppError::AmbiguousIdentity(format!(
            "Found {} destiny users named {:?}",
            n, display_name
        ))),
    }
}

/// Find the single clan the player belongs to.
pub async fn find_clan<A: DestinyApi + ?Sized>(api: &A, member: &Member) -> Result<Clan> {
    tracing::debug!(user = %member.display_name, "Getting clan for destiny user");
    let mut clans = api.clans_for_member(member).await?;
    match clans.len() {
        0 => Err(AppError::NotFound(format!(
            "No clan for destiny user {:?}",
            member.display_name
        ))),
        1 => Ok(clans.remove(0)),
        n => Err(AppError::AmbiguousIdentity(format!(
            "Found {} clans for destiny user {:?}",
            n, member.display_name
        ))),
    }
}

/// Fetch every page of a clan's roster, sorted by membership ID.
pub async fn fetch_roster<A: DestinyApi + ?Sized>(api: &A, group_id: i64) -> Result<Vec<Member>> {
    let mut members = Vec::new();
    let mut page = 1;

    loop {
        tracing::debug!(group_id, page, "Getting clan members");
        let batch = api.clan_members_page(group_id, page).await?;
        members.extend(batch.results);
        if !batch.has_more {
            break;
        }
        page += 1;
    }

    members.sort_by_key(|m| m.membership_id);
    tracing::info!(group_id, count = members.len(), "Found clan members");
    Ok(members)
}
