// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity history windowing.
//!
//! The history feed is newest first. A page that contributes nothing to the
//! window, or a short page, ends the walk.

use crate::error::Result;
use crate::models::{ActivityInstance, ActivityMode, Character, Member, RewardPeriod};
use crate::services::DestinyApi;

/// Fixed page size of the activity history endpoint.
pub const ACTIVITY_PAGE_SIZE: u32 = 100;

/// Whether an activity ran entirely inside the window (both ends inclusive).
///
/// An activity without a computable end is never inside.
pub fn in_window(activity: &ActivityInstance, window: &RewardPeriod) -> bool {
    activity
        .end()
        .is_some_and(|end| window.contains_span(activity.period, end))
}

/// Keep only the activities of one page that ran entirely inside the window.
pub fn filter_page(
    page: impl IntoIterator<Item = ActivityInstance>,
    window: &RewardPeriod,
) -> Vec<ActivityInstance> {
    page.into_iter().filter(|a| in_window(a, window)).collect()
}

/// Collect a character's activities of one mode that fall inside the window.
pub async fn collect_window_activities<A: DestinyApi + ?Sized>(
    api: &A,
    member: &Member,
    character: &Character,
    mode: ActivityMode,
    window: &RewardPeriod,
) -> Result<Vec<ActivityInstance>> {
    let mut activities = Vec::new();
    let mut page = 0;

    loop {
        tracing::debug!(
            %mode,
            character_id = character.character_id,
            member_id = member.membership_id,
            member = %member.display_name,
            page,
            "Fetching activities"
        );

        let records = api
            .activity_page(member, character, mode, page, ACTIVITY_PAGE_SIZE)
            .await?;
        let fetched = records.len();

        let retained = filter_page(records, window);
        if retained.is_empty() {
            break;
        }
        activities.extend(retained);

        if fetched < ACTIVITY_PAGE_SIZE as usize {
            break;
        }
        page += 1;
    }

    Ok(activities)
}
