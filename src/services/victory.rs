// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Victory classification of activity history records.

use crate::error::{AppError, Result};
use crate::models::ActivityInstance;

/// Win code shared by every victory signal.
const WIN_CODE: f64 = 0.0;

/// Decide whether an activity counts as a win.
///
/// Incomplete activities are never wins. Otherwise the mode's victory
/// signals are consulted in precedence order and the first one present
/// decides. An activity carrying none of them is an error.
pub fn is_victory(activity: &ActivityInstance) -> Result<bool> {
    if !activity.completed() {
        return Ok(false);
    }

    activity
        .mode
        .victory_signals()
        .iter()
        .find_map(|signal| activity.stat(signal.stat_key()))
        .map(|value| value == WIN_CODE)
        .ok_or(AppError::UnclassifiableActivity {
            instance_id: activity.instance_id,
        })
}
