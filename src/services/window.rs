// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly reward windows, walked backwards from the current period.

use crate::models::RewardPeriod;
use crate::time_utils::days_before;

/// Calendar days between consecutive reward periods.
pub const DAYS_PER_WEEK: u64 = 7;

/// Iterator over `count` reward windows, starting with the given period and
/// stepping back one calendar week each time.
#[derive(Debug)]
pub struct WeeklyWindows {
    next: Option<RewardPeriod>,
    remaining: usize,
}

impl WeeklyWindows {
    pub fn new(current: RewardPeriod, count: usize) -> Self {
        Self {
            next: Some(current),
            remaining: count,
        }
    }
}

/// The reward period one calendar week before `period`.
pub fn previous_week(period: &RewardPeriod) -> Option<RewardPeriod> {
    Some(RewardPeriod {
        start: days_before(&period.start, DAYS_PER_WEEK)?,
        end: days_before(&period.end, DAYS_PER_WEEK)?,
    })
}

impl Iterator for WeeklyWindows {
    type Item = RewardPeriod;

    fn next(&mut self) -> Option<RewardPeriod> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next.take()?;
        self.remaining -= 1;
        self.next = previous_week(&current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
