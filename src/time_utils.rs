// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and arithmetic.

use chrono::{DateTime, Days, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Step a timestamp back by whole calendar days.
///
/// Uses calendar arithmetic in the timestamp's own zone, so a week is always
/// seven local dates even when a DST transition makes it 167 or 169 hours.
pub fn days_before<Tz: TimeZone>(date: &DateTime<Tz>, days: u64) -> Option<DateTime<Tz>> {
    date.clone().checked_sub_days(Days::new(days))
}
