// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of weekly reward reports.

use crate::models::{ActivityMode, ClanCompletions, RewardPeriod};
use crate::time_utils::format_utc_rfc3339;

/// Marker for earned reward entries.
const EARNED_MARK: &str = "✓";

/// One reward category evaluated against one weekly window.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekReport {
    pub period: RewardPeriod,
    pub category_name: String,
    /// (earned, display name) per reward entry
    pub entries: Vec<(bool, String)>,
    pub completions: ClanCompletions,
}

/// Render one weekly report, terminated by a blank line.
pub fn render_week(report: &WeekReport) -> String {
    let mut out = String::new();
    out.push_str(&report.category_name);
    out.push('\n');

    for (earned, name) in &report.entries {
        let mark = if *earned { EARNED_MARK } else { " " };
        out.push_str(&format!(" {} {}\n", mark, name));
    }

    for mode in ActivityMode::ALL {
        if let Some(completion) = report.completions.get(mode) {
            out.push_str(&format!(
                "{:<9} completed at {} by {}\n",
                mode.name(),
                format_utc_rfc3339(completion.end),
                completion.fireteam_names()
            ));
        }
    }

    out.push('\n');
    out
}

/// Render all weekly reports in order.
pub fn render_reports(reports: &[WeekReport]) -> String {
    reports.iter().map(render_week).collect()
}
