// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every error aborts the run; there is no partial report.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous identity: {0}")]
    AmbiguousIdentity(String),

    #[error("Bungie API error: {0}")]
    BungieApi(String),

    #[error("Unknown victory state for activity {instance_id}")]
    UnclassifiableActivity { instance_id: i64 },
}

impl AppError {
    /// Platform error status returned when the API key is rejected.
    pub const BUNGIE_API_KEY_ERROR: &'static str = "ApiKeyMissingFromRequest";

    /// True for errors that mean the activity did not carry any recognized victory signal.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, AppError::UnclassifiableActivity { .. })
    }

    /// Check if this is an upstream error caused by a missing or bad API key.
    pub fn is_api_key_error(&self) -> bool {
        match self {
            AppError::BungieApi(msg) => {
                msg.contains(Self::BUNGIE_API_KEY_ERROR)
                    || msg.contains("ApiInvalidOrExpiredKey")
                    || msg.contains("HTTP 401")
            }
            _ => false,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
