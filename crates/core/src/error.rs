// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Error types for td-core operations.

use thiserror::Error;

/// All possible errors that can occur in td-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid task status: '{0}'\n  hint: valid statuses are: todo, in_progress, in_review, done")]
    InvalidTaskStatus(String),

    #[error("invalid task priority: '{0}'\n  hint: valid priorities are: low, medium, high, urgent")]
    InvalidTaskPriority(String),

    #[error("invalid channel visibility: '{0}'\n  hint: valid values are: public, private, direct")]
    InvalidVisibility(String),

    #[error("invalid invitation status: '{0}'\n  hint: valid statuses are: pending, accepted, declined, expired")]
    InvalidInvitationStatus(String),

    #[error("invalid bug severity: '{0}'\n  hint: valid severities are: minor, major, critical")]
    InvalidSeverity(String),

    #[error("invalid sprint state: '{0}'\n  hint: valid states are: planned, active, completed")]
    InvalidSprintState(String),

    #[error("invalid notification kind: '{0}'\n  hint: valid kinds are: mention, invitation, task_assigned, task_status, message, generic")]
    InvalidNotificationKind(String),

    #[error("missing required field '{field}' in {entity} payload")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("invalid timestamp '{value}' in field '{field}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for td-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
