// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Error types for td-store operations.

use thiserror::Error;

/// All possible errors that can occur in td-store operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("workspace not found in cache: {0}")]
    WorkspaceNotFound(String),

    #[error("channel not found in cache: {0}")]
    ChannelNotFound(String),

    #[error("message not found in cache: {0}")]
    MessageNotFound(String),

    #[error("task not found in cache: {0}")]
    TaskNotFound(String),

    #[error("epic not found in cache: {0}")]
    EpicNotFound(String),

    #[error("sprint not found in cache: {0}")]
    SprintNotFound(String),

    #[error("bug not found in cache: {0}")]
    BugNotFound(String),

    #[error("user not found in cache: {0}")]
    UserNotFound(String),

    #[error("notification not found in cache: {0}")]
    NotificationNotFound(String),

    #[error("invitation not found in cache: {0}")]
    InvitationNotFound(String),

    #[error(transparent)]
    Core(#[from] td_core::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the per-entity not-found variants.
    ///
    /// Callers mirroring server-side deletes into the cache use this to
    /// ignore rows that were never cached in the first place.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::WorkspaceNotFound(_)
                | Error::ChannelNotFound(_)
                | Error::MessageNotFound(_)
                | Error::TaskNotFound(_)
                | Error::EpicNotFound(_)
                | Error::SprintNotFound(_)
                | Error::BugNotFound(_)
                | Error::UserNotFound(_)
                | Error::NotificationNotFound(_)
                | Error::InvitationNotFound(_)
        )
    }
}

/// A specialized Result type for td-store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
