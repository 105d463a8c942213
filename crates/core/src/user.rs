// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! User and account types.
//!
//! The `/users` endpoints are served consistently, so these types get by
//! with derived impls and key aliasing; the defensive readers in
//! [`crate::json`] are reserved for the entities that need them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member of one or more workspaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Login handle, unique per deployment.
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Preferred display name; falls back to username in UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Presence flag maintained by the realtime channel.
    #[serde(default)]
    pub online: bool,
}

impl User {
    /// Creates a user with only the required fields set.
    pub fn new(id: String, username: String) -> Self {
        User {
            id,
            username,
            email: None,
            display_name: None,
            avatar_url: None,
            online: false,
        }
    }

    /// The name to show in UIs: display name if set, otherwise username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// An authenticated account, returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The user this account belongs to.
    #[serde(alias = "_id", alias = "user_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// Bearer token for subsequent API calls. Absent in cached copies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
