// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Workspace, invitation, and report types.
//!
//! `Workspace` and `Invitation` payloads are among the API's least
//! consistent shapes (string-or-object owner, `id`/`_id` aliasing, member
//! arrays mixing forms), so both carry hand-written `Deserialize` impls
//! built on [`crate::json`].

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::json;

/// A top-level container for channels, tasks, and members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workspace {
    /// Unique identifier.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ID of the owning user.
    pub owner_id: String,
    /// Owner display name, when the API sent the nested-object form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// IDs of all members, owner included.
    pub member_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a workspace owned by `owner_id`, with the owner as sole member.
    pub fn new(id: String, name: String, owner_id: String, created_at: DateTime<Utc>) -> Self {
        Workspace {
            id,
            name,
            description: None,
            owner_id: owner_id.clone(),
            owner_name: None,
            member_ids: vec![owner_id],
            icon_url: None,
            created_at,
        }
    }

    /// Normalize an API payload into a workspace.
    pub fn from_value(v: &Value) -> Result<Self> {
        let owner_keys: &[&str] = &["owner", "owner_id", "created_by"];
        Ok(Workspace {
            id: json::req_str(v, "workspace", &["id", "_id"])?,
            name: json::req_str(v, "workspace", &["name"])?,
            description: json::opt_str(v, &["description", "desc"]),
            owner_id: json::req_ref(v, "workspace", &["owner", "owner_id", "created_by"])?,
            owner_name: json::ref_display_name(v, owner_keys, &["owner_name"]),
            member_ids: json::id_list(v, &["members", "member_ids"]),
            icon_url: json::opt_str(v, &["icon_url", "icon"]),
            created_at: json::req_timestamp(v, "workspace", &["created_at", "createdAt"])?,
        })
    }
}

impl<'de> Deserialize<'de> for Workspace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Workspace::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Lifecycle of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Sent, awaiting a response. Initial state.
    Pending,
    Accepted,
    Declined,
    /// Lapsed without a response.
    Expired,
}

impl InvitationStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Expired => "expired",
        }
    }

    /// Returns true if the invitation can still be responded to.
    pub fn is_open(&self) -> bool {
        matches!(self, InvitationStatus::Pending)
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "declined" => Ok(InvitationStatus::Declined),
            "expired" => Ok(InvitationStatus::Expired),
            _ => Err(Error::InvalidInvitationStatus(s.to_string())),
        }
    }
}

/// An invitation for a user to join a workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invitation {
    pub id: String,
    pub workspace_id: String,
    /// Workspace name, when the API sent the nested-object form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    /// User who sent the invitation.
    pub inviter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inviter_name: Option<String>,
    /// Email the invitation was sent to.
    pub invitee_email: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    /// When the invitee accepted or declined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// Normalize an API payload into an invitation.
    ///
    /// Unknown status strings degrade to `Pending` with a warning; the API
    /// has been seen returning freshly introduced statuses to old clients.
    pub fn from_value(v: &Value) -> Result<Self> {
        let ws_keys: &[&str] = &["workspace", "workspace_id"];
        let inviter_keys: &[&str] = &["inviter", "inviter_id", "invited_by"];
        let status = match json::opt_str(v, &["status"]) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(status = %raw, "unknown invitation status, treating as pending");
                InvitationStatus::Pending
            }),
            None => InvitationStatus::Pending,
        };
        Ok(Invitation {
            id: json::req_str(v, "invitation", &["id", "_id"])?,
            workspace_id: json::req_ref(v, "invitation", &["workspace", "workspace_id"])?,
            workspace_name: json::ref_display_name(v, ws_keys, &["workspace_name"]),
            inviter_id: json::req_ref(v, "invitation", &["inviter", "inviter_id", "invited_by"])?,
            inviter_name: json::ref_display_name(v, inviter_keys, &["inviter_name"]),
            invitee_email: json::req_str(v, "invitation", &["invitee_email", "email", "to"])?,
            status,
            created_at: json::req_timestamp(v, "invitation", &["created_at", "createdAt"])?,
            responded_at: json::opt_timestamp(v, &["responded_at", "respondedAt"]),
        })
    }
}

impl<'de> Deserialize<'de> for Invitation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Invitation::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A periodic activity summary for a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(alias = "_id")]
    pub id: String,
    pub workspace_id: String,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    #[serde(default)]
    pub tasks_completed: i64,
    #[serde(default)]
    pub tasks_open: i64,
    #[serde(default)]
    pub bugs_open: i64,
    #[serde(default)]
    pub messages_sent: i64,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
