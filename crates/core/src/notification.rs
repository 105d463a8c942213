// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Notification types.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::json;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone mentioned the user in a message.
    Mention,
    /// A workspace invitation arrived or changed state.
    Invitation,
    /// A task was assigned to the user.
    TaskAssigned,
    /// A task the user follows changed status.
    TaskStatus,
    /// New message in a followed channel.
    Message,
    /// Anything the client does not recognize. Server-side kinds are added
    /// faster than clients update, so this is the wire fallback.
    Generic,
}

impl NotificationKind {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Mention => "mention",
            NotificationKind::Invitation => "invitation",
            NotificationKind::TaskAssigned => "task_assigned",
            NotificationKind::TaskStatus => "task_status",
            NotificationKind::Message => "message",
            NotificationKind::Generic => "generic",
        }
    }

    /// Lenient parse for API payloads: unknown kinds become `Generic`.
    pub fn from_api(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(kind = %s, "unknown notification kind, treating as generic");
            NotificationKind::Generic
        })
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mention" => Ok(NotificationKind::Mention),
            "invitation" | "invite" => Ok(NotificationKind::Invitation),
            "task_assigned" | "task-assigned" => Ok(NotificationKind::TaskAssigned),
            "task_status" | "task-status" => Ok(NotificationKind::TaskStatus),
            "message" => Ok(NotificationKind::Message),
            "generic" => Ok(NotificationKind::Generic),
            _ => Err(Error::InvalidNotificationKind(s.to_string())),
        }
    }
}

/// An item in a user's notification feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    /// The user this notification is for.
    pub user_id: String,
    pub kind: NotificationKind,
    /// Human-readable summary rendered in the feed.
    pub body: String,
    /// User who triggered the notification, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_name: Option<String>,
    /// ID of the task, channel, or invitation this refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// When the user read it; `None` means unread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Returns true if the notification has not been read.
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }

    /// Normalize an API payload into a notification.
    pub fn from_value(v: &Value) -> Result<Self> {
        let actor_keys: &[&str] = &["actor", "actor_id", "from"];
        let kind = json::opt_str(v, &["kind", "type"])
            .map(|raw| NotificationKind::from_api(&raw))
            .unwrap_or(NotificationKind::Generic);
        Ok(Notification {
            id: json::req_str(v, "notification", &["id", "_id"])?,
            user_id: json::req_ref(v, "notification", &["user", "user_id", "recipient"])?,
            kind,
            body: json::req_str(v, "notification", &["body", "text", "message"])?,
            actor_id: json::opt_ref(v, actor_keys),
            actor_name: json::ref_display_name(v, actor_keys, &["actor_name"]),
            subject_id: json::opt_ref(v, &["subject", "subject_id", "target_id"]),
            workspace_id: json::opt_ref(v, &["workspace", "workspace_id"]),
            read_at: json::opt_timestamp(v, &["read_at", "readAt"]),
            created_at: json::req_timestamp(v, "notification", &["created_at", "createdAt"])?,
        })
    }
}

impl<'de> Deserialize<'de> for Notification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Notification::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
