// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Channel and message types.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::json;

/// Who can see and join a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelVisibility {
    /// Open to every workspace member.
    Public,
    /// Invite-only.
    Private,
    /// One-to-one conversation.
    Direct,
}

impl ChannelVisibility {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelVisibility::Public => "public",
            ChannelVisibility::Private => "private",
            ChannelVisibility::Direct => "direct",
        }
    }
}

impl fmt::Display for ChannelVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChannelVisibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "public" => Ok(ChannelVisibility::Public),
            "private" => Ok(ChannelVisibility::Private),
            "direct" | "dm" => Ok(ChannelVisibility::Direct),
            _ => Err(Error::InvalidVisibility(s.to_string())),
        }
    }
}

/// A conversation stream inside a workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub visibility: ChannelVisibility,
    /// IDs of channel members. For public channels the API may omit this.
    pub member_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent message, for sidebar ordering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
}

impl Channel {
    /// Creates a public channel with no members recorded yet.
    pub fn new(id: String, workspace_id: String, name: String, created_at: DateTime<Utc>) -> Self {
        Channel {
            id,
            workspace_id,
            name,
            topic: None,
            visibility: ChannelVisibility::Public,
            member_ids: Vec::new(),
            created_at,
            last_message_at: None,
        }
    }

    /// Normalize an API payload into a channel.
    ///
    /// Unknown visibility strings degrade to `Public` with a warning.
    pub fn from_value(v: &Value) -> Result<Self> {
        let visibility = match json::opt_str(v, &["visibility", "type"]) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(visibility = %raw, "unknown channel visibility, treating as public");
                ChannelVisibility::Public
            }),
            None => ChannelVisibility::Public,
        };
        Ok(Channel {
            id: json::req_str(v, "channel", &["id", "_id"])?,
            workspace_id: json::req_ref(v, "channel", &["workspace", "workspace_id"])?,
            name: json::req_str(v, "channel", &["name"])?,
            topic: json::opt_str(v, &["topic", "description"]),
            visibility,
            member_ids: json::id_list(v, &["members", "member_ids"]),
            created_at: json::req_timestamp(v, "channel", &["created_at", "createdAt"])?,
            last_message_at: json::opt_timestamp(v, &["last_message_at", "lastMessageAt"]),
        })
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Channel::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A single chat message.
///
/// Message payloads are served by the newer API surface and arrive in a
/// stable shape; aliasing and defaults cover the remaining variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(alias = "_id")]
    pub id: String,
    pub channel_id: String,
    pub sender_id: String,
    /// Sender display name, denormalized by the API for list rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
    /// Client-generated reference for correlating optimistic sends with
    /// server acknowledgements. Never set on messages from other users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ref: Option<String>,
}

impl Message {
    /// Creates a message as composed locally, before the server assigns IDs.
    pub fn new(
        id: String,
        channel_id: String,
        sender_id: String,
        body: String,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Message {
            id,
            channel_id,
            sender_id,
            sender_name: None,
            body,
            sent_at,
            edited_at: None,
            client_ref: None,
        }
    }
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
