// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! WebSocket protocol messages for realtime chat.
//!
//! The protocol is simple:
//! - Client subscribes to channels, posts messages, and signals typing
//! - Server pushes message/presence events and acknowledges posts

use serde::{Deserialize, Serialize};

use crate::chat::Message;

/// Events sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Start receiving events for a channel.
    Subscribe { channel_id: String },

    /// Stop receiving events for a channel.
    Unsubscribe { channel_id: String },

    /// Post a message to a channel.
    ///
    /// `client_ref` is echoed back in the [`ServerEvent::Ack`] so the
    /// client can replace its optimistic copy with the server one.
    Post {
        channel_id: String,
        client_ref: String,
        body: String,
    },

    /// Signal that the user is typing in a channel.
    Typing { channel_id: String },

    /// Mark everything up to `message_id` as read.
    MarkRead {
        channel_id: String,
        message_id: String,
    },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Events pushed from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A new message in a subscribed channel.
    MessageNew { message: Message },

    /// A message in a subscribed channel was edited.
    MessageEdited { message: Message },

    /// A message in a subscribed channel was deleted.
    MessageDeleted {
        channel_id: String,
        message_id: String,
    },

    /// Another user is typing.
    Typing {
        channel_id: String,
        user_id: String,
    },

    /// A user's presence changed.
    PresenceChanged { user_id: String, online: bool },

    /// Acknowledgement of a [`ClientEvent::Post`].
    Ack {
        /// Echoed from the Post event.
        client_ref: String,
        /// Server-assigned ID of the stored message.
        message_id: String,
    },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error message.
    Error {
        /// Human-readable error description.
        message: String,
    },
}

impl ClientEvent {
    /// Creates a Subscribe event.
    pub fn subscribe(channel_id: impl Into<String>) -> Self {
        ClientEvent::Subscribe {
            channel_id: channel_id.into(),
        }
    }

    /// Creates a Post event.
    pub fn post(
        channel_id: impl Into<String>,
        client_ref: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        ClientEvent::Post {
            channel_id: channel_id.into(),
            client_ref: client_ref.into(),
            body: body.into(),
        }
    }

    /// Creates a Typing event.
    pub fn typing(channel_id: impl Into<String>) -> Self {
        ClientEvent::Typing {
            channel_id: channel_id.into(),
        }
    }

    /// Creates a Ping event.
    pub fn ping(id: u64) -> Self {
        ClientEvent::Ping { id }
    }

    /// Serializes the event to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the event from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerEvent {
    /// Creates an Ack event.
    pub fn ack(client_ref: impl Into<String>, message_id: impl Into<String>) -> Self {
        ServerEvent::Ack {
            client_ref: client_ref.into(),
            message_id: message_id.into(),
        }
    }

    /// Creates a Pong event.
    pub fn pong(id: u64) -> Self {
        ServerEvent::Pong { id }
    }

    /// Creates an Error event.
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }

    /// Serializes the event to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the event from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
