// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Message cache operations.
//!
//! Messages are cached per channel with a bounded backscroll; the history
//! beyond that lives only on the server.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use td_core::Message;

use crate::db::{parse_timestamp, parse_timestamp_opt, Store};
use crate::error::{Error, Result};

fn row_to_message(row: &Row<'_>) -> std::result::Result<Message, rusqlite::Error> {
    let sent_str: String = row.get(5)?;
    let edited_str: Option<String> = row.get(6)?;
    Ok(Message {
        id: row.get(0)?,
        channel_id: row.get(1)?,
        sender_id: row.get(2)?,
        sender_name: row.get(3)?,
        body: row.get(4)?,
        sent_at: parse_timestamp(&sent_str, "sent_at")?,
        edited_at: parse_timestamp_opt(edited_str, "edited_at")?,
        client_ref: row.get(7)?,
    })
}

const MESSAGE_COLS: &str =
    "id, channel_id, sender_id, sender_name, body, sent_at, edited_at, client_ref";

impl Store {
    /// Upsert a single message and bump its channel's activity timestamp.
    pub fn put_message(&mut self, message: &Message) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO messages
             (id, channel_id, sender_id, sender_name, body, sent_at, edited_at, client_ref)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                message.id,
                message.channel_id,
                message.sender_id,
                message.sender_name,
                message.body,
                message.sent_at.to_rfc3339(),
                message.edited_at.map(|ts| ts.to_rfc3339()),
                message.client_ref,
            ],
        )?;
        self.conn.execute(
            "UPDATE channels SET last_message_at = ?1
             WHERE id = ?2 AND (last_message_at IS NULL OR last_message_at < ?1)",
            params![message.sent_at.to_rfc3339(), message.channel_id],
        )?;
        Ok(())
    }

    /// Upsert a batch of messages in one transaction.
    pub fn put_messages(&mut self, messages: &[Message]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for message in messages {
            tx.execute(
                "INSERT OR REPLACE INTO messages
                 (id, channel_id, sender_id, sender_name, body, sent_at, edited_at, client_ref)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    message.id,
                    message.channel_id,
                    message.sender_id,
                    message.sender_name,
                    message.body,
                    message.sent_at.to_rfc3339(),
                    message.edited_at.map(|ts| ts.to_rfc3339()),
                    message.client_ref,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// The most recent `limit` messages in a channel, oldest first.
    pub fn latest_messages(&self, channel_id: &str, limit: u32) -> Result<Vec<Message>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {MESSAGE_COLS} FROM (
                 SELECT {MESSAGE_COLS} FROM messages
                 WHERE channel_id = ?1 ORDER BY sent_at DESC LIMIT ?2
             ) ORDER BY sent_at"
        ))?;
        let rows = stmt.query_map(params![channel_id, limit], row_to_message)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    /// Messages older than `before`, for paging backscroll. Oldest first.
    pub fn messages_before(
        &self,
        channel_id: &str,
        before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Message>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {MESSAGE_COLS} FROM (
                 SELECT {MESSAGE_COLS} FROM messages
                 WHERE channel_id = ?1 AND sent_at < ?2
                 ORDER BY sent_at DESC LIMIT ?3
             ) ORDER BY sent_at"
        ))?;
        let rows = stmt.query_map(
            params![channel_id, before.to_rfc3339(), limit],
            row_to_message,
        )?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    /// Delete a message from the cache.
    pub fn delete_message(&mut self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM messages WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::MessageNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Trim a channel's backscroll to the newest `keep` messages.
    pub fn prune_messages(&mut self, channel_id: &str, keep: u32) -> Result<usize> {
        let affected = self.conn.execute(
            "DELETE FROM messages WHERE channel_id = ?1 AND id NOT IN (
                 SELECT id FROM messages WHERE channel_id = ?1
                 ORDER BY sent_at DESC LIMIT ?2
             )",
            params![channel_id, keep],
        )?;
        Ok(affected)
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
