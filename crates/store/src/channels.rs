// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Channel cache operations.

use rusqlite::{params, OptionalExtension, Row};
use td_core::Channel;

use crate::db::{parse_db, parse_timestamp, parse_timestamp_opt, Store};
use crate::error::{Error, Result};

fn row_to_channel(row: &Row<'_>) -> std::result::Result<Channel, rusqlite::Error> {
    let visibility_str: String = row.get(4)?;
    let created_str: String = row.get(5)?;
    let last_message_str: Option<String> = row.get(6)?;
    Ok(Channel {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        name: row.get(2)?,
        topic: row.get(3)?,
        visibility: parse_db(&visibility_str, "visibility")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        last_message_at: parse_timestamp_opt(last_message_str, "last_message_at")?,
        member_ids: Vec::new(), // filled in by the caller
    })
}

const CHANNEL_COLS: &str =
    "id, workspace_id, name, topic, visibility, created_at, last_message_at";

impl Store {
    /// Upsert a channel and replace its member rows.
    pub fn put_channel(&mut self, channel: &Channel) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO channels
             (id, workspace_id, name, topic, visibility, created_at, last_message_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                channel.id,
                channel.workspace_id,
                channel.name,
                channel.topic,
                channel.visibility.as_str(),
                channel.created_at.to_rfc3339(),
                channel.last_message_at.map(|ts| ts.to_rfc3339()),
            ],
        )?;
        tx.execute(
            "DELETE FROM channel_members WHERE channel_id = ?1",
            params![channel.id],
        )?;
        for user_id in &channel.member_ids {
            tx.execute(
                "INSERT OR IGNORE INTO channel_members (channel_id, user_id) VALUES (?1, ?2)",
                params![channel.id, user_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Get a channel by ID, with its member list rehydrated.
    pub fn get_channel(&self, id: &str) -> Result<Channel> {
        let channel = self
            .conn
            .query_row(
                &format!("SELECT {CHANNEL_COLS} FROM channels WHERE id = ?1"),
                params![id],
                row_to_channel,
            )
            .optional()?;

        let mut channel = channel.ok_or_else(|| Error::ChannelNotFound(id.to_string()))?;
        channel.member_ids = self.channel_member_ids(id)?;
        Ok(channel)
    }

    /// List cached channels for a workspace, most recently active first.
    pub fn list_channels(&self, workspace_id: &str) -> Result<Vec<Channel>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CHANNEL_COLS} FROM channels WHERE workspace_id = ?1
             ORDER BY last_message_at DESC NULLS LAST, name"
        ))?;
        let rows = stmt.query_map(params![workspace_id], row_to_channel)?;

        let mut channels = Vec::new();
        for row in rows {
            let mut channel = row?;
            channel.member_ids = self.channel_member_ids(&channel.id)?;
            channels.push(channel);
        }
        Ok(channels)
    }

    /// Replace the cached channel set for one workspace.
    pub fn replace_channels(&mut self, workspace_id: &str, channels: &[Channel]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM channels WHERE workspace_id = ?1",
            params![workspace_id],
        )?;
        for channel in channels {
            tx.execute(
                "INSERT OR REPLACE INTO channels
                 (id, workspace_id, name, topic, visibility, created_at, last_message_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    channel.id,
                    channel.workspace_id,
                    channel.name,
                    channel.topic,
                    channel.visibility.as_str(),
                    channel.created_at.to_rfc3339(),
                    channel.last_message_at.map(|ts| ts.to_rfc3339()),
                ],
            )?;
            for user_id in &channel.member_ids {
                tx.execute(
                    "INSERT OR IGNORE INTO channel_members (channel_id, user_id) VALUES (?1, ?2)",
                    params![channel.id, user_id],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete a channel; its messages cascade.
    pub fn delete_channel(&mut self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM channels WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::ChannelNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Record the latest-activity timestamp for sidebar ordering.
    pub fn touch_channel(&mut self, id: &str, at: chrono::DateTime<chrono::Utc>) -> Result<()> {
        self.conn.execute(
            "UPDATE channels SET last_message_at = ?1 WHERE id = ?2",
            params![at.to_rfc3339(), id],
        )?;
        Ok(())
    }

    fn channel_member_ids(&self, channel_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id FROM channel_members WHERE channel_id = ?1 ORDER BY user_id",
        )?;
        let rows = stmt.query_map(params![channel_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "channels_tests.rs"]
mod tests;
