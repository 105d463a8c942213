// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Notification cache operations.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use td_core::{Notification, NotificationKind};

use crate::db::{parse_timestamp, parse_timestamp_opt, Store};
use crate::error::{Error, Result};

fn row_to_notification(row: &Row<'_>) -> std::result::Result<Notification, rusqlite::Error> {
    let kind_str: String = row.get(2)?;
    let read_str: Option<String> = row.get(8)?;
    let created_str: String = row.get(9)?;
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        // Lenient on read as well: a kind cached by a newer app version
        // must not make the feed unreadable after a downgrade.
        kind: NotificationKind::from_api(&kind_str),
        body: row.get(3)?,
        actor_id: row.get(4)?,
        actor_name: row.get(5)?,
        subject_id: row.get(6)?,
        workspace_id: row.get(7)?,
        read_at: parse_timestamp_opt(read_str, "read_at")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

const NOTIFICATION_COLS: &str = "id, user_id, kind, body, actor_id, actor_name, subject_id, \
                                 workspace_id, read_at, created_at";

impl Store {
    /// Upsert a notification.
    pub fn put_notification(&mut self, notification: &Notification) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO notifications
             (id, user_id, kind, body, actor_id, actor_name, subject_id, workspace_id,
              read_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                notification.id,
                notification.user_id,
                notification.kind.as_str(),
                notification.body,
                notification.actor_id,
                notification.actor_name,
                notification.subject_id,
                notification.workspace_id,
                notification.read_at.map(|ts| ts.to_rfc3339()),
                notification.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Replace the cached feed for one user, atomically.
    pub fn replace_notifications(
        &mut self,
        user_id: &str,
        notifications: &[Notification],
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM notifications WHERE user_id = ?1",
            params![user_id],
        )?;
        for notification in notifications {
            tx.execute(
                "INSERT OR REPLACE INTO notifications
                 (id, user_id, kind, body, actor_id, actor_name, subject_id, workspace_id,
                  read_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    notification.id,
                    notification.user_id,
                    notification.kind.as_str(),
                    notification.body,
                    notification.actor_id,
                    notification.actor_name,
                    notification.subject_id,
                    notification.workspace_id,
                    notification.read_at.map(|ts| ts.to_rfc3339()),
                    notification.created_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// List a user's cached feed, newest first.
    pub fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTIFICATION_COLS} FROM notifications
             WHERE user_id = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_notification)?;
        let mut notifications = Vec::new();
        for row in rows {
            notifications.push(row?);
        }
        Ok(notifications)
    }

    /// Count of unread notifications for badge rendering.
    pub fn unread_count(&self, user_id: &str) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND read_at IS NULL",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    /// Mark one notification read.
    pub fn mark_notification_read(&mut self, id: &str, at: DateTime<Utc>) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE notifications SET read_at = ?1 WHERE id = ?2",
            params![at.to_rfc3339(), id],
        )?;
        if affected == 0 {
            return Err(Error::NotificationNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Mark a user's whole feed read.
    pub fn mark_all_read(&mut self, user_id: &str, at: DateTime<Utc>) -> Result<usize> {
        Ok(self.conn.execute(
            "UPDATE notifications SET read_at = ?1 WHERE user_id = ?2 AND read_at IS NULL",
            params![at.to_rfc3339(), user_id],
        )?)
    }
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
