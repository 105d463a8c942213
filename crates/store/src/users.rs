// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! User cache operations.

use rusqlite::{params, OptionalExtension, Row};
use td_core::User;

use crate::db::Store;
use crate::error::{Error, Result};

fn row_to_user(row: &Row<'_>) -> std::result::Result<User, rusqlite::Error> {
    let online: i64 = row.get(5)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        display_name: row.get(3)?,
        avatar_url: row.get(4)?,
        online: online != 0,
    })
}

const USER_COLS: &str = "id, username, email, display_name, avatar_url, online";

impl Store {
    /// Upsert a user.
    pub fn put_user(&mut self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO users
             (id, username, email, display_name, avatar_url, online)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                user.username,
                user.email,
                user.display_name,
                user.avatar_url,
                user.online as i64,
            ],
        )?;
        Ok(())
    }

    /// Upsert a batch of users in one transaction.
    pub fn put_users(&mut self, users: &[User]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for user in users {
            tx.execute(
                "INSERT OR REPLACE INTO users
                 (id, username, email, display_name, avatar_url, online)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.id,
                    user.username,
                    user.email,
                    user.display_name,
                    user.avatar_url,
                    user.online as i64,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: &str) -> Result<User> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
                params![id],
                row_to_user,
            )
            .optional()?
            .ok_or_else(|| Error::UserNotFound(id.to_string()))
    }

    /// List the cached members of a workspace, sorted by username.
    pub fn list_workspace_users(&self, workspace_id: &str) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {USER_COLS} FROM users
             WHERE id IN (SELECT user_id FROM workspace_members WHERE workspace_id = ?1)
             ORDER BY username"
        ))?;
        let rows = stmt.query_map(params![workspace_id], row_to_user)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// Update a user's presence flag, from realtime presence events.
    ///
    /// Unknown users are ignored; presence can arrive before the user row.
    pub fn set_user_online(&mut self, id: &str, online: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET online = ?1 WHERE id = ?2",
            params![online as i64, id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
