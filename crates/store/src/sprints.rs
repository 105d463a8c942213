// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Sprint cache operations.

use rusqlite::{params, OptionalExtension, Row};
use td_core::{Sprint, SprintState};

use crate::db::{parse_db, parse_timestamp, parse_timestamp_opt, Store};
use crate::error::{Error, Result};

fn row_to_sprint(row: &Row<'_>) -> std::result::Result<Sprint, rusqlite::Error> {
    let state_str: String = row.get(3)?;
    let starts_str: Option<String> = row.get(4)?;
    let ends_str: Option<String> = row.get(5)?;
    let created_str: String = row.get(6)?;
    Ok(Sprint {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        name: row.get(2)?,
        state: parse_db(&state_str, "state")?,
        starts_at: parse_timestamp_opt(starts_str, "starts_at")?,
        ends_at: parse_timestamp_opt(ends_str, "ends_at")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

const SPRINT_COLS: &str = "id, workspace_id, name, state, starts_at, ends_at, created_at";

impl Store {
    /// Upsert a sprint.
    pub fn put_sprint(&mut self, sprint: &Sprint) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sprints
             (id, workspace_id, name, state, starts_at, ends_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                sprint.id,
                sprint.workspace_id,
                sprint.name,
                sprint.state.as_str(),
                sprint.starts_at.map(|ts| ts.to_rfc3339()),
                sprint.ends_at.map(|ts| ts.to_rfc3339()),
                sprint.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a sprint by ID.
    pub fn get_sprint(&self, id: &str) -> Result<Sprint> {
        self.conn
            .query_row(
                &format!("SELECT {SPRINT_COLS} FROM sprints WHERE id = ?1"),
                params![id],
                row_to_sprint,
            )
            .optional()?
            .ok_or_else(|| Error::SprintNotFound(id.to_string()))
    }

    /// List cached sprints for a workspace, newest first.
    pub fn list_sprints(&self, workspace_id: &str) -> Result<Vec<Sprint>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SPRINT_COLS} FROM sprints WHERE workspace_id = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map(params![workspace_id], row_to_sprint)?;
        let mut sprints = Vec::new();
        for row in rows {
            sprints.push(row?);
        }
        Ok(sprints)
    }

    /// The active sprint for a workspace, if any.
    pub fn active_sprint(&self, workspace_id: &str) -> Result<Option<Sprint>> {
        Ok(self
            .conn
            .query_row(
                &format!(
                    "SELECT {SPRINT_COLS} FROM sprints
                     WHERE workspace_id = ?1 AND state = ?2
                     ORDER BY created_at DESC LIMIT 1"
                ),
                params![workspace_id, SprintState::Active.as_str()],
                row_to_sprint,
            )
            .optional()?)
    }

    /// Replace the cached sprint set for one workspace, atomically.
    pub fn replace_sprints(&mut self, workspace_id: &str, sprints: &[Sprint]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM sprints WHERE workspace_id = ?1",
            params![workspace_id],
        )?;
        for sprint in sprints {
            tx.execute(
                "INSERT OR REPLACE INTO sprints
                 (id, workspace_id, name, state, starts_at, ends_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    sprint.id,
                    sprint.workspace_id,
                    sprint.name,
                    sprint.state.as_str(),
                    sprint.starts_at.map(|ts| ts.to_rfc3339()),
                    sprint.ends_at.map(|ts| ts.to_rfc3339()),
                    sprint.created_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete a sprint; tasks keep their rows with the link nulled.
    pub fn delete_sprint(&mut self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM sprints WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::SprintNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Check if a sprint is cached.
    pub fn sprint_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sprints WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
#[path = "sprints_tests.rs"]
mod tests;
