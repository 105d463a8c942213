// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Epic cache operations.
//!
//! The epic's task list is derived from the tasks table rather than stored,
//! so it cannot drift from the cached tasks.

use rusqlite::{params, OptionalExtension, Row};
use td_core::Epic;

use crate::db::{parse_timestamp, parse_timestamp_opt, Store};
use crate::error::{Error, Result};

fn row_to_epic(row: &Row<'_>) -> std::result::Result<Epic, rusqlite::Error> {
    let start_str: Option<String> = row.get(5)?;
    let end_str: Option<String> = row.get(6)?;
    let created_str: String = row.get(7)?;
    Ok(Epic {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        color: row.get(4)?,
        start_date: parse_timestamp_opt(start_str, "start_date")?,
        end_date: parse_timestamp_opt(end_str, "end_date")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        task_ids: Vec::new(), // filled in by the caller
    })
}

const EPIC_COLS: &str =
    "id, workspace_id, name, description, color, start_date, end_date, created_at";

impl Store {
    /// Upsert an epic.
    pub fn put_epic(&mut self, epic: &Epic) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO epics
             (id, workspace_id, name, description, color, start_date, end_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                epic.id,
                epic.workspace_id,
                epic.name,
                epic.description,
                epic.color,
                epic.start_date.map(|ts| ts.to_rfc3339()),
                epic.end_date.map(|ts| ts.to_rfc3339()),
                epic.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get an epic by ID, with its task list rehydrated from the tasks table.
    pub fn get_epic(&self, id: &str) -> Result<Epic> {
        let epic = self
            .conn
            .query_row(
                &format!("SELECT {EPIC_COLS} FROM epics WHERE id = ?1"),
                params![id],
                row_to_epic,
            )
            .optional()?;

        let mut epic = epic.ok_or_else(|| Error::EpicNotFound(id.to_string()))?;
        epic.task_ids = self.epic_task_ids(id)?;
        Ok(epic)
    }

    /// List cached epics for a workspace, sorted by name.
    pub fn list_epics(&self, workspace_id: &str) -> Result<Vec<Epic>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EPIC_COLS} FROM epics WHERE workspace_id = ?1 ORDER BY name"
        ))?;
        let rows = stmt.query_map(params![workspace_id], row_to_epic)?;

        let mut epics = Vec::new();
        for row in rows {
            let mut epic = row?;
            epic.task_ids = self.epic_task_ids(&epic.id)?;
            epics.push(epic);
        }
        Ok(epics)
    }

    /// Replace the cached epic set for one workspace, atomically.
    pub fn replace_epics(&mut self, workspace_id: &str, epics: &[Epic]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM epics WHERE workspace_id = ?1",
            params![workspace_id],
        )?;
        for epic in epics {
            tx.execute(
                "INSERT OR REPLACE INTO epics
                 (id, workspace_id, name, description, color, start_date, end_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    epic.id,
                    epic.workspace_id,
                    epic.name,
                    epic.description,
                    epic.color,
                    epic.start_date.map(|ts| ts.to_rfc3339()),
                    epic.end_date.map(|ts| ts.to_rfc3339()),
                    epic.created_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete an epic; tasks keep their rows with the link nulled.
    pub fn delete_epic(&mut self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM epics WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::EpicNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Check if an epic is cached.
    pub fn epic_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM epics WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn epic_task_ids(&self, epic_id: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM tasks WHERE epic_id = ?1 ORDER BY created_at")?;
        let rows = stmt.query_map(params![epic_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "epics_tests.rs"]
mod tests;
