// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Bug cache operations.

use rusqlite::{params, OptionalExtension, Row};
use td_core::Bug;

use crate::db::{parse_db, parse_timestamp, Store};
use crate::error::{Error, Result};

fn row_to_bug(row: &Row<'_>) -> std::result::Result<Bug, rusqlite::Error> {
    let severity_str: String = row.get(3)?;
    let resolved: i64 = row.get(5)?;
    let created_str: String = row.get(6)?;
    Ok(Bug {
        id: row.get(0)?,
        task_id: row.get(1)?,
        title: row.get(2)?,
        severity: parse_db(&severity_str, "severity")?,
        steps: row.get(4)?,
        resolved: resolved != 0,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

const BUG_COLS: &str = "id, task_id, title, severity, steps, resolved, created_at";

impl Store {
    /// Upsert a bug.
    pub fn put_bug(&mut self, bug: &Bug) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO bugs
             (id, task_id, title, severity, steps, resolved, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                bug.id,
                bug.task_id,
                bug.title,
                bug.severity.as_str(),
                bug.steps,
                bug.resolved as i64,
                bug.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a bug by ID.
    pub fn get_bug(&self, id: &str) -> Result<Bug> {
        self.conn
            .query_row(
                &format!("SELECT {BUG_COLS} FROM bugs WHERE id = ?1"),
                params![id],
                row_to_bug,
            )
            .optional()?
            .ok_or_else(|| Error::BugNotFound(id.to_string()))
    }

    /// List cached bugs for a task, unresolved first.
    pub fn list_bugs(&self, task_id: &str) -> Result<Vec<Bug>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {BUG_COLS} FROM bugs WHERE task_id = ?1 ORDER BY resolved, created_at"
        ))?;
        let rows = stmt.query_map(params![task_id], row_to_bug)?;
        let mut bugs = Vec::new();
        for row in rows {
            bugs.push(row?);
        }
        Ok(bugs)
    }

    /// Replace the cached bug set for one task, atomically.
    pub fn replace_bugs(&mut self, task_id: &str, bugs: &[Bug]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM bugs WHERE task_id = ?1", params![task_id])?;
        for bug in bugs {
            tx.execute(
                "INSERT OR REPLACE INTO bugs
                 (id, task_id, title, severity, steps, resolved, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    bug.id,
                    bug.task_id,
                    bug.title,
                    bug.severity.as_str(),
                    bug.steps,
                    bug.resolved as i64,
                    bug.created_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Mark a cached bug resolved or unresolved.
    pub fn set_bug_resolved(&mut self, id: &str, resolved: bool) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE bugs SET resolved = ?1 WHERE id = ?2",
            params![resolved as i64, id],
        )?;
        if affected == 0 {
            return Err(Error::BugNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "bugs_tests.rs"]
mod tests;
