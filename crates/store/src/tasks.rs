// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Task cache operations.

use rusqlite::{params, OptionalExtension, Row};
use td_core::{Task, TaskStatus};

use crate::db::{parse_db, parse_labels, parse_timestamp, parse_timestamp_opt, Store};
use crate::error::{Error, Result};

fn row_to_task(row: &Row<'_>) -> std::result::Result<Task, rusqlite::Error> {
    let status_str: String = row.get(6)?;
    let priority_str: String = row.get(7)?;
    let due_str: Option<String> = row.get(11)?;
    let labels_str: String = row.get(12)?;
    let created_str: String = row.get(14)?;
    let updated_str: String = row.get(15)?;
    Ok(Task {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        epic_id: row.get(2)?,
        sprint_id: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        status: parse_db(&status_str, "status")?,
        priority: parse_db(&priority_str, "priority")?,
        assignee_id: row.get(8)?,
        assignee_name: row.get(9)?,
        reporter_id: row.get(10)?,
        due_date: parse_timestamp_opt(due_str, "due_date")?,
        labels: parse_labels(&labels_str)?,
        comment_count: row.get(13)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

const TASK_COLS: &str = "id, workspace_id, epic_id, sprint_id, title, description, status, \
                         priority, assignee_id, assignee_name, reporter_id, due_date, labels, \
                         comment_count, created_at, updated_at";

/// Insert or replace one task row.
///
/// Epic/sprint references to rows the cache has never fetched are nulled
/// out instead of failing the insert; the server copy keeps the link and a
/// later epic/sprint refresh restores it.
fn insert_task(conn: &rusqlite::Connection, task: &Task) -> Result<()> {
    let epic_id = match &task.epic_id {
        Some(id) if !row_exists(conn, "epics", id)? => {
            tracing::debug!(task = %task.id, epic = %id, "epic not cached, dropping link");
            None
        }
        other => other.clone(),
    };
    let sprint_id = match &task.sprint_id {
        Some(id) if !row_exists(conn, "sprints", id)? => {
            tracing::debug!(task = %task.id, sprint = %id, "sprint not cached, dropping link");
            None
        }
        other => other.clone(),
    };
    conn.execute(
        "INSERT OR REPLACE INTO tasks
         (id, workspace_id, epic_id, sprint_id, title, description, status, priority,
          assignee_id, assignee_name, reporter_id, due_date, labels, comment_count,
          created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            task.id,
            task.workspace_id,
            epic_id,
            sprint_id,
            task.title,
            task.description,
            task.status.as_str(),
            task.priority.as_str(),
            task.assignee_id,
            task.assignee_name,
            task.reporter_id,
            task.due_date.map(|ts| ts.to_rfc3339()),
            serde_json::to_string(&task.labels).map_err(td_core::Error::from)?,
            task.comment_count,
            task.created_at.to_rfc3339(),
            task.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn row_exists(conn: &rusqlite::Connection, table: &str, id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE id = ?1"),
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

impl Store {
    /// Upsert a task.
    pub fn put_task(&mut self, task: &Task) -> Result<()> {
        insert_task(&self.conn, task)
    }

    /// Get a task by ID.
    pub fn get_task(&self, id: &str) -> Result<Task> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLS} FROM tasks WHERE id = ?1"),
                params![id],
                row_to_task,
            )
            .optional()?
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    /// List cached tasks for a workspace, optionally filtered by status.
    pub fn list_tasks(
        &self,
        workspace_id: &str,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        match status {
            Some(status) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {TASK_COLS} FROM tasks
                     WHERE workspace_id = ?1 AND status = ?2 ORDER BY updated_at DESC"
                ))?;
                let rows = stmt.query_map(params![workspace_id, status.as_str()], row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {TASK_COLS} FROM tasks
                     WHERE workspace_id = ?1 ORDER BY updated_at DESC"
                ))?;
                let rows = stmt.query_map(params![workspace_id], row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
        }
        Ok(tasks)
    }

    /// List cached tasks scheduled in a sprint.
    pub fn list_sprint_tasks(&self, sprint_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLS} FROM tasks WHERE sprint_id = ?1 ORDER BY updated_at DESC"
        ))?;
        let rows = stmt.query_map(params![sprint_id], row_to_task)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    /// Replace the cached task set for one workspace, atomically.
    pub fn replace_tasks(&mut self, workspace_id: &str, tasks: &[Task]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM tasks WHERE workspace_id = ?1",
            params![workspace_id],
        )?;
        for task in tasks {
            insert_task(&tx, task)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Update a cached task's status.
    pub fn update_task_status(&mut self, id: &str, status: TaskStatus) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), chrono::Utc::now().to_rfc3339(), id],
        )?;
        if affected == 0 {
            return Err(Error::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Update a cached task's assignee.
    pub fn update_task_assignee(
        &mut self,
        id: &str,
        assignee_id: Option<&str>,
        assignee_name: Option<&str>,
    ) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE tasks SET assignee_id = ?1, assignee_name = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                assignee_id,
                assignee_name,
                chrono::Utc::now().to_rfc3339(),
                id
            ],
        )?;
        if affected == 0 {
            return Err(Error::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Delete a task; its bugs cascade.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::TaskNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
