// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Workspace cache operations.

use rusqlite::{params, OptionalExtension, Row};
use td_core::Workspace;

use crate::db::{parse_timestamp, Store};
use crate::error::{Error, Result};

fn row_to_workspace(row: &Row<'_>) -> std::result::Result<Workspace, rusqlite::Error> {
    let created_str: String = row.get(6)?;
    Ok(Workspace {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        owner_id: row.get(3)?,
        owner_name: row.get(4)?,
        icon_url: row.get(5)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        member_ids: Vec::new(), // filled in by the caller
    })
}

impl Store {
    /// Upsert a workspace and replace its member rows.
    pub fn put_workspace(&mut self, workspace: &Workspace) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO workspaces
             (id, name, description, owner_id, owner_name, icon_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                workspace.id,
                workspace.name,
                workspace.description,
                workspace.owner_id,
                workspace.owner_name,
                workspace.icon_url,
                workspace.created_at.to_rfc3339(),
            ],
        )?;
        tx.execute(
            "DELETE FROM workspace_members WHERE workspace_id = ?1",
            params![workspace.id],
        )?;
        for user_id in &workspace.member_ids {
            tx.execute(
                "INSERT OR IGNORE INTO workspace_members (workspace_id, user_id) VALUES (?1, ?2)",
                params![workspace.id, user_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Get a workspace by ID, with its member list rehydrated.
    pub fn get_workspace(&self, id: &str) -> Result<Workspace> {
        let workspace = self
            .conn
            .query_row(
                "SELECT id, name, description, owner_id, owner_name, icon_url, created_at
                 FROM workspaces WHERE id = ?1",
                params![id],
                row_to_workspace,
            )
            .optional()?;

        let mut workspace = workspace.ok_or_else(|| Error::WorkspaceNotFound(id.to_string()))?;
        workspace.member_ids = self.workspace_member_ids(id)?;
        Ok(workspace)
    }

    /// List all cached workspaces, sorted by name.
    pub fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, owner_id, owner_name, icon_url, created_at
             FROM workspaces ORDER BY name",
        )?;
        let rows = stmt.query_map([], row_to_workspace)?;

        let mut workspaces = Vec::new();
        for row in rows {
            let mut workspace = row?;
            workspace.member_ids = self.workspace_member_ids(&workspace.id)?;
            workspaces.push(workspace);
        }
        Ok(workspaces)
    }

    /// Replace the entire cached workspace set with a fresh server copy.
    ///
    /// Runs in one transaction; dependents (channels, tasks, ...) of removed
    /// workspaces go away via FK cascades.
    pub fn replace_workspaces(&mut self, workspaces: &[Workspace]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM workspaces", [])?;
        for workspace in workspaces {
            tx.execute(
                "INSERT OR REPLACE INTO workspaces
                 (id, name, description, owner_id, owner_name, icon_url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    workspace.id,
                    workspace.name,
                    workspace.description,
                    workspace.owner_id,
                    workspace.owner_name,
                    workspace.icon_url,
                    workspace.created_at.to_rfc3339(),
                ],
            )?;
            for user_id in &workspace.member_ids {
                tx.execute(
                    "INSERT OR IGNORE INTO workspace_members (workspace_id, user_id)
                     VALUES (?1, ?2)",
                    params![workspace.id, user_id],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete a workspace; channels, tasks, epics, and sprints cascade.
    pub fn delete_workspace(&mut self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM workspaces WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::WorkspaceNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Add a member to a cached workspace.
    pub fn add_workspace_member(&mut self, workspace_id: &str, user_id: &str) -> Result<()> {
        let affected = self.conn.execute(
            "INSERT OR IGNORE INTO workspace_members (workspace_id, user_id)
             SELECT ?1, ?2 WHERE EXISTS (SELECT 1 FROM workspaces WHERE id = ?1)",
            params![workspace_id, user_id],
        )?;
        if affected == 0 && !self.workspace_exists(workspace_id)? {
            return Err(Error::WorkspaceNotFound(workspace_id.to_string()));
        }
        Ok(())
    }

    /// Remove a member from a cached workspace.
    pub fn remove_workspace_member(&mut self, workspace_id: &str, user_id: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM workspace_members WHERE workspace_id = ?1 AND user_id = ?2",
            params![workspace_id, user_id],
        )?;
        Ok(())
    }

    /// Check if a workspace is cached.
    pub fn workspace_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workspaces WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn workspace_member_ids(&self, workspace_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id FROM workspace_members WHERE workspace_id = ?1 ORDER BY user_id",
        )?;
        let rows = stmt.query_map(params![workspace_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "workspaces_tests.rs"]
mod tests;
