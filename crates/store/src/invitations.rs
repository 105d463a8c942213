// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Invitation cache operations.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use td_core::{Invitation, InvitationStatus};

use crate::db::{parse_db, parse_timestamp, parse_timestamp_opt, Store};
use crate::error::{Error, Result};

fn row_to_invitation(row: &Row<'_>) -> std::result::Result<Invitation, rusqlite::Error> {
    let status_str: String = row.get(6)?;
    let created_str: String = row.get(7)?;
    let responded_str: Option<String> = row.get(8)?;
    Ok(Invitation {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        workspace_name: row.get(2)?,
        inviter_id: row.get(3)?,
        inviter_name: row.get(4)?,
        invitee_email: row.get(5)?,
        status: parse_db(&status_str, "status")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        responded_at: parse_timestamp_opt(responded_str, "responded_at")?,
    })
}

const INVITATION_COLS: &str = "id, workspace_id, workspace_name, inviter_id, inviter_name, \
                               invitee_email, status, created_at, responded_at";

impl Store {
    /// Upsert an invitation.
    pub fn put_invitation(&mut self, invitation: &Invitation) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO invitations
             (id, workspace_id, workspace_name, inviter_id, inviter_name, invitee_email,
              status, created_at, responded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                invitation.id,
                invitation.workspace_id,
                invitation.workspace_name,
                invitation.inviter_id,
                invitation.inviter_name,
                invitation.invitee_email,
                invitation.status.as_str(),
                invitation.created_at.to_rfc3339(),
                invitation.responded_at.map(|ts| ts.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Replace the cached invitations addressed to one email, atomically.
    pub fn replace_invitations(&mut self, email: &str, invitations: &[Invitation]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM invitations WHERE invitee_email = ?1",
            params![email],
        )?;
        for invitation in invitations {
            tx.execute(
                "INSERT OR REPLACE INTO invitations
                 (id, workspace_id, workspace_name, inviter_id, inviter_name, invitee_email,
                  status, created_at, responded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    invitation.id,
                    invitation.workspace_id,
                    invitation.workspace_name,
                    invitation.inviter_id,
                    invitation.inviter_name,
                    invitation.invitee_email,
                    invitation.status.as_str(),
                    invitation.created_at.to_rfc3339(),
                    invitation.responded_at.map(|ts| ts.to_rfc3339()),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Get an invitation by ID.
    pub fn get_invitation(&self, id: &str) -> Result<Invitation> {
        self.conn
            .query_row(
                &format!("SELECT {INVITATION_COLS} FROM invitations WHERE id = ?1"),
                params![id],
                row_to_invitation,
            )
            .optional()?
            .ok_or_else(|| Error::InvitationNotFound(id.to_string()))
    }

    /// List cached invitations addressed to an email, newest first.
    pub fn list_invitations(&self, email: &str) -> Result<Vec<Invitation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INVITATION_COLS} FROM invitations
             WHERE invitee_email = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map(params![email], row_to_invitation)?;
        let mut invitations = Vec::new();
        for row in rows {
            invitations.push(row?);
        }
        Ok(invitations)
    }

    /// Record a response to an invitation.
    pub fn update_invitation_status(
        &mut self,
        id: &str,
        status: InvitationStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE invitations SET status = ?1, responded_at = ?2 WHERE id = ?3",
            params![
                status.as_str(),
                responded_at.map(|ts| ts.to_rfc3339()),
                id
            ],
        )?;
        if affected == 0 {
            return Err(Error::InvitationNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "invitations_tests.rs"]
mod tests;
