// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Invitation repository.

use chrono::Utc;
use serde_json::json;
use td_core::{Invitation, InvitationStatus};
use td_store::Store;

use crate::error::Result;
use crate::http::Api;
use crate::repo::{decode, ignore_missing};
use crate::state::Fetched;

pub struct InvitationRepo<A: Api> {
    api: A,
    store: Store,
}

impl<A: Api> InvitationRepo<A> {
    pub fn new(api: A, store: Store) -> Self {
        InvitationRepo { api, store }
    }

    /// Invitations addressed to an email, newest first.
    pub async fn list(&mut self, email: &str) -> Result<Fetched<Vec<Invitation>>> {
        let path = format!("/invitations?email={email}");
        match self
            .api
            .get_json(&path)
            .await
            .and_then(decode::<Vec<Invitation>>)
        {
            Ok(invitations) => {
                self.store.replace_invitations(email, &invitations)?;
                Ok(Fetched::remote(invitations))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(error = %err, "invitation fetch failed, serving cache");
                let cached = self.store.list_invitations(email)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Accept or decline an invitation.
    pub async fn respond(&mut self, id: &str, status: InvitationStatus) -> Result<()> {
        let body = json!({ "status": status.as_str() });
        self.api
            .post_json(&format!("/invitations/{id}/respond"), body)
            .await?;
        ignore_missing(
            self.store
                .update_invitation_status(id, status, Some(Utc::now())),
        )
    }
}

#[cfg(test)]
#[path = "invitations_tests.rs"]
mod tests;
