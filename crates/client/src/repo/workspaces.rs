// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Workspace repository.

use serde_json::json;
use td_core::{Invitation, User, Workspace};
use td_store::Store;

use crate::error::Result;
use crate::http::Api;
use crate::repo::{decode, ignore_missing};
use crate::state::Fetched;

pub struct WorkspaceRepo<A: Api> {
    api: A,
    store: Store,
}

impl<A: Api> WorkspaceRepo<A> {
    pub fn new(api: A, store: Store) -> Self {
        WorkspaceRepo { api, store }
    }

    /// All workspaces the signed-in user belongs to.
    pub async fn list(&mut self) -> Result<Fetched<Vec<Workspace>>> {
        match self
            .api
            .get_json("/workspaces")
            .await
            .and_then(decode::<Vec<Workspace>>)
        {
            Ok(workspaces) => {
                self.store.replace_workspaces(&workspaces)?;
                Ok(Fetched::remote(workspaces))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(error = %err, "workspace list fetch failed, serving cache");
                let cached = self.store.list_workspaces()?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get(&mut self, id: &str) -> Result<Fetched<Workspace>> {
        let path = format!("/workspaces/{id}");
        match self.api.get_json(&path).await.and_then(decode) {
            Ok(workspace) => {
                self.store.put_workspace(&workspace)?;
                Ok(Fetched::remote(workspace))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(workspace = %id, error = %err, "workspace fetch failed, serving cache");
                match self.store.get_workspace(id) {
                    Ok(workspace) => Ok(Fetched::cached(workspace)),
                    Err(cache_err) if cache_err.is_not_found() => Err(err),
                    Err(cache_err) => Err(cache_err.into()),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Cached member profiles of a workspace.
    pub async fn members(&mut self, id: &str) -> Result<Fetched<Vec<User>>> {
        let path = format!("/workspaces/{id}/members");
        match self.api.get_json(&path).await.and_then(decode::<Vec<User>>) {
            Ok(users) => {
                self.store.put_users(&users)?;
                Ok(Fetched::remote(users))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(workspace = %id, error = %err, "member fetch failed, serving cache");
                let cached = self.store.list_workspace_users(id)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn create(&mut self, name: &str, description: Option<&str>) -> Result<Workspace> {
        let body = json!({ "name": name, "description": description });
        let workspace: Workspace = decode(self.api.post_json("/workspaces", body).await?)?;
        self.store.put_workspace(&workspace)?;
        Ok(workspace)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.api.delete(&format!("/workspaces/{id}")).await?;
        ignore_missing(self.store.delete_workspace(id))
    }

    /// Invite someone by email; the pending invitation is cached.
    pub async fn invite(&mut self, workspace_id: &str, email: &str) -> Result<Invitation> {
        let body = json!({ "email": email });
        let invitation: Invitation = decode(
            self.api
                .post_json(&format!("/workspaces/{workspace_id}/invitations"), body)
                .await?,
        )?;
        self.store.put_invitation(&invitation)?;
        Ok(invitation)
    }

    pub async fn add_member(&mut self, workspace_id: &str, user_id: &str) -> Result<()> {
        let body = json!({ "user_id": user_id });
        self.api
            .post_json(&format!("/workspaces/{workspace_id}/members"), body)
            .await?;
        ignore_missing(self.store.add_workspace_member(workspace_id, user_id))
    }

    pub async fn remove_member(&mut self, workspace_id: &str, user_id: &str) -> Result<()> {
        self.api
            .delete(&format!("/workspaces/{workspace_id}/members/{user_id}"))
            .await?;
        self.store.remove_workspace_member(workspace_id, user_id)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "workspaces_tests.rs"]
mod tests;
