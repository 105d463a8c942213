// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Channel repository.

use serde_json::json;
use td_core::{Channel, ChannelVisibility};
use td_store::Store;

use crate::error::Result;
use crate::http::Api;
use crate::repo::{decode, ignore_missing};
use crate::state::Fetched;

pub struct ChannelRepo<A: Api> {
    api: A,
    store: Store,
}

impl<A: Api> ChannelRepo<A> {
    pub fn new(api: A, store: Store) -> Self {
        ChannelRepo { api, store }
    }

    /// The channel sidebar for a workspace, most recently active first.
    pub async fn list(&mut self, workspace_id: &str) -> Result<Fetched<Vec<Channel>>> {
        let path = format!("/workspaces/{workspace_id}/channels");
        match self
            .api
            .get_json(&path)
            .await
            .and_then(decode::<Vec<Channel>>)
        {
            Ok(channels) => {
                self.store.replace_channels(workspace_id, &channels)?;
                Ok(Fetched::remote(channels))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(workspace = %workspace_id, error = %err, "channel list fetch failed, serving cache");
                let cached = self.store.list_channels(workspace_id)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get(&mut self, id: &str) -> Result<Fetched<Channel>> {
        let path = format!("/channels/{id}");
        match self.api.get_json(&path).await.and_then(decode) {
            Ok(channel) => {
                self.store.put_channel(&channel)?;
                Ok(Fetched::remote(channel))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(channel = %id, error = %err, "channel fetch failed, serving cache");
                match self.store.get_channel(id) {
                    Ok(channel) => Ok(Fetched::cached(channel)),
                    Err(cache_err) if cache_err.is_not_found() => Err(err),
                    Err(cache_err) => Err(cache_err.into()),
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn create(
        &mut self,
        workspace_id: &str,
        name: &str,
        visibility: ChannelVisibility,
    ) -> Result<Channel> {
        let body = json!({ "name": name, "visibility": visibility.as_str() });
        let channel: Channel = decode(
            self.api
                .post_json(&format!("/workspaces/{workspace_id}/channels"), body)
                .await?,
        )?;
        self.store.put_channel(&channel)?;
        Ok(channel)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.api.delete(&format!("/channels/{id}")).await?;
        ignore_missing(self.store.delete_channel(id))
    }
}

#[cfg(test)]
#[path = "channels_tests.rs"]
mod tests;
