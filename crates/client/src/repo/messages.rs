// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Message repository.
//!
//! REST covers history and sending when the socket is down; live traffic
//! arrives through td-realtime and lands in the same cache.

use chrono::{DateTime, Utc};
use serde_json::json;
use td_core::Message;
use td_store::Store;

use crate::error::Result;
use crate::http::Api;
use crate::repo::{decode, ignore_missing};
use crate::state::Fetched;

pub struct MessageRepo<A: Api> {
    api: A,
    store: Store,
}

impl<A: Api> MessageRepo<A> {
    pub fn new(api: A, store: Store) -> Self {
        MessageRepo { api, store }
    }

    /// The latest page of a channel's history, oldest first.
    pub async fn history(&mut self, channel_id: &str, limit: u32) -> Result<Fetched<Vec<Message>>> {
        let path = format!("/channels/{channel_id}/messages?limit={limit}");
        match self.api.get_json(&path).await.and_then(decode::<Vec<Message>>) {
            Ok(messages) => {
                self.store.put_messages(&messages)?;
                Ok(Fetched::remote(messages))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(channel = %channel_id, error = %err, "history fetch failed, serving cache");
                let cached = self.store.latest_messages(channel_id, limit)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Page further back from `before`, oldest first.
    pub async fn before(
        &mut self,
        channel_id: &str,
        before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Fetched<Vec<Message>>> {
        let path = format!(
            "/channels/{channel_id}/messages?limit={limit}&before={}",
            before.to_rfc3339()
        );
        match self.api.get_json(&path).await.and_then(decode::<Vec<Message>>) {
            Ok(messages) => {
                self.store.put_messages(&messages)?;
                Ok(Fetched::remote(messages))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(channel = %channel_id, error = %err, "backscroll fetch failed, serving cache");
                let cached = self.store.messages_before(channel_id, before, limit)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Send over REST; used when the realtime socket is unavailable.
    pub async fn send(
        &mut self,
        channel_id: &str,
        body: &str,
        client_ref: Option<&str>,
    ) -> Result<Message> {
        let payload = json!({ "body": body, "client_ref": client_ref });
        let message: Message = decode(
            self.api
                .post_json(&format!("/channels/{channel_id}/messages"), payload)
                .await?,
        )?;
        self.store.put_message(&message)?;
        Ok(message)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.api.delete(&format!("/messages/{id}")).await?;
        ignore_missing(self.store.delete_message(id))
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
