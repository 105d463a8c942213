// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Notification feed repository.

use chrono::Utc;
use serde_json::json;
use td_core::Notification;
use td_store::Store;

use crate::error::Result;
use crate::http::Api;
use crate::repo::{decode, ignore_missing};
use crate::state::Fetched;

pub struct NotificationRepo<A: Api> {
    api: A,
    store: Store,
}

impl<A: Api> NotificationRepo<A> {
    pub fn new(api: A, store: Store) -> Self {
        NotificationRepo { api, store }
    }

    /// The signed-in user's feed, newest first.
    pub async fn feed(&mut self, user_id: &str) -> Result<Fetched<Vec<Notification>>> {
        match self
            .api
            .get_json("/notifications")
            .await
            .and_then(decode::<Vec<Notification>>)
        {
            Ok(notifications) => {
                self.store.replace_notifications(user_id, &notifications)?;
                Ok(Fetched::remote(notifications))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(error = %err, "feed fetch failed, serving cache");
                let cached = self.store.list_notifications(user_id)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Unread badge count, from the cache.
    pub fn unread_count(&self, user_id: &str) -> Result<i64> {
        Ok(self.store.unread_count(user_id)?)
    }

    pub async fn mark_read(&mut self, id: &str) -> Result<()> {
        self.api
            .post_json(&format!("/notifications/{id}/read"), json!({}))
            .await?;
        ignore_missing(self.store.mark_notification_read(id, Utc::now()))
    }

    pub async fn mark_all_read(&mut self, user_id: &str) -> Result<()> {
        self.api
            .post_json("/notifications/read_all", json!({}))
            .await?;
        self.store.mark_all_read(user_id, Utc::now())?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
