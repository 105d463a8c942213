// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::error::Error;
use crate::repo::testing::{network_error, MockApi};
use crate::state::ResourceOrigin;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use td_core::Workspace;

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn repo() -> ChannelRepo<MockApi> {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_workspace(&Workspace::new(
            "w1".to_string(),
            "Acme".to_string(),
            "u1".to_string(),
            ts("2026-01-01T00:00:00Z"),
        ))
        .unwrap();
    ChannelRepo::new(MockApi::new(), store)
}

fn channel_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "workspace_id": "w1",
        "name": name,
        "type": "private",
        "members": ["u1"],
        "created_at": "2026-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn list_writes_through_and_falls_back() {
    let mut repo = repo();
    repo.api.stub(
        "GET /workspaces/w1/channels",
        Ok(json!([channel_json("c1", "general")])),
    );

    let fetched = repo.list("w1").await.unwrap();
    assert_eq!(fetched.origin, ResourceOrigin::Remote);
    assert_eq!(fetched.value[0].visibility, ChannelVisibility::Private);

    repo.api
        .stub("GET /workspaces/w1/channels", Err(network_error()));
    let fetched = repo.list("w1").await.unwrap();
    assert_eq!(fetched.origin, ResourceOrigin::Cache);
    assert_eq!(fetched.value[0].name, "general");
}

#[tokio::test]
async fn get_404_surfaces_even_with_warm_cache() {
    let mut repo = repo();
    repo.api
        .stub("GET /channels/c1", Ok(channel_json("c1", "general")));
    repo.get("c1").await.unwrap();

    repo.api.stub(
        "GET /channels/c1",
        Err(Error::NotFound("/channels/c1".to_string())),
    );
    assert!(matches!(
        repo.get("c1").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn create_caches_the_new_channel() {
    let mut repo = repo();
    repo.api.stub(
        "POST /workspaces/w1/channels",
        Ok(channel_json("c2", "incidents")),
    );

    let channel = repo
        .create("w1", "incidents", ChannelVisibility::Private)
        .await
        .unwrap();
    assert_eq!(channel.id, "c2");
    assert!(repo.store.get_channel("c2").is_ok());
}

#[tokio::test]
async fn delete_removes_cached_channel() {
    let mut repo = repo();
    repo.api
        .stub("GET /channels/c1", Ok(channel_json("c1", "general")));
    repo.get("c1").await.unwrap();

    repo.api.stub("DELETE /channels/c1", Ok(Value::Null));
    repo.delete("c1").await.unwrap();

    assert!(repo.store.get_channel("c1").is_err());
}
