// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::repo::testing::{network_error, MockApi};
use crate::state::ResourceOrigin;
use serde_json::{json, Value};
use td_core::{Channel, Workspace};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn repo() -> MessageRepo<MockApi> {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_workspace(&Workspace::new(
            "w1".to_string(),
            "Acme".to_string(),
            "u1".to_string(),
            ts("2026-01-01T00:00:00Z"),
        ))
        .unwrap();
    store
        .put_channel(&Channel::new(
            "c1".to_string(),
            "w1".to_string(),
            "general".to_string(),
            ts("2026-01-01T00:00:00Z"),
        ))
        .unwrap();
    MessageRepo::new(MockApi::new(), store)
}

fn message_json(id: &str, sent_at: &str) -> Value {
    json!({
        "_id": id,
        "channel_id": "c1",
        "sender_id": "u1",
        "body": format!("body of {id}"),
        "sent_at": sent_at
    })
}

#[tokio::test]
async fn history_writes_through_and_falls_back() {
    let mut repo = repo();
    repo.api.stub(
        "GET /channels/c1/messages?limit=50",
        Ok(json!([
            message_json("m1", "2026-01-01T10:00:00Z"),
            message_json("m2", "2026-01-01T11:00:00Z")
        ])),
    );

    let fetched = repo.history("c1", 50).await.unwrap();
    assert_eq!(fetched.origin, ResourceOrigin::Remote);
    assert_eq!(fetched.value.len(), 2);

    repo.api
        .stub("GET /channels/c1/messages?limit=50", Err(network_error()));
    let fetched = repo.history("c1", 50).await.unwrap();
    assert_eq!(fetched.origin, ResourceOrigin::Cache);
    let ids: Vec<&str> = fetched.value.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2"]);
}

#[tokio::test]
async fn history_cold_cache_surfaces_error() {
    let mut repo = repo();
    repo.api
        .stub("GET /channels/c1/messages?limit=50", Err(network_error()));

    assert!(repo.history("c1", 50).await.is_err());
}

#[tokio::test]
async fn before_pages_from_cache_when_offline() {
    let mut repo = repo();
    repo.api.stub(
        "GET /channels/c1/messages?limit=50",
        Ok(json!([
            message_json("m1", "2026-01-01T10:00:00Z"),
            message_json("m2", "2026-01-01T11:00:00Z")
        ])),
    );
    repo.history("c1", 50).await.unwrap();

    let before = ts("2026-01-01T11:00:00Z");
    repo.api.stub(
        &format!(
            "GET /channels/c1/messages?limit=10&before={}",
            before.to_rfc3339()
        ),
        Err(network_error()),
    );
    let fetched = repo.before("c1", before, 10).await.unwrap();
    assert_eq!(fetched.origin, ResourceOrigin::Cache);
    assert_eq!(fetched.value[0].id, "m1");
}

#[tokio::test]
async fn send_caches_and_bumps_channel_activity() {
    let mut repo = repo();
    repo.api.stub(
        "POST /channels/c1/messages",
        Ok(json!({
            "id": "m9",
            "channel_id": "c1",
            "sender_id": "u1",
            "body": "shipping now",
            "sent_at": "2026-01-02T09:00:00Z",
            "client_ref": "ref-1"
        })),
    );

    let message = repo.send("c1", "shipping now", Some("ref-1")).await.unwrap();
    assert_eq!(message.client_ref.as_deref(), Some("ref-1"));

    let channel = repo.store.get_channel("c1").unwrap();
    assert_eq!(channel.last_message_at, Some(ts("2026-01-02T09:00:00Z")));
}

#[tokio::test]
async fn delete_tolerates_uncached_message() {
    let mut repo = repo();
    repo.api.stub("DELETE /messages/m1", Ok(Value::Null));
    repo.delete("m1").await.unwrap();
}
