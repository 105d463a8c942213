// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;

#[test]
fn notification_from_canonical_payload() {
    let v = json!({
        "id": "n_1",
        "user_id": "u_1",
        "kind": "task_assigned",
        "body": "Ada assigned you a task",
        "actor_id": "u_2",
        "subject_id": "t_9",
        "workspace_id": "w_1",
        "created_at": "2024-03-01T09:30:00Z"
    });
    let n: Notification = serde_json::from_value(v).unwrap();
    assert_eq!(n.kind, NotificationKind::TaskAssigned);
    assert_eq!(n.subject_id, Some("t_9".to_string()));
    assert!(n.is_unread());
}

#[test]
fn notification_from_legacy_payload() {
    // "type" instead of "kind", nested actor, "text" instead of "body".
    let v = json!({
        "_id": "n_2",
        "recipient": "u_1",
        "type": "mention",
        "text": "you were mentioned",
        "from": {"_id": "u_3", "display_name": "Lin"},
        "created_at": "2024-03-01 09:30:00"
    });
    let n: Notification = serde_json::from_value(v).unwrap();
    assert_eq!(n.user_id, "u_1");
    assert_eq!(n.kind, NotificationKind::Mention);
    assert_eq!(n.actor_id, Some("u_3".to_string()));
    assert_eq!(n.actor_name, Some("Lin".to_string()));
}

#[test]
fn notification_roundtrip_keeps_actor_name() {
    let v = json!({
        "_id": "n_2",
        "recipient": "u_1",
        "type": "mention",
        "text": "you were mentioned",
        "from": {"_id": "u_3", "display_name": "Lin"},
        "created_at": "2024-03-01 09:30:00"
    });
    let n: Notification = serde_json::from_value(v).unwrap();
    let back: Notification = serde_json::from_str(&serde_json::to_string(&n).unwrap()).unwrap();
    assert_eq!(back.actor_name, Some("Lin".to_string()));
    assert_eq!(back, n);
}

#[test]
fn notification_unknown_kind_is_generic() {
    let v = json!({
        "id": "n_3",
        "user_id": "u_1",
        "kind": "billing_alert",
        "body": "x",
        "created_at": "2024-03-01T09:30:00Z"
    });
    let n: Notification = serde_json::from_value(v).unwrap();
    assert_eq!(n.kind, NotificationKind::Generic);
}

#[test]
fn notification_read_at_marks_read() {
    let v = json!({
        "id": "n_4",
        "user_id": "u_1",
        "kind": "message",
        "body": "x",
        "read_at": "2024-03-02T09:30:00Z",
        "created_at": "2024-03-01T09:30:00Z"
    });
    let n: Notification = serde_json::from_value(v).unwrap();
    assert!(!n.is_unread());
}

#[test]
fn kind_from_api_lenient_from_str_strict() {
    assert_eq!(
        NotificationKind::from_api("billing_alert"),
        NotificationKind::Generic
    );
    assert!("billing_alert".parse::<NotificationKind>().is_err());
}
