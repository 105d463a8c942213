// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use yare::parameterized;

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn notification(id: &str, created_at: &str) -> Notification {
    Notification {
        id: id.to_string(),
        user_id: "u1".to_string(),
        kind: NotificationKind::Mention,
        body: format!("notification {id}"),
        actor_id: Some("u2".to_string()),
        actor_name: Some("Sam".to_string()),
        subject_id: Some("c1".to_string()),
        workspace_id: Some("w1".to_string()),
        read_at: None,
        created_at: ts(created_at),
    }
}

#[test]
fn test_put_and_list_newest_first() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_notification(&notification("n1", "2026-01-01T00:00:00Z"))
        .unwrap();
    store
        .put_notification(&notification("n2", "2026-01-02T00:00:00Z"))
        .unwrap();

    let ids: Vec<String> = store
        .list_notifications("u1")
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec!["n2", "n1"]);
}

#[parameterized(
    mention = { "mention", NotificationKind::Mention },
    task_assigned = { "task_assigned", NotificationKind::TaskAssigned },
    unknown = { "quantum_ping", NotificationKind::Generic },
)]
fn kind_read_back_leniently(stored: &str, expected: NotificationKind) {
    let store = Store::open_in_memory().unwrap();
    store
        .conn
        .execute(
            "INSERT INTO notifications (id, user_id, kind, body, created_at)
             VALUES ('n1', 'u1', ?1, 'hi', '2026-01-01T00:00:00Z')",
            [stored],
        )
        .unwrap();

    let feed = store.list_notifications("u1").unwrap();
    assert_eq!(feed[0].kind, expected);
}

#[test]
fn test_unread_count_and_mark_read() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_notification(&notification("n1", "2026-01-01T00:00:00Z"))
        .unwrap();
    store
        .put_notification(&notification("n2", "2026-01-02T00:00:00Z"))
        .unwrap();
    assert_eq!(store.unread_count("u1").unwrap(), 2);

    store
        .mark_notification_read("n1", ts("2026-01-03T00:00:00Z"))
        .unwrap();
    assert_eq!(store.unread_count("u1").unwrap(), 1);

    let feed = store.list_notifications("u1").unwrap();
    let n1 = feed.iter().find(|n| n.id == "n1").unwrap();
    assert!(!n1.is_unread());
}

#[test]
fn test_mark_read_not_found() {
    let mut store = Store::open_in_memory().unwrap();
    assert!(matches!(
        store.mark_notification_read("nope", ts("2026-01-03T00:00:00Z")),
        Err(Error::NotificationNotFound(_))
    ));
}

#[test]
fn test_mark_all_read_returns_count() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_notification(&notification("n1", "2026-01-01T00:00:00Z"))
        .unwrap();
    store
        .put_notification(&notification("n2", "2026-01-02T00:00:00Z"))
        .unwrap();

    let marked = store.mark_all_read("u1", ts("2026-01-03T00:00:00Z")).unwrap();
    assert_eq!(marked, 2);
    assert_eq!(store.unread_count("u1").unwrap(), 0);

    // Second pass is a no-op.
    let marked = store.mark_all_read("u1", ts("2026-01-04T00:00:00Z")).unwrap();
    assert_eq!(marked, 0);
}

#[test]
fn test_replace_notifications_scoped_to_user() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_notification(&notification("n1", "2026-01-01T00:00:00Z"))
        .unwrap();
    let mut other = notification("n9", "2026-01-01T00:00:00Z");
    other.user_id = "u2".to_string();
    store.put_notification(&other).unwrap();

    store
        .replace_notifications("u1", &[notification("n2", "2026-01-02T00:00:00Z")])
        .unwrap();

    let ids: Vec<String> = store
        .list_notifications("u1")
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec!["n2"]);
    assert_eq!(store.list_notifications("u2").unwrap().len(), 1);
}
