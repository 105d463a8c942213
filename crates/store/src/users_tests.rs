// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use chrono::{DateTime, Utc};
use td_core::Workspace;

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn user(id: &str, username: &str) -> User {
    User::new(id.to_string(), username.to_string())
}

#[test]
fn test_put_and_get_user() {
    let mut store = Store::open_in_memory().unwrap();
    let mut u = user("u1", "sam");
    u.email = Some("sam@example.com".to_string());
    u.display_name = Some("Sam".to_string());
    u.online = true;

    store.put_user(&u).unwrap();
    let retrieved = store.get_user("u1").unwrap();

    assert_eq!(retrieved.username, "sam");
    assert_eq!(retrieved.email.as_deref(), Some("sam@example.com"));
    assert!(retrieved.online);
}

#[test]
fn test_user_not_found() {
    let store = Store::open_in_memory().unwrap();
    assert!(matches!(store.get_user("nope"), Err(Error::UserNotFound(_))));
}

#[test]
fn test_list_workspace_users_scoped_to_membership() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_users(&[user("u1", "zoe"), user("u2", "ada"), user("u3", "outsider")])
        .unwrap();

    let mut workspace = Workspace::new(
        "w1".to_string(),
        "Acme".to_string(),
        "u1".to_string(),
        ts("2026-01-01T00:00:00Z"),
    );
    workspace.member_ids.push("u2".to_string());
    store.put_workspace(&workspace).unwrap();

    let usernames: Vec<String> = store
        .list_workspace_users("w1")
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(usernames, vec!["ada", "zoe"]);
}

#[test]
fn test_set_user_online() {
    let mut store = Store::open_in_memory().unwrap();
    store.put_user(&user("u1", "sam")).unwrap();

    store.set_user_online("u1", true).unwrap();
    assert!(store.get_user("u1").unwrap().online);

    store.set_user_online("u1", false).unwrap();
    assert!(!store.get_user("u1").unwrap().online);
}

#[test]
fn test_presence_for_unknown_user_is_ignored() {
    let mut store = Store::open_in_memory().unwrap();
    store.set_user_online("never-seen", true).unwrap();
}
