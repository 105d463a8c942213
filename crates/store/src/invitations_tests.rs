// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn invitation(id: &str, email: &str, created_at: &str) -> Invitation {
    Invitation {
        id: id.to_string(),
        workspace_id: "w1".to_string(),
        workspace_name: Some("Acme".to_string()),
        inviter_id: "u1".to_string(),
        inviter_name: Some("Sam".to_string()),
        invitee_email: email.to_string(),
        status: InvitationStatus::Pending,
        created_at: ts(created_at),
        responded_at: None,
    }
}

#[test]
fn test_put_and_get_invitation() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_invitation(&invitation("i1", "zoe@example.com", "2026-01-01T00:00:00Z"))
        .unwrap();

    let retrieved = store.get_invitation("i1").unwrap();
    assert_eq!(retrieved.workspace_name.as_deref(), Some("Acme"));
    assert_eq!(retrieved.status, InvitationStatus::Pending);
    assert!(retrieved.status.is_open());
}

#[test]
fn test_list_invitations_newest_first_per_email() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_invitation(&invitation("i1", "zoe@example.com", "2026-01-01T00:00:00Z"))
        .unwrap();
    store
        .put_invitation(&invitation("i2", "zoe@example.com", "2026-01-02T00:00:00Z"))
        .unwrap();
    store
        .put_invitation(&invitation("i3", "ada@example.com", "2026-01-03T00:00:00Z"))
        .unwrap();

    let ids: Vec<String> = store
        .list_invitations("zoe@example.com")
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec!["i2", "i1"]);
}

#[test]
fn test_update_invitation_status() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_invitation(&invitation("i1", "zoe@example.com", "2026-01-01T00:00:00Z"))
        .unwrap();

    store
        .update_invitation_status(
            "i1",
            InvitationStatus::Accepted,
            Some(ts("2026-01-02T00:00:00Z")),
        )
        .unwrap();

    let retrieved = store.get_invitation("i1").unwrap();
    assert_eq!(retrieved.status, InvitationStatus::Accepted);
    assert_eq!(retrieved.responded_at, Some(ts("2026-01-02T00:00:00Z")));
}

#[test]
fn test_update_invitation_status_not_found() {
    let mut store = Store::open_in_memory().unwrap();
    assert!(matches!(
        store.update_invitation_status("nope", InvitationStatus::Declined, None),
        Err(Error::InvitationNotFound(_))
    ));
}

#[test]
fn test_replace_invitations_scoped_to_email() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .put_invitation(&invitation("i1", "zoe@example.com", "2026-01-01T00:00:00Z"))
        .unwrap();
    store
        .put_invitation(&invitation("i9", "ada@example.com", "2026-01-01T00:00:00Z"))
        .unwrap();

    store
        .replace_invitations(
            "zoe@example.com",
            &[invitation("i2", "zoe@example.com", "2026-01-02T00:00:00Z")],
        )
        .unwrap();

    let ids: Vec<String> = store
        .list_invitations("zoe@example.com")
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec!["i2"]);
    assert_eq!(store.list_invitations("ada@example.com").unwrap().len(), 1);
}
