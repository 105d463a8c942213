// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::error::Error;
use td_core::{Bug, Channel, Epic, Message, Sprint, SprintState, Task, Workspace};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn seed_workspace(store: &mut Store, id: &str) {
    let workspace = Workspace::new(
        id.to_string(),
        format!("workspace {id}"),
        "u1".to_string(),
        ts("2026-01-01T00:00:00Z"),
    );
    store.put_workspace(&workspace).unwrap();
}

#[test]
fn test_open_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache.db");

    let mut store = Store::open(&path).unwrap();
    seed_workspace(&mut store, "w1");
    assert!(path.exists());
}

#[test]
fn test_reopen_preserves_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");

    {
        let mut store = Store::open(&path).unwrap();
        seed_workspace(&mut store, "w1");
    }

    let store = Store::open(&path).unwrap();
    let workspace = store.get_workspace("w1").unwrap();
    assert_eq!(workspace.name, "workspace w1");
}

#[test]
fn test_migrations_are_idempotent() {
    let store = Store::open_in_memory().unwrap();
    // Store::open_in_memory already ran them once.
    run_migrations(&store.conn).unwrap();
    run_migrations(&store.conn).unwrap();
}

#[test]
fn test_migration_adds_edited_at_to_old_messages_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE messages (
             id TEXT PRIMARY KEY,
             channel_id TEXT NOT NULL,
             sender_id TEXT NOT NULL,
             sender_name TEXT,
             body TEXT NOT NULL,
             sent_at TEXT NOT NULL,
             client_ref TEXT
         );",
    )
    .unwrap();

    run_migrations(&conn).unwrap();

    conn.execute(
        "INSERT INTO messages (id, channel_id, sender_id, body, sent_at, edited_at)
         VALUES ('m1', 'c1', 'u1', 'hi', '2026-01-01T00:00:00Z', NULL)",
        [],
    )
    .unwrap();
}

#[test]
fn test_migration_adds_sprint_id_to_old_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (
             id TEXT PRIMARY KEY,
             workspace_id TEXT NOT NULL,
             epic_id TEXT,
             title TEXT NOT NULL,
             description TEXT,
             status TEXT NOT NULL DEFAULT 'todo',
             priority TEXT NOT NULL DEFAULT 'medium',
             assignee_id TEXT,
             assignee_name TEXT,
             reporter_id TEXT,
             due_date TEXT,
             labels TEXT NOT NULL DEFAULT '[]',
             comment_count INTEGER NOT NULL DEFAULT 0,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );",
    )
    .unwrap();

    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();

    conn.execute(
        "INSERT INTO tasks (id, workspace_id, sprint_id, title, created_at, updated_at)
         VALUES ('t1', 'w1', NULL, 'task', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
        [],
    )
    .unwrap();
}

#[test]
fn test_deleting_workspace_cascades_to_dependents() {
    let mut store = Store::open_in_memory().unwrap();
    seed_workspace(&mut store, "w1");

    let channel = Channel::new(
        "c1".to_string(),
        "w1".to_string(),
        "general".to_string(),
        ts("2026-01-02T00:00:00Z"),
    );
    store.put_channel(&channel).unwrap();
    store
        .put_message(&Message::new(
            "m1".to_string(),
            "c1".to_string(),
            "u1".to_string(),
            "hello".to_string(),
            ts("2026-01-02T01:00:00Z"),
        ))
        .unwrap();

    let epic = Epic {
        id: "e1".to_string(),
        workspace_id: "w1".to_string(),
        name: "launch".to_string(),
        description: None,
        color: None,
        task_ids: Vec::new(),
        start_date: None,
        end_date: None,
        created_at: ts("2026-01-02T00:00:00Z"),
    };
    store.put_epic(&epic).unwrap();

    let sprint = Sprint {
        id: "s1".to_string(),
        workspace_id: "w1".to_string(),
        name: "sprint 1".to_string(),
        state: SprintState::Active,
        starts_at: None,
        ends_at: None,
        created_at: ts("2026-01-02T00:00:00Z"),
    };
    store.put_sprint(&sprint).unwrap();

    store
        .put_task(&Task::new(
            "t1".to_string(),
            "w1".to_string(),
            "task".to_string(),
            ts("2026-01-02T00:00:00Z"),
        ))
        .unwrap();

    store.delete_workspace("w1").unwrap();

    assert!(matches!(
        store.get_channel("c1"),
        Err(Error::ChannelNotFound(_))
    ));
    assert!(store.latest_messages("c1", 10).unwrap().is_empty());
    assert!(matches!(store.get_epic("e1"), Err(Error::EpicNotFound(_))));
    assert!(matches!(
        store.get_sprint("s1"),
        Err(Error::SprintNotFound(_))
    ));
    assert!(matches!(store.get_task("t1"), Err(Error::TaskNotFound(_))));
}

#[test]
fn test_deleting_task_cascades_to_bugs() {
    let mut store = Store::open_in_memory().unwrap();
    seed_workspace(&mut store, "w1");
    store
        .put_task(&Task::new(
            "t1".to_string(),
            "w1".to_string(),
            "task".to_string(),
            ts("2026-01-02T00:00:00Z"),
        ))
        .unwrap();
    store
        .put_bug(&Bug {
            id: "b1".to_string(),
            task_id: "t1".to_string(),
            title: "crash".to_string(),
            severity: td_core::BugSeverity::Critical,
            steps: None,
            resolved: false,
            created_at: ts("2026-01-03T00:00:00Z"),
        })
        .unwrap();

    store.delete_task("t1").unwrap();

    assert!(matches!(store.get_bug("b1"), Err(Error::BugNotFound(_))));
}

#[test]
fn test_deleting_epic_nulls_task_link() {
    let mut store = Store::open_in_memory().unwrap();
    seed_workspace(&mut store, "w1");
    store
        .put_epic(&Epic {
            id: "e1".to_string(),
            workspace_id: "w1".to_string(),
            name: "launch".to_string(),
            description: None,
            color: None,
            task_ids: Vec::new(),
            start_date: None,
            end_date: None,
            created_at: ts("2026-01-02T00:00:00Z"),
        })
        .unwrap();

    let mut task = Task::new(
        "t1".to_string(),
        "w1".to_string(),
        "task".to_string(),
        ts("2026-01-02T00:00:00Z"),
    );
    task.epic_id = Some("e1".to_string());
    store.put_task(&task).unwrap();
    assert_eq!(
        store.get_task("t1").unwrap().epic_id,
        Some("e1".to_string())
    );

    store.delete_epic("e1").unwrap();

    let task = store.get_task("t1").unwrap();
    assert_eq!(task.epic_id, None);
}

#[test]
fn test_corrupted_row_surfaces_database_error() {
    let mut store = Store::open_in_memory().unwrap();
    seed_workspace(&mut store, "w1");
    store
        .conn
        .execute(
            "INSERT INTO tasks (id, workspace_id, title, status, created_at, updated_at)
             VALUES ('t1', 'w1', 'task', 'bogus', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
            [],
        )
        .unwrap();

    let result = store.get_task("t1");
    assert!(matches!(result, Err(Error::Database(_))));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("invalid value 'bogus'"));
}

#[test]
fn test_corrupted_timestamp_surfaces_database_error() {
    let store = Store::open_in_memory().unwrap();
    store
        .conn
        .execute(
            "INSERT INTO workspaces (id, name, owner_id, created_at)
             VALUES ('w1', 'ws', 'u1', 'not-a-date')",
            [],
        )
        .unwrap();

    assert!(matches!(
        store.get_workspace("w1"),
        Err(Error::Database(_))
    ));
}
