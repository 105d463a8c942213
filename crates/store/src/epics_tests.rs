// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use chrono::{DateTime, Utc};
use td_core::{Task, Workspace};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn store_with_workspace() -> Store {
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
}

fn epic(id: &str, name: &str) -> Epic {
    Epic {
        id: id.to_string(),
        workspace_id: "w1".to_string(),
        name: name.to_string(),
        description: None,
        color: Some("#ff8800".to_string()),
        task_ids: Vec::new(),
        start_date: None,
        end_date: Some(ts("2026-06-01T00:00:00Z")),
        created_at: ts("2026-01-01T00:00:00Z"),
    }
}

#[test]
fn test_put_and_get_epic() {
    let mut store = store_with_workspace();
    store.put_epic(&epic("e1", "launch")).unwrap();

    let retrieved = store.get_epic("e1").unwrap();
    assert_eq!(retrieved.name, "launch");
    assert_eq!(retrieved.color.as_deref(), Some("#ff8800"));
    assert_eq!(retrieved.end_date, Some(ts("2026-06-01T00:00:00Z")));
}

#[test]
fn test_task_ids_rehydrated_from_tasks_table() {
    let mut store = store_with_workspace();
    store.put_epic(&epic("e1", "launch")).unwrap();

    for (id, created) in [("t1", "2026-01-02T00:00:00Z"), ("t2", "2026-01-03T00:00:00Z")] {
        let mut task = Task::new(
            id.to_string(),
            "w1".to_string(),
            format!("task {id}"),
            ts(created),
        );
        task.epic_id = Some("e1".to_string());
        store.put_task(&task).unwrap();
    }

    let retrieved = store.get_epic("e1").unwrap();
    assert_eq!(retrieved.task_ids, vec!["t1", "t2"]);
}

#[test]
fn test_list_epics_sorted_by_name() {
    let mut store = store_with_workspace();
    store.put_epic(&epic("e1", "zeta")).unwrap();
    store.put_epic(&epic("e2", "alpha")).unwrap();

    let names: Vec<String> = store
        .list_epics("w1")
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn test_replace_epics_drops_stale_rows() {
    let mut store = store_with_workspace();
    store.put_epic(&epic("e1", "old")).unwrap();

    store.replace_epics("w1", &[epic("e2", "fresh")]).unwrap();

    assert!(!store.epic_exists("e1").unwrap());
    assert!(store.epic_exists("e2").unwrap());
}

#[test]
fn test_delete_epic_not_found() {
    let mut store = store_with_workspace();
    assert!(matches!(
        store.delete_epic("nope"),
        Err(Error::EpicNotFound(_))
    ));
}
