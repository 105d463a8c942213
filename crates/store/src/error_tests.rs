// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

#[test]
fn test_not_found_messages_name_the_entity() {
    assert_eq!(
        Error::WorkspaceNotFound("w1".to_string()).to_string(),
        "workspace not found in cache: w1"
    );
    assert_eq!(
        Error::TaskNotFound("t1".to_string()).to_string(),
        "task not found in cache: t1"
    );
}

#[test]
fn test_core_errors_pass_through_transparently() {
    let core = td_core::Error::CorruptedData("bad row".to_string());
    let err: Error = core.into();
    assert_eq!(err.to_string(), "corrupted data: bad row");
}

#[test]
fn test_is_not_found_covers_entity_variants_only() {
    assert!(Error::ChannelNotFound("c1".to_string()).is_not_found());
    assert!(Error::NotificationNotFound("n1".to_string()).is_not_found());
    assert!(!Error::Database(rusqlite::Error::InvalidQuery).is_not_found());
}

#[test]
fn test_rusqlite_errors_convert() {
    let err: Error = rusqlite::Error::InvalidQuery.into();
    assert!(matches!(err, Error::Database(_)));
}
