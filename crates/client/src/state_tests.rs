// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

#[test]
fn test_to_loading_keeps_ready_value_as_stale() {
    let resource = Resource::Ready {
        value: 42,
        origin: ResourceOrigin::Remote,
    };

    let loading = resource.to_loading();
    assert!(loading.is_loading());
    assert_eq!(loading.value(), Some(&42));
}

#[test]
fn test_to_loading_from_idle_and_failed_has_no_stale() {
    let loading = Resource::<i32>::Idle.to_loading();
    assert_eq!(loading.value(), None);

    let loading = Resource::<i32>::Failed {
        message: "oops".to_string(),
    }
    .to_loading();
    assert_eq!(loading.value(), None);
}

#[test]
fn test_ready_carries_fetch_origin() {
    let resource = Resource::ready(Fetched::cached(vec!["a"]));
    assert!(matches!(
        resource,
        Resource::Ready {
            origin: ResourceOrigin::Cache,
            ..
        }
    ));
}

#[test]
fn test_failed_renders_user_message() {
    let err = Error::Server { status: 502 };
    let resource = Resource::<()>::failed(&err);
    assert_eq!(
        resource,
        Resource::Failed {
            message: "The server had a problem. Try again shortly.".to_string()
        }
    );
}

#[test]
fn test_fetched_staleness() {
    assert!(Fetched::cached(1).is_stale());
    assert!(!Fetched::remote(1).is_stale());
}

#[test]
fn test_default_is_idle() {
    assert_eq!(Resource::<i32>::default(), Resource::Idle);
}
