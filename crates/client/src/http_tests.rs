// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

fn api_for(base_url: &str) -> HttpApi {
    let mut config = ClientConfig::new(base_url, "wss://chat.example.com");
    config.token = Some("tok_123".to_string());
    HttpApi::from_config(&config).unwrap()
}

#[test]
fn test_url_joining_trims_trailing_slash() {
    let api = api_for("https://api.example.com/");
    assert_eq!(api.url("/workspaces"), "https://api.example.com/workspaces");

    let api = api_for("https://api.example.com");
    assert_eq!(
        api.url("/workspaces/w1/tasks"),
        "https://api.example.com/workspaces/w1/tasks"
    );
}

#[test]
fn test_set_token_replaces_credentials() {
    let mut api = api_for("https://api.example.com");
    assert_eq!(api.token.as_deref(), Some("tok_123"));

    api.set_token(Some("tok_456".to_string()));
    assert_eq!(api.token.as_deref(), Some("tok_456"));

    api.set_token(None);
    assert_eq!(api.token, None);
}
