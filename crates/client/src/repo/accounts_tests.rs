// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::error::Error;
use crate::repo::testing::MockApi;
use serde_json::json;

fn repo() -> AccountRepo<MockApi> {
    AccountRepo::new(MockApi::new(), Store::open_in_memory().unwrap())
}

#[tokio::test]
async fn login_installs_token_and_caches_profile() {
    let mut repo = repo();
    repo.api.stub(
        "POST /auth/login",
        Ok(json!({
            "user_id": "u1",
            "username": "ada",
            "email": "ada@example.com",
            "token": "tok_abc"
        })),
    );

    let account = repo.login("ada", "hunter2").await.unwrap();
    assert_eq!(account.id, "u1");
    assert_eq!(repo.api.token().as_deref(), Some("tok_abc"));

    let cached = repo.store.get_user("u1").unwrap();
    assert_eq!(cached.email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn login_failure_surfaces_api_error() {
    let mut repo = repo();
    repo.api.stub(
        "POST /auth/login",
        Err(Error::Api {
            status: 422,
            message: "wrong password".to_string(),
        }),
    );

    let err = repo.login("ada", "nope").await.unwrap_err();
    assert_eq!(err.user_message(), "wrong password");
    assert_eq!(repo.api.token(), None);
}

#[tokio::test]
async fn me_writes_through() {
    let mut repo = repo();
    repo.api.stub(
        "GET /me",
        Ok(json!({
            "_id": "u1",
            "username": "ada",
            "display_name": "Ada L.",
            "online": true
        })),
    );

    let user = repo.me().await.unwrap();
    assert_eq!(user.label(), "Ada L.");
    assert!(repo.store.get_user("u1").is_ok());
}

#[tokio::test]
async fn logout_clears_token() {
    let mut repo = repo();
    repo.api.stub(
        "POST /auth/login",
        Ok(json!({
            "id": "u1",
            "username": "ada",
            "email": "ada@example.com",
            "token": "tok_abc"
        })),
    );
    repo.login("ada", "hunter2").await.unwrap();

    repo.logout();
    assert_eq!(repo.api.token(), None);
}
