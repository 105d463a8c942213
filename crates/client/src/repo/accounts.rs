// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Authentication and the signed-in profile.

use serde_json::json;
use td_core::{Account, User};
use td_store::Store;

use crate::error::Result;
use crate::http::Api;
use crate::repo::decode;

pub struct AccountRepo<A: Api> {
    api: A,
    store: Store,
}

impl<A: Api> AccountRepo<A> {
    pub fn new(api: A, store: Store) -> Self {
        AccountRepo { api, store }
    }

    /// Sign in. On success the bearer token is installed on the API handle
    /// and the profile is cached.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Account> {
        let body = json!({ "username": username, "password": password });
        let account: Account = decode(self.api.post_json("/auth/login", body).await?)?;

        self.api.set_token(account.token.clone());

        let mut user = User::new(account.id.clone(), account.username.clone());
        user.email = Some(account.email.clone());
        self.store.put_user(&user)?;

        Ok(account)
    }

    /// The signed-in user's profile. Remote only; there is no reliable way
    /// to know which cached row is "me" without a live session.
    pub async fn me(&mut self) -> Result<User> {
        let user: User = decode(self.api.get_json("/me").await?)?;
        self.store.put_user(&user)?;
        Ok(user)
    }

    /// Drop the session token.
    pub fn logout(&mut self) {
        self.api.set_token(None);
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
