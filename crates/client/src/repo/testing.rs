// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! Mock [`Api`] for repository tests.

use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::http::{Api, ApiFuture};

/// Scripted API double keyed by `"METHOD /path"`.
///
/// Stubbed responses for one route are consumed in order; a request with
/// no stub left fails the test.
#[derive(Default)]
pub struct MockApi {
    responses: Mutex<HashMap<String, VecDeque<Result<Value>>>>,
    calls: Mutex<Vec<String>>,
    token: Mutex<Option<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi::default()
    }

    /// Queue a response for a route, e.g. `stub("GET /workspaces", Ok(json!([])))`.
    pub fn stub(&self, route: &str, response: Result<Value>) {
        self.responses
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(response);
    }

    /// Every request made so far, in order, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn take(&self, method: &str, path: &str) -> Result<Value> {
        let route = format!("{method} {path}");
        self.calls.lock().unwrap().push(route.clone());
        self.responses
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("unexpected request: {route}"))
    }
}

/// A network-class error for fallback tests.
pub fn network_error() -> Error {
    Error::Network("connection refused".to_string())
}

impl Api for MockApi {
    fn get_json<'a>(&'a self, path: &'a str) -> ApiFuture<'a, Value> {
        Box::pin(async move { self.take("GET", path) })
    }

    fn post_json<'a>(&'a self, path: &'a str, _body: Value) -> ApiFuture<'a, Value> {
        Box::pin(async move { self.take("POST", path) })
    }

    fn patch_json<'a>(&'a self, path: &'a str, _body: Value) -> ApiFuture<'a, Value> {
        Box::pin(async move { self.take("PATCH", path) })
    }

    fn delete<'a>(&'a self, path: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.take("DELETE", path)?;
            Ok(())
        })
    }

    fn set_token(&mut self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}
