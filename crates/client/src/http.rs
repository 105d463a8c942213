// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! REST API access.
//!
//! The [`Api`] trait abstracts the HTTP layer so repositories can be unit
//! tested against a mock; [`HttpApi`] is the reqwest-backed production
//! implementation.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Boxed future returned by [`Api`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// REST API seam.
///
/// Paths are relative to the configured base URL and start with `/`.
/// Responses come back as raw JSON; callers decode through the defensive
/// `td-core` deserializers.
pub trait Api: Send + Sync {
    fn get_json<'a>(&'a self, path: &'a str) -> ApiFuture<'a, Value>;

    fn post_json<'a>(&'a self, path: &'a str, body: Value) -> ApiFuture<'a, Value>;

    fn patch_json<'a>(&'a self, path: &'a str, body: Value) -> ApiFuture<'a, Value>;

    fn delete<'a>(&'a self, path: &'a str) -> ApiFuture<'a, ()>;

    /// Install or clear the bearer token used on subsequent requests.
    fn set_token(&mut self, token: Option<String>);
}

/// reqwest-backed [`Api`] implementation.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    /// Build an HTTP client from the endpoint and timeout in `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build http client: {e}")))?;
        Ok(HttpApi {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: reqwest::RequestBuilder, path: &str) -> Result<Value> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            if status == reqwest::StatusCode::NO_CONTENT {
                return Ok(Value::Null);
            }
            return response
                .json()
                .await
                .map_err(|e| Error::Network(e.to_string()));
        }
        Err(Self::status_error(status.as_u16(), path, response).await)
    }

    async fn status_error(status: u16, path: &str, response: reqwest::Response) -> Error {
        match status {
            401 | 403 => Error::Unauthorized,
            404 => Error::NotFound(path.to_string()),
            400..=499 => {
                // Error bodies are as inconsistent as the data: the message
                // sits under "message" or "error" when present at all.
                let message = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|body| {
                        body.get("message")
                            .or_else(|| body.get("error"))
                            .and_then(Value::as_str)
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| format!("request failed with status {status}"));
                Error::Api { status, message }
            }
            _ => Error::Server { status },
        }
    }
}

impl Api for HttpApi {
    fn get_json<'a>(&'a self, path: &'a str) -> ApiFuture<'a, Value> {
        Box::pin(async move {
            let request = self.http.get(self.url(path));
            self.execute(request, path).await
        })
    }

    fn post_json<'a>(&'a self, path: &'a str, body: Value) -> ApiFuture<'a, Value> {
        Box::pin(async move {
            let request = self.http.post(self.url(path)).json(&body);
            self.execute(request, path).await
        })
    }

    fn patch_json<'a>(&'a self, path: &'a str, body: Value) -> ApiFuture<'a, Value> {
        Box::pin(async move {
            let request = self.http.patch(self.url(path)).json(&body);
            self.execute(request, path).await
        })
    }

    fn delete<'a>(&'a self, path: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let request = self.http.delete(self.url(path));
            self.execute(request, path).await?;
            Ok(())
        })
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
