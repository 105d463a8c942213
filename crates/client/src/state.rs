// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! View-facing resource states.
//!
//! A `Resource<T>` is what a screen binds to: nothing yet, loading
//! (possibly with stale data still on display), ready, or failed with a
//! user-facing message.

use crate::error::Error;

/// Where a ready value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOrigin {
    /// Fresh from the remote API.
    Remote,
    /// Served from the local cache after a remote failure.
    Cache,
}

/// A value a repository produced, tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub origin: ResourceOrigin,
}

impl<T> Fetched<T> {
    pub fn remote(value: T) -> Self {
        Fetched {
            value,
            origin: ResourceOrigin::Remote,
        }
    }

    pub fn cached(value: T) -> Self {
        Fetched {
            value,
            origin: ResourceOrigin::Cache,
        }
    }

    /// True when the value was served from the cache.
    pub fn is_stale(&self) -> bool {
        self.origin == ResourceOrigin::Cache
    }
}

/// Loading/success/error state for one piece of screen data.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight; `stale` holds the previous value if there
    /// was one, so the screen does not blank out during refresh.
    Loading { stale: Option<T> },
    /// The request succeeded.
    Ready { value: T, origin: ResourceOrigin },
    /// The request failed; `message` is ready for display.
    Failed { message: String },
}

impl<T> Resource<T> {
    /// Transition into `Loading`, carrying the last ready value as stale.
    pub fn to_loading(self) -> Self {
        match self {
            Resource::Ready { value, .. } => Resource::Loading { stale: Some(value) },
            Resource::Loading { stale } => Resource::Loading { stale },
            Resource::Idle | Resource::Failed { .. } => Resource::Loading { stale: None },
        }
    }

    /// Transition into `Ready` from a repository result.
    pub fn ready(fetched: Fetched<T>) -> Self {
        Resource::Ready {
            value: fetched.value,
            origin: fetched.origin,
        }
    }

    /// Transition into `Failed` with the error's user-facing message.
    pub fn failed(err: &Error) -> Self {
        Resource::Failed {
            message: err.user_message(),
        }
    }

    /// The current displayable value: ready data, or stale data mid-refresh.
    pub fn value(&self) -> Option<&T> {
        match self {
            Resource::Ready { value, .. } => Some(value),
            Resource::Loading { stale } => stale.as_ref(),
            Resource::Idle | Resource::Failed { .. } => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Resource::Failed { .. })
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::Idle
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
