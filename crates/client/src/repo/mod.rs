// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Repository layer: remote-first reads with cache fallback.
//!
//! Each aggregate gets a repository holding an [`Api`](crate::http::Api)
//! handle and a [`Store`](td_store::Store). Reads try the remote API,
//! write the result through to the cache, and fall back to cached rows
//! only when the failure says nothing about the data (network or 5xx).
//! Writes go remote first and are mirrored into the cache on success.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

pub mod accounts;
pub mod channels;
pub mod invitations;
pub mod messages;
pub mod notifications;
pub mod tasks;
pub mod workspaces;

pub use accounts::AccountRepo;
pub use channels::ChannelRepo;
pub use invitations::InvitationRepo;
pub use messages::MessageRepo;
pub use notifications::NotificationRepo;
pub use tasks::TaskRepo;
pub use workspaces::WorkspaceRepo;

/// Decode an API response through the defensive td-core deserializers.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Mirror a server-side delete/update into the cache, ignoring rows the
/// cache never held.
pub(crate) fn ignore_missing<T>(result: td_store::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.is_not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
pub(crate) mod testing;
