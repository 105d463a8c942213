// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Local SQLite cache for tandem clients.
//!
//! The cache mirrors remote API state so views stay usable offline. It is
//! not a source of truth: rows are upserted from API payloads and replaced
//! wholesale on refresh, with foreign keys cascading deletes to dependents.

pub mod bugs;
pub mod channels;
pub mod db;
pub mod epics;
pub mod error;
pub mod invitations;
pub mod messages;
pub mod notifications;
pub mod sprints;
pub mod tasks;
pub mod users;
pub mod workspaces;

pub use db::{run_migrations, Store, SCHEMA};
pub use error::{Error, Result};
