// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! REST client, repositories, and view state for tandem.
//!
//! Repositories are remote-first: every read hits the API and writes the
//! result through to the td-store cache, falling back to cached rows only
//! when the network or the server is down. Screens consume results as
//! [`Resource`] states.

pub mod config;
pub mod error;
pub mod http;
pub mod repo;
pub mod state;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{Api, HttpApi};
pub use repo::{
    AccountRepo, ChannelRepo, InvitationRepo, MessageRepo, NotificationRepo, TaskRepo,
    WorkspaceRepo,
};
pub use state::{Fetched, Resource, ResourceOrigin};
