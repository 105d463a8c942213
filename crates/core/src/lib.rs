// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! td-core: Shared library for the tandem client data layer
//!
//! This crate provides the domain types, the defensive JSON normalization
//! used at the API boundary, and the realtime chat protocol shared by the
//! td-store, td-client, and td-realtime crates.

pub mod chat;
pub mod error;
pub mod json;
pub mod notification;
pub mod protocol;
pub mod user;
pub mod work;
pub mod workspace;

pub use chat::{Channel, ChannelVisibility, Message};
pub use error::{Error, Result};
pub use notification::{Notification, NotificationKind};
pub use protocol::{ClientEvent, ServerEvent};
pub use user::{Account, User};
pub use work::{Bug, BugSeverity, Epic, Sprint, SprintState, Task, TaskPriority, TaskStatus};
pub use workspace::{Invitation, InvitationStatus, Report, Workspace};
