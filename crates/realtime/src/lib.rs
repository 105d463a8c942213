// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Realtime chat connection for tandem clients.
//!
//! [`ChatSocket`] maintains a WebSocket session with the chat server:
//! it tracks channel subscriptions across reconnects, retries with
//! exponential backoff, and queues outgoing events to a durable
//! [`Outbox`] while offline.

pub mod outbox;
pub mod socket;
pub mod transport;

pub use outbox::{Outbox, OutboxError};
pub use socket::{ChatSocket, ConnectionState, SocketConfig, SocketError};
pub use transport::{
    Transport, TransportError, TransportFuture, TransportResult, WebSocketTransport,
};
