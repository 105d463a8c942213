// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Realtime chat socket with reconnection and offline queueing.
//!
//! Wraps a [`Transport`] with the policy layer: channel subscriptions
//! that survive reconnects, exponential backoff, and an on-disk
//! [`Outbox`] for messages composed while offline.

use std::collections::BTreeSet;
use std::path::Path;

use td_core::{ClientEvent, ServerEvent};

use crate::outbox::{Outbox, OutboxError};
use crate::transport::{Transport, TransportError, WebSocketTransport};

/// Socket configuration.
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// WebSocket server URL.
    pub url: String,
    /// Maximum reconnection attempts.
    pub max_retries: u32,
    /// Initial reconnect delay in milliseconds.
    pub initial_delay_ms: u64,
    /// Cap on the reconnect delay in seconds.
    pub max_delay_secs: u64,
    /// Idle time before a heartbeat ping is sent, in milliseconds.
    /// 0 disables heartbeats.
    pub heartbeat_interval_ms: u64,
    /// Time to wait for any frame after a heartbeat ping before declaring
    /// the connection dead, in milliseconds.
    pub heartbeat_timeout_ms: u64,
}

impl Default for SocketConfig {
    fn default() -> Self {
        SocketConfig {
            url: "ws://localhost:8787/ws".to_string(),
            max_retries: 10,
            initial_delay_ms: 500,
            max_delay_secs: 30,
            heartbeat_interval_ms: 30000,
            heartbeat_timeout_ms: 10000,
        }
    }
}

/// Error type for socket operations.
#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    /// Transport-level error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Outbox error.
    #[error(transparent)]
    Outbox(#[from] OutboxError),

    /// Operation requires a live connection.
    #[error("not connected")]
    NotConnected,

    /// All reconnection attempts failed.
    #[error("max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },

    /// The server answered nothing within the heartbeat window.
    #[error("no frame within {timeout_ms} ms of heartbeat ping")]
    HeartbeatTimeout { timeout_ms: u64 },
}

/// Result type for socket operations.
pub type SocketResult<T> = Result<T, SocketError>;

/// Connection lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected.
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Connected and ready.
    Connected,
    /// Reconnecting after a failure.
    Reconnecting { attempt: u32 },
}

/// Chat socket over a pluggable transport.
///
/// Generic over [`Transport`] so tests can drive it with a mock.
pub struct ChatSocket<T: Transport = WebSocketTransport> {
    config: SocketConfig,
    transport: T,
    state: ConnectionState,
    /// Channels to re-subscribe after a reconnect.
    subscriptions: BTreeSet<String>,
    outbox: Outbox,
    /// Sequence for heartbeat ping IDs.
    ping_seq: u64,
}

impl ChatSocket<WebSocketTransport> {
    /// Creates a socket with the default WebSocket transport.
    pub fn new(config: SocketConfig, outbox_path: impl AsRef<Path>) -> SocketResult<Self> {
        Self::with_transport(config, WebSocketTransport::new(), outbox_path)
    }
}

impl<T: Transport> ChatSocket<T> {
    /// Creates a socket with a custom transport.
    pub fn with_transport(
        config: SocketConfig,
        transport: T,
        outbox_path: impl AsRef<Path>,
    ) -> SocketResult<Self> {
        let outbox = Outbox::open(outbox_path)?;
        Ok(ChatSocket {
            config,
            transport,
            state: ConnectionState::Disconnected,
            subscriptions: BTreeSet::new(),
            outbox,
            ping_seq: 0,
        })
    }

    /// Current connection state.
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Whether the socket is connected.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected && self.transport.is_connected()
    }

    /// Number of events waiting in the outbox.
    pub fn pending(&self) -> SocketResult<usize> {
        Ok(self.outbox.len()?)
    }

    /// Connects once, without retrying.
    pub async fn connect(&mut self) -> SocketResult<()> {
        self.state = ConnectionState::Connecting;
        match self.transport.connect(&self.config.url).await {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                self.restore_session().await
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e.into())
            }
        }
    }

    /// Connects with exponential backoff.
    pub async fn connect_with_retry(&mut self) -> SocketResult<()> {
        let mut delay_ms = self.config.initial_delay_ms;

        for attempt in 1..=self.config.max_retries {
            self.state = ConnectionState::Reconnecting { attempt };

            match self.transport.connect(&self.config.url).await {
                Ok(()) => {
                    self.state = ConnectionState::Connected;
                    tracing::info!(attempt, "connected");
                    return self.restore_session().await;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "connection attempt failed");
                    if attempt < self.config.max_retries {
                        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                        delay_ms = std::cmp::min(delay_ms * 2, self.config.max_delay_secs * 1000);
                    }
                }
            }
        }

        self.state = ConnectionState::Disconnected;
        Err(SocketError::MaxRetriesExceeded {
            attempts: self.config.max_retries,
        })
    }

    /// Disconnects from the server.
    pub async fn disconnect(&mut self) -> SocketResult<()> {
        self.transport.disconnect().await?;
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    /// Re-subscribes and drains the outbox after a (re)connect.
    async fn restore_session(&mut self) -> SocketResult<()> {
        let channels: Vec<String> = self.subscriptions.iter().cloned().collect();
        for channel_id in channels {
            self.transport
                .send(ClientEvent::subscribe(channel_id))
                .await?;
        }
        self.flush_outbox().await
    }

    /// Subscribes to a channel's events.
    pub async fn subscribe(&mut self, channel_id: &str) -> SocketResult<()> {
        self.subscriptions.insert(channel_id.to_string());
        if self.is_connected() {
            self.transport
                .send(ClientEvent::subscribe(channel_id))
                .await?;
        }
        Ok(())
    }

    /// Unsubscribes from a channel's events.
    pub async fn unsubscribe(&mut self, channel_id: &str) -> SocketResult<()> {
        self.subscriptions.remove(channel_id);
        if self.is_connected() {
            self.transport
                .send(ClientEvent::Unsubscribe {
                    channel_id: channel_id.to_string(),
                })
                .await?;
        }
        Ok(())
    }

    /// Posts a message, queueing it when offline.
    ///
    /// `client_ref` is echoed in the server ack so callers can match
    /// the optimistic copy to the stored message.
    pub async fn post(
        &mut self,
        channel_id: &str,
        client_ref: &str,
        body: &str,
    ) -> SocketResult<()> {
        let event = ClientEvent::post(channel_id, client_ref, body);
        self.send_or_queue(event).await
    }

    /// Signals that the user is typing. Best effort, never queued.
    pub async fn typing(&mut self, channel_id: &str) -> SocketResult<()> {
        if !self.is_connected() {
            return Ok(());
        }
        match self.transport.send(ClientEvent::typing(channel_id)).await {
            Ok(()) => Ok(()),
            Err(e) => {
                // A stale typing indicator is worse than none.
                tracing::debug!(error = %e, "typing signal dropped");
                self.state = ConnectionState::Disconnected;
                Ok(())
            }
        }
    }

    /// Marks everything up to `message_id` as read.
    pub async fn mark_read(&mut self, channel_id: &str, message_id: &str) -> SocketResult<()> {
        let event = ClientEvent::MarkRead {
            channel_id: channel_id.to_string(),
            message_id: message_id.to_string(),
        };
        self.send_or_queue(event).await
    }

    /// Sends a keepalive ping.
    pub async fn ping(&mut self, id: u64) -> SocketResult<()> {
        if !self.is_connected() {
            return Err(SocketError::NotConnected);
        }
        self.transport.send(ClientEvent::ping(id)).await?;
        Ok(())
    }

    /// Sends the event, falling back to the outbox on failure.
    async fn send_or_queue(&mut self, event: ClientEvent) -> SocketResult<()> {
        if self.is_connected() {
            match self.transport.send(event.clone()).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "send failed, queueing event");
                    self.state = ConnectionState::Disconnected;
                }
            }
        }
        self.outbox.enqueue(&event)?;
        Ok(())
    }

    /// Sends all queued events in order.
    ///
    /// On a mid-flush failure the delivered prefix is removed from the
    /// outbox and the error is returned; the remainder stays queued.
    pub async fn flush_outbox(&mut self) -> SocketResult<()> {
        let events = self.outbox.peek_all()?;
        if events.is_empty() {
            return Ok(());
        }

        let mut sent = 0;
        for event in events {
            match self.transport.send(event).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    self.outbox.remove_first(sent)?;
                    self.state = ConnectionState::Disconnected;
                    return Err(e.into());
                }
            }
        }

        self.outbox.clear()?;
        Ok(())
    }

    /// Waits for the next server event, probing idle connections.
    ///
    /// When nothing arrives within the heartbeat interval a ping is sent;
    /// any frame within the heartbeat timeout counts as liveness. Silence
    /// past that marks the connection dead. Returns `None` when the server
    /// closes the connection.
    pub async fn next_event(&mut self) -> SocketResult<Option<ServerEvent>> {
        if !self.is_connected() {
            return Err(SocketError::NotConnected);
        }
        if self.config.heartbeat_interval_ms == 0 {
            let result = self.transport.recv().await;
            return self.on_recv(result);
        }
        let interval = std::time::Duration::from_millis(self.config.heartbeat_interval_ms);
        match tokio::time::timeout(interval, self.transport.recv()).await {
            Ok(result) => self.on_recv(result),
            Err(_) => self.probe_liveness().await,
        }
    }

    /// Sends a heartbeat ping and waits for any frame at all.
    async fn probe_liveness(&mut self) -> SocketResult<Option<ServerEvent>> {
        self.ping_seq += 1;
        tracing::debug!(id = self.ping_seq, "idle connection, sending heartbeat");
        if let Err(e) = self.transport.send(ClientEvent::ping(self.ping_seq)).await {
            self.state = ConnectionState::Disconnected;
            return Err(e.into());
        }
        let window = std::time::Duration::from_millis(self.config.heartbeat_timeout_ms);
        match tokio::time::timeout(window, self.transport.recv()).await {
            Ok(result) => self.on_recv(result),
            Err(_) => {
                self.state = ConnectionState::Disconnected;
                let _ = self.transport.disconnect().await;
                Err(SocketError::HeartbeatTimeout {
                    timeout_ms: self.config.heartbeat_timeout_ms,
                })
            }
        }
    }

    fn on_recv(
        &mut self,
        result: crate::transport::TransportResult<Option<ServerEvent>>,
    ) -> SocketResult<Option<ServerEvent>> {
        match result {
            Ok(Some(event)) => Ok(Some(event)),
            Ok(None) => {
                self.state = ConnectionState::Disconnected;
                Ok(None)
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "socket_tests.rs"]
mod tests;
