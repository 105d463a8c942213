// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Wire transport for the chat socket.
//!
//! [`ChatSocket`](crate::socket::ChatSocket) talks to the server through
//! the [`Transport`] trait so the reconnect and outbox policy can be
//! tested against an in-memory fake. [`WebSocketTransport`] is the real
//! thing, speaking the JSON event protocol over tokio-tungstenite.

use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use td_core::{ClientEvent, ServerEvent};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server could not be reached or refused the handshake.
    #[error("could not connect: {0}")]
    ConnectionFailed(String),

    /// Operated on a socket that is not connected.
    #[error("socket is not connected")]
    ConnectionClosed,

    /// An outgoing frame could not be written.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// An incoming frame could not be read.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// An event could not be encoded for the wire.
    #[error("could not encode event: {0}")]
    SerializationError(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Boxed future returned by [`Transport`] methods, so the trait stays
/// object-safe and mockable.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = TransportResult<T>> + Send + 'a>>;

/// A bidirectional event channel to the chat server.
pub trait Transport: Send + Sync {
    /// Establish the connection.
    fn connect(&mut self, url: &str) -> TransportFuture<'_, ()>;

    /// Tear the connection down.
    fn disconnect(&mut self) -> TransportFuture<'_, ()>;

    /// Write one event to the server.
    fn send(&mut self, event: ClientEvent) -> TransportFuture<'_, ()>;

    /// Wait for the next event from the server.
    ///
    /// `Ok(None)` means the server closed the connection.
    fn recv(&mut self) -> TransportFuture<'_, Option<ServerEvent>>;

    /// Whether a connection is currently established.
    fn is_connected(&self) -> bool;
}

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Split halves of a live WebSocket connection.
struct WsHalves {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

/// Production transport over tokio-tungstenite.
pub struct WebSocketTransport {
    ws: Option<WsHalves>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        WebSocketTransport { ws: None }
    }
}

impl Default for WebSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for WebSocketTransport {
    fn connect(&mut self, url: &str) -> TransportFuture<'_, ()> {
        let url = url.to_string();
        Box::pin(async move {
            let (ws_stream, _) = tokio_tungstenite::connect_async(&url)
                .await
                .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

            let (sink, stream) = ws_stream.split();
            self.ws = Some(WsHalves { sink, stream });
            Ok(())
        })
    }

    fn disconnect(&mut self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            // Best effort; the peer may already be gone.
            if let Some(mut ws) = self.ws.take() {
                let _ = ws.sink.close().await;
            }
            Ok(())
        })
    }

    fn send(&mut self, event: ClientEvent) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            let ws = self.ws.as_mut().ok_or(TransportError::ConnectionClosed)?;

            let json = event
                .to_json()
                .map_err(|e| TransportError::SerializationError(e.to_string()))?;

            // A failed write means the connection is gone; drop it so the
            // caller's next attempt goes through reconnect.
            if let Err(e) = ws.sink.send(Message::Text(json.into())).await {
                self.ws = None;
                return Err(TransportError::SendFailed(e.to_string()));
            }
            // Flush eagerly so a dead peer surfaces on this send, not a
            // later one.
            if let Err(e) = ws.sink.flush().await {
                self.ws = None;
                return Err(TransportError::SendFailed(e.to_string()));
            }

            Ok(())
        })
    }

    fn recv(&mut self) -> TransportFuture<'_, Option<ServerEvent>> {
        Box::pin(async move {
            let ws = self.ws.as_mut().ok_or(TransportError::ConnectionClosed)?;

            loop {
                match ws.stream.next().await {
                    Some(Ok(Message::Text(text))) => {
                        // Servers ship event types faster than clients
                        // update; an unknown frame must not end the stream.
                        match ServerEvent::from_json(&text) {
                            Ok(event) => return Ok(Some(event)),
                            Err(e) => {
                                tracing::warn!(error = %e, "skipping undecodable frame");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        self.ws = None;
                        return Ok(None);
                    }
                    // tungstenite answers pings itself; binary frames are
                    // not part of this protocol.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        self.ws = None;
                        return Err(TransportError::ReceiveFailed(e.to_string()));
                    }
                    None => {
                        self.ws = None;
                        return Ok(None);
                    }
                }
            }
        })
    }

    fn is_connected(&self) -> bool {
        self.ws.is_some()
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
pub(crate) mod tests;
