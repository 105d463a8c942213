// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Durable outbox for events composed while offline.
//!
//! Events are stored as JSON lines in a file. Each enqueue appends
//! a line and fsyncs, so a crash loses at most the event being
//! written. On reconnect the socket drains the outbox in order.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use td_core::ClientEvent;

/// Error type for outbox operations.
#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    /// I/O error reading or writing the outbox file.
    #[error("outbox io error: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be serialized or deserialized.
    #[error("outbox serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for outbox operations.
pub type OutboxResult<T> = Result<T, OutboxError>;

/// Append-only queue of events awaiting delivery.
pub struct Outbox {
    path: PathBuf,
}

impl Outbox {
    /// Opens an outbox at the given path, creating the file if needed.
    pub fn open(path: impl AsRef<Path>) -> OutboxResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            File::create(&path)?;
        }
        Ok(Outbox { path })
    }

    /// Appends an event and syncs it to disk.
    pub fn enqueue(&self, event: &ClientEvent) -> OutboxResult<()> {
        let line = event.to_json()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        file.sync_all()?;
        Ok(())
    }

    /// Reads all pending events in enqueue order.
    pub fn peek_all(&self) -> OutboxResult<Vec<ClientEvent>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            events.push(ClientEvent::from_json(&line)?);
        }
        Ok(events)
    }

    /// Removes the first `count` events, keeping the rest.
    ///
    /// Used after a partial flush so already-delivered events are not
    /// sent twice.
    pub fn remove_first(&self, count: usize) -> OutboxResult<()> {
        let remaining: Vec<ClientEvent> = self.peek_all()?.into_iter().skip(count).collect();
        let mut file = File::create(&self.path)?;
        for event in &remaining {
            let line = event.to_json()?;
            writeln!(file, "{line}")?;
        }
        file.sync_all()?;
        Ok(())
    }

    /// Removes all pending events.
    pub fn clear(&self) -> OutboxResult<()> {
        File::create(&self.path)?;
        Ok(())
    }

    /// Number of pending events.
    pub fn len(&self) -> OutboxResult<usize> {
        Ok(self.peek_all()?.len())
    }

    /// Whether the outbox has no pending events.
    pub fn is_empty(&self) -> OutboxResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
#[path = "outbox_tests.rs"]
mod tests;
