// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for hub invocations.

use thiserror::Error;

/// Result type for hub invocations
pub type InvokeResult<T> = Result<T, InvokeError>;

/// Failures reported by the connection provider or the remote hub.
///
/// These pass through the queue unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection unavailable: {0}")]
    Connection(String),

    #[error("remote operation '{operation}' failed: {message}")]
    Remote { operation: String, message: String },

    #[error("invalid payload: {0}")]
    Payload(String),
}

/// Errors surfaced to the caller of a queued hub operation.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Queue was already at its bound when a disconnected call arrived
    #[error("Failed to add action to {artifact}.{operation} queue. Limited to {limit} calls.")]
    QueueFull {
        artifact: String,
        operation: String,
        limit: usize,
    },

    /// Queued call was not released within the queue timeout
    #[error("{artifact}.{operation} queue item timed out in {seconds} seconds.")]
    Timeout {
        artifact: String,
        operation: String,
        seconds: u64,
    },

    /// Queue was dropped while the call was still waiting
    #[error("{artifact}.{operation} queue item was discarded before release")]
    Discarded { artifact: String, operation: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to decode result of '{operation}': {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InvokeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_queue_full(&self) -> bool {
        matches!(self, Self::QueueFull { .. })
    }
}
