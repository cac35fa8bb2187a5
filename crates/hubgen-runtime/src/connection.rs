// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connection contracts supplied by the host application.

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Live state of a hub connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
    Reconnecting,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

/// Handler invoked with the positional arguments of a server message.
pub type MessageHandler = Arc<dyn Fn(Vec<Value>) + Send + Sync>;

/// Anything that can report a connection state.
///
/// The queue never caches this value; it is read again before every
/// decision.
pub trait ConnectionStatus: Send + Sync {
    fn state(&self) -> ConnectionState;
}

/// An established hub connection.
#[async_trait]
pub trait HubConnection: ConnectionStatus {
    /// Invoke a remote hub operation with positional arguments.
    async fn invoke(&self, operation: &str, args: Vec<Value>) -> Result<Value, TransportError>;

    /// Register a handler for messages named `message`.
    fn on(&self, message: &str, handler: MessageHandler);
}

/// Resolves hub connections by path.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn get_hub_connection(
        &self,
        path: &str,
    ) -> Result<Arc<dyn HubConnection>, TransportError>;
}
