// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Callback client.
//!
//! Routes named server messages to [`EventDispatcher`]s.

use crate::connection::{ConnectionProvider, HubConnection};
use crate::dispatch::{pack_arguments, EventDispatcher, SignalDispatcher};
use crate::error::TransportError;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Receives server-to-client callbacks on one hub connection.
pub struct HubClient {
    artifact: String,
    connection: Arc<dyn HubConnection>,
}

impl HubClient {
    /// Resolve the hub connection at `hub_path`.
    pub async fn connect(
        artifact: impl Into<String>,
        provider: &dyn ConnectionProvider,
        hub_path: &str,
    ) -> Result<Self, TransportError> {
        let connection = provider.get_hub_connection(hub_path).await?;
        Ok(Self::with_connection(artifact, connection))
    }

    pub fn with_connection(artifact: impl Into<String>, connection: Arc<dyn HubConnection>) -> Self {
        Self {
            artifact: artifact.into(),
            connection,
        }
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Forward messages named `callback` to `dispatcher`.
    ///
    /// Payloads that do not decode into `T` are logged and dropped.
    pub fn register<T>(&self, callback: &str, dispatcher: &EventDispatcher<T>)
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let dispatcher = dispatcher.clone();
        let name = callback.to_string();
        let artifact = self.artifact.clone();
        self.connection.on(
            callback,
            Arc::new(move |args| {
                tracing::debug!("{} received from server ({} args)", name, args.len());
                match serde_json::from_value::<T>(pack_arguments(args)) {
                    Ok(event) => dispatcher.dispatch(&event),
                    Err(e) => tracing::warn!("{}.{}: undecodable payload: {}", artifact, name, e),
                }
            }),
        );
    }

    /// Forward argument-less messages named `callback` to `dispatcher`.
    pub fn register_signal(&self, callback: &str, dispatcher: &SignalDispatcher) {
        let dispatcher = dispatcher.clone();
        let name = callback.to_string();
        self.connection.on(
            callback,
            Arc::new(move |_args| {
                tracing::debug!("{} received from server", name);
                dispatcher.dispatch(&());
            }),
        );
    }
}
