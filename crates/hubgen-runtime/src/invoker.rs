// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Server invoker.
//!
//! The HubInvoker resolves its connection once, routes every operation
//! through an [`OfflineQueue`] and keeps a drain task alive for as long as
//! the invoker exists.

use crate::connection::{ConnectionProvider, HubConnection};
use crate::error::{InvokeError, InvokeResult, TransportError};
use crate::policy::QueuePolicy;
use crate::queue::OfflineQueue;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

/// Invokes hub operations by name, queueing them while offline.
pub struct HubInvoker {
    inner: Arc<InvokerInner>,
    drain: JoinHandle<()>,
}

struct InvokerInner {
    hub_path: String,
    provider: Arc<dyn ConnectionProvider>,
    connection: OnceCell<Arc<dyn HubConnection>>,
    queue: OfflineQueue,
}

impl InvokerInner {
    async fn connection(&self) -> Result<Arc<dyn HubConnection>, TransportError> {
        self.connection
            .get_or_try_init(|| self.provider.get_hub_connection(&self.hub_path))
            .await
            .cloned()
    }
}

impl HubInvoker {
    /// Create an invoker and start its drain loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        artifact: impl Into<String>,
        provider: Arc<dyn ConnectionProvider>,
        hub_path: impl Into<String>,
        policy: QueuePolicy,
    ) -> Self {
        let inner = Arc::new(InvokerInner {
            hub_path: hub_path.into(),
            provider,
            connection: OnceCell::new(),
            queue: OfflineQueue::new(artifact, policy),
        });

        let drain = tokio::spawn(drain_loop(Arc::clone(&inner)));

        Self { inner, drain }
    }

    pub fn hub_path(&self) -> &str {
        &self.inner.hub_path
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.inner.queue
    }

    /// Invoke `operation` with positional arguments.
    pub async fn call(&self, operation: &str, args: Vec<Value>) -> InvokeResult<Value> {
        let hub = self.inner.connection().await?;
        let remote = Arc::clone(&hub);
        self.inner
            .queue
            .invoke(hub.as_ref(), operation, move || async move {
                remote.invoke(operation, args).await
            })
            .await
    }

    /// Invoke `operation` and decode its result.
    pub async fn call_as<R: DeserializeOwned>(
        &self,
        operation: &str,
        args: Vec<Value>,
    ) -> InvokeResult<R> {
        let value = self.call(operation, args).await?;
        serde_json::from_value(value).map_err(|source| InvokeError::Decode {
            operation: operation.to_string(),
            source,
        })
    }
}

impl Drop for HubInvoker {
    fn drop(&mut self) {
        self.drain.abort();
    }
}

/// Perpetual drain loop; the next pass is scheduled only after the current
/// one has finished, so passes never overlap.
async fn drain_loop(inner: Arc<InvokerInner>) {
    loop {
        match inner.connection().await {
            Ok(hub) => {
                let released = inner.queue.handle_queue(hub.as_ref());
                if released > 0 {
                    tracing::debug!(
                        "{} drained {} queued call(s)",
                        inner.queue.artifact(),
                        released
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    "{} could not resolve hub connection '{}': {}",
                    inner.queue.artifact(),
                    inner.hub_path,
                    e
                );
            }
        }

        tokio::time::sleep(inner.queue.policy().offline_queue_interval()).await;
    }
}
