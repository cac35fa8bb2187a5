// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Offline invocation queue.
//!
//! A call made while the connection is up runs at once. A call made while it
//! is down parks a resolver at the queue tail. One deadline covers the wait
//! for the drain loop and the released action; an action still running when
//! it fires is dropped and the caller gets the timeout.
//!
//! The timeout does not evict the slot. A timed-out slot keeps counting
//! toward the bound until the drain loop pops it, and popping it is a no-op
//! because the waiting side is already gone.

use crate::connection::ConnectionStatus;
use crate::error::{InvokeError, TransportError};
use crate::policy::QueuePolicy;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::oneshot;

type Resolver = oneshot::Sender<()>;

/// Bounded FIFO of calls waiting for connectivity.
pub struct OfflineQueue {
    /// Artifact name used in error messages (e.g. "OrderHub")
    artifact: String,

    policy: QueuePolicy,

    /// Pending resolvers, head is the oldest call
    pending: Mutex<VecDeque<Resolver>>,
}

impl OfflineQueue {
    pub fn new(artifact: impl Into<String>, policy: QueuePolicy) -> Self {
        Self {
            artifact: artifact.into(),
            policy,
            pending: Mutex::new(VecDeque::new()),
        }
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn policy(&self) -> &QueuePolicy {
        &self.policy
    }

    /// Number of queued slots, timed-out ones included.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Run `action` now if `connection` is connected, otherwise queue it.
    ///
    /// `action` is called at most once. Its outcome is returned unchanged.
    pub async fn invoke<C, T, F, Fut>(
        &self,
        connection: &C,
        operation: &str,
        action: F,
    ) -> Result<T, InvokeError>
    where
        C: ConnectionStatus + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        if connection.state().is_connected() {
            return action().await.map_err(InvokeError::from);
        }

        let released = {
            let mut pending = self.pending.lock();
            if pending.len() >= self.policy.max_queue_count {
                return Err(InvokeError::QueueFull {
                    artifact: self.artifact.clone(),
                    operation: operation.to_string(),
                    limit: self.policy.max_queue_count,
                });
            }
            let (resolver, released) = oneshot::channel();
            pending.push_back(resolver);
            released
        };

        tracing::debug!(
            "{}.{} not connected - adding to queue",
            self.artifact,
            operation
        );

        let queued = async {
            if released.await.is_err() {
                return Err(InvokeError::Discarded {
                    artifact: self.artifact.clone(),
                    operation: operation.to_string(),
                });
            }
            action().await.map_err(InvokeError::from)
        };

        match tokio::time::timeout(self.policy.queue_timeout(), queued).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(
                    "{}.{} queue item timed out after {}s",
                    self.artifact,
                    operation,
                    self.policy.queue_timeout_secs
                );
                Err(InvokeError::Timeout {
                    artifact: self.artifact.clone(),
                    operation: operation.to_string(),
                    seconds: self.policy.queue_timeout_secs,
                })
            }
        }
    }

    /// One drain pass.
    ///
    /// Pops and settles head resolvers while `connection` reports connected,
    /// reading the state again before every pop. Returns the number of
    /// calls actually released (abandoned slots are popped but not counted).
    pub fn handle_queue<C: ConnectionStatus + ?Sized>(&self, connection: &C) -> usize {
        let mut released = 0;

        while !self.is_empty() {
            if !connection.state().is_connected() {
                break;
            }

            let Some(resolver) = self.pending.lock().pop_front() else {
                break;
            };

            tracing::debug!("process {} queue item", self.artifact);
            if resolver.send(()).is_ok() {
                released += 1;
            }
        }

        released
    }
}

impl std::fmt::Debug for OfflineQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineQueue")
            .field("artifact", &self.artifact)
            .field("policy", &self.policy)
            .field("len", &self.len())
            .finish()
    }
}
