// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Hub invocation runtime
//!
//! Native implementation of the invocation protocol that generated hub
//! clients carry: calls made while the connection is down are parked in a
//! bounded FIFO queue, released by a periodic drain loop once the
//! connection is back, and rejected if they wait longer than the queue
//! timeout.
//!
//! # Overview
//!
//! - [`OfflineQueue`]: the queue itself (`invoke` + `handle_queue`)
//! - [`HubInvoker`]: server-side operations routed through the queue, with
//!   the drain loop running on a tokio task
//! - [`HubClient`] / [`EventDispatcher`]: server-to-client callbacks
//!   dispatched to subscribers
//!
//! # Example
//!
//! ```rust,ignore
//! use hubgen_runtime::{HubInvoker, QueuePolicy};
//! use serde_json::json;
//!
//! let invoker = HubInvoker::start("OrderHub", provider, "hub/orders", QueuePolicy::default());
//! let id: u64 = invoker.call_as("placeOrder", vec![json!({ "sku": "A-1" })]).await?;
//! ```

mod client;
mod connection;
mod dispatch;
mod error;
mod invoker;
mod policy;
mod queue;

pub use client::HubClient;
pub use connection::{
    ConnectionProvider, ConnectionState, ConnectionStatus, HubConnection, MessageHandler,
};
pub use dispatch::{pack_arguments, EventDispatcher, SignalDispatcher, SubscriptionId};
pub use error::{InvokeError, InvokeResult, TransportError};
pub use invoker::HubInvoker;
pub use policy::{
    QueuePolicy, MAX_QUEUE_COUNT, OFFLINE_QUEUE_INTERVAL_SECONDS, QUEUE_TIMEOUT_SECONDS,
};
pub use queue::OfflineQueue;
