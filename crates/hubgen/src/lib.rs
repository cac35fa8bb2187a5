// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! hubgen - TypeScript hub client generator
//!
//! Reads .NET type metadata, computes the set of types reachable from a
//! server hub interface and its client callback interface, orders them so
//! every base is declared before its subtypes, and emits a TypeScript ES
//! module with the type declarations, a queue-backed hub invoker and a
//! callback client.
//!
//! # Pipeline
//!
//! 1. [`provider`]: a [`TypeDescriptionProvider`] describes types by handle
//! 2. [`graph`]: [`hub_closure`] collects the reachable types
//! 3. [`order`]: [`assign_order`] puts ancestors first
//! 4. [`typescript`]: the tera templates render the module
//!
//! # Configuration File
//!
//! ```toml
//! metadata = "orders.yaml"
//! output = "src/generated/order-hub.ts"
//!
//! [hub]
//! server = "Orders.IOrderHub"
//! client = "Orders.IOrderClient"
//! path = "hubs/orders"
//! namespace_filter = "Orders"
//!
//! [queue]
//! max_queue_count = 100
//! queue_timeout_secs = 60
//! offline_queue_interval_secs = 5
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod handle;
pub mod model;
pub mod naming;
pub mod order;
pub mod provider;
pub mod typescript;

pub use config::{ConfigError, HubGenConfig};
pub use error::{EmitError, GenerateError, GraphError, HandleError, MetadataError};
pub use generator::{GeneratedModule, GenerationPlan, GenerationReport, HubGenerator};
pub use graph::{compute_closure, hub_closure, Closure};
pub use model::{Member, Parameter, TypeId, TypeKind, TypeNode};
pub use order::{assign_order, EmissionOrder};
pub use provider::{MetadataDocument, MetadataProvider, TypeDescriptionProvider};
