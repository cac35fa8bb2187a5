// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Queue policy shared by the runtime and the generated TypeScript.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of calls that may wait for connectivity.
pub const MAX_QUEUE_COUNT: usize = 100;

/// Seconds a queued call may wait before it is rejected.
pub const QUEUE_TIMEOUT_SECONDS: u64 = 60;

/// Seconds between two drain passes.
pub const OFFLINE_QUEUE_INTERVAL_SECONDS: u64 = 5;

/// Bounds and timers of the offline queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuePolicy {
    /// Queue bound; a disconnected call arriving at this length is rejected.
    #[serde(default = "default_max_queue_count")]
    pub max_queue_count: usize,

    /// Per-call queue timeout (seconds).
    #[serde(default = "default_queue_timeout_secs")]
    pub queue_timeout_secs: u64,

    /// Delay between the end of one drain pass and the start of the next (seconds).
    #[serde(default = "default_offline_queue_interval_secs")]
    pub offline_queue_interval_secs: u64,
}

fn default_max_queue_count() -> usize {
    MAX_QUEUE_COUNT
}

fn default_queue_timeout_secs() -> u64 {
    QUEUE_TIMEOUT_SECONDS
}

fn default_offline_queue_interval_secs() -> u64 {
    OFFLINE_QUEUE_INTERVAL_SECONDS
}

impl Default for QueuePolicy {
    fn default() -> Self {
        Self {
            max_queue_count: MAX_QUEUE_COUNT,
            queue_timeout_secs: QUEUE_TIMEOUT_SECONDS,
            offline_queue_interval_secs: OFFLINE_QUEUE_INTERVAL_SECONDS,
        }
    }
}

impl QueuePolicy {
    /// Queue timeout as a `Duration`.
    pub fn queue_timeout(&self) -> Duration {
        Duration::from_secs(self.queue_timeout_secs)
    }

    /// Drain interval as a `Duration`.
    pub fn offline_queue_interval(&self) -> Duration {
        Duration::from_secs(self.offline_queue_interval_secs)
    }

    #[must_use]
    pub fn with_max_queue_count(mut self, max: usize) -> Self {
        self.max_queue_count = max;
        self
    }

    #[must_use]
    pub fn with_queue_timeout_secs(mut self, secs: u64) -> Self {
        self.queue_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_offline_queue_interval_secs(mut self, secs: u64) -> Self {
        self.offline_queue_interval_secs = secs;
        self
    }
}
