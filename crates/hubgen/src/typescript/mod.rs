// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeScript backend.

pub mod emitter;
pub mod types;

pub use emitter::{ModuleView, TypeScriptEmitter};
pub use types::TsTypeMapper;
