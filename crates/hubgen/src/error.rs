// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generation-time errors.
//!
//! Every error here aborts the run; there is no partial output.

use crate::model::TypeId;
use thiserror::Error;

/// A type handle that does not follow the handle grammar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed type handle '{handle}' at offset {position}: {reason}")]
pub struct HandleError {
    pub handle: String,
    pub position: usize,
    pub reason: &'static str,
}

/// Type graph errors.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no metadata for type '{0}'")]
    UnknownType(TypeId),

    #[error(transparent)]
    Handle(#[from] HandleError),

    #[error("inheritance chain of '{0}' loops back on itself")]
    InheritanceCycle(TypeId),
}

/// Metadata document loading errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type '{id}': {source}")]
    Handle {
        id: String,
        #[source]
        source: HandleError,
    },

    #[error("type '{0}' is defined twice")]
    Duplicate(TypeId),
}

/// TypeScript emission errors.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("root type '{0}' is not an interface")]
    RootNotInterface(TypeId),
}

/// Top-level generator errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("type graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("emit error: {0}")]
    Emit(#[from] EmitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
