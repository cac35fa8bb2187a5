// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Emission order: every type after all of its ancestors.

use crate::error::GraphError;
use crate::graph::Closure;
use crate::model::{TypeId, TypeKind, TypeNode};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Emission index per type. Lower indices are emitted first.
#[derive(Debug, Clone, Default)]
pub struct EmissionOrder {
    index: HashMap<TypeId, usize>,
}

impl EmissionOrder {
    pub fn order_of(&self, id: &TypeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Closure members sorted by emission index.
    pub fn sorted<'a>(&self, closure: &'a Closure) -> Vec<&'a Arc<TypeNode>> {
        let mut nodes: Vec<_> = closure.iter().collect();
        nodes.sort_by_key(|n| self.order_of(&n.id).unwrap_or(usize::MAX));
        nodes
    }
}

/// Base chain of `node`, most derived first. A generic instance continues
/// through its definition, so ``Page`1`` follows `Page<Order>`.
fn base_chain(closure: &Closure, node: &Arc<TypeNode>) -> Result<Vec<TypeId>, GraphError> {
    let mut chain = vec![node.id.clone()];
    if node.kind != TypeKind::Class {
        return Ok(chain);
    }

    let mut seen: HashSet<TypeId> = HashSet::from([node.id.clone()]);
    let mut current = Arc::clone(node);
    while let Some(next) = current.definition.clone().or_else(|| current.base.clone()) {
        if !seen.insert(next.clone()) {
            return Err(GraphError::InheritanceCycle(node.id.clone()));
        }
        chain.push(next.clone());
        match closure.lookup(&next) {
            Some(found) => current = Arc::clone(found),
            None => break,
        }
    }
    Ok(chain)
}

/// Assign emission indices: walk the base chain of every closure member in
/// closure order, reverse it, concatenate, and number each type by its first
/// occurrence. Ties keep first-discovery order.
pub fn assign_order(closure: &Closure) -> Result<EmissionOrder, GraphError> {
    let mut index = HashMap::new();
    for node in closure.iter() {
        let mut chain = base_chain(closure, node)?;
        chain.reverse();
        for id in chain {
            let next = index.len();
            index.entry(id).or_insert(next);
        }
    }
    Ok(EmissionOrder { index })
}
