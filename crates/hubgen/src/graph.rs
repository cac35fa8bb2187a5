// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type graph closure.
//!
//! Walks everything reachable from a root type through interfaces, base
//! types and member signatures, then keeps the types inside the namespace
//! filter. The walk itself is unfiltered: a `List<Orders.Item>` outside the
//! filter still leads to `Orders.Item`.

use crate::error::GraphError;
use crate::model::{TypeId, TypeNode};
use crate::provider::TypeDescriptionProvider;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Types reachable from one or more roots, in first-discovery order.
#[derive(Debug, Clone, Default)]
pub struct Closure {
    members: IndexMap<TypeId, Arc<TypeNode>>,
    /// Every node seen by the walk, filtered or not
    known: HashMap<TypeId, Arc<TypeNode>>,
}

impl Closure {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.members.contains_key(id)
    }

    pub fn get(&self, id: &TypeId) -> Option<&Arc<TypeNode>> {
        self.members.get(id)
    }

    /// Any node seen while walking, including filtered-out ones.
    pub fn lookup(&self, id: &TypeId) -> Option<&Arc<TypeNode>> {
        self.members.get(id).or_else(|| self.known.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeNode>> {
        self.members.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TypeId> {
        self.members.keys()
    }

    /// Union with `other`; first discovery wins the position.
    pub fn union(&mut self, other: Closure) {
        for (id, node) in other.members {
            self.members.entry(id).or_insert(node);
        }
        for (id, node) in other.known {
            self.known.entry(id).or_insert(node);
        }
    }

    /// Remove `id` from the members, keeping the order of the rest.
    pub fn remove(&mut self, id: &TypeId) -> Option<Arc<TypeNode>> {
        self.members.shift_remove(id)
    }
}

/// Candidate references of `node`, in discovery order: interfaces, base,
/// member types (each followed by its generic arguments), then the wrapped
/// element, generic definition and arguments of constructed types.
fn references(
    provider: &dyn TypeDescriptionProvider,
    node: &TypeNode,
) -> Result<Vec<TypeId>, GraphError> {
    let mut out = Vec::new();
    out.extend(node.interfaces.iter().cloned());
    out.extend(node.base.iter().cloned());

    for member in &node.members {
        for ty in member.referenced_types() {
            out.push(ty.clone());
            let referenced = provider.describe(ty)?;
            out.extend(referenced.generic_arguments.iter().cloned());
        }
    }

    out.extend(node.element.iter().cloned());
    out.extend(node.definition.iter().cloned());
    out.extend(node.generic_arguments.iter().cloned());
    Ok(out)
}

/// Closure of `root` restricted to `namespace_filter`.
///
/// The root is part of the result (last in order) so callers can tell it
/// was visited; [`hub_closure`] removes it again.
pub fn compute_closure(
    provider: &dyn TypeDescriptionProvider,
    root: &TypeId,
    namespace_filter: &str,
) -> Result<Closure, GraphError> {
    let mut visited: HashSet<TypeId> = HashSet::new();
    let mut discovered: IndexMap<TypeId, Arc<TypeNode>> = IndexMap::new();
    let mut stack = vec![root.clone()];

    while let Some(id) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let node = provider.describe(&id)?;
        let candidates = references(provider, &node)?;
        for candidate in candidates.into_iter().rev() {
            if !visited.contains(&candidate) {
                stack.push(candidate);
            }
        }
        discovered.insert(id, node);
    }

    let mut closure = Closure::default();
    for (id, node) in &discovered {
        if id == root {
            continue;
        }
        if node.matches_namespace(namespace_filter) && !node.is_wrapper() {
            closure.members.insert(id.clone(), Arc::clone(node));
        }
    }
    if let Some(node) = discovered.get(root) {
        closure.members.insert(root.clone(), Arc::clone(node));
    }

    tracing::debug!(
        "closure of {}: {} visited, {} kept (filter '{}')",
        root,
        discovered.len(),
        closure.members.len(),
        namespace_filter
    );

    closure.known = discovered.into_iter().collect();
    Ok(closure)
}

/// Union of the closures of both roots, without the roots.
pub fn hub_closure(
    provider: &dyn TypeDescriptionProvider,
    server: &TypeId,
    client: &TypeId,
    namespace_filter: &str,
) -> Result<Closure, GraphError> {
    let mut closure = compute_closure(provider, server, namespace_filter)?;
    closure.union(compute_closure(provider, client, namespace_filter)?);
    closure.remove(server);
    closure.remove(client);
    Ok(closure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, Parameter};
    use crate::provider::MetadataProvider;

    fn ids(closure: &Closure) -> Vec<&str> {
        closure.ids().map(TypeId::as_str).collect()
    }

    fn orders() -> MetadataProvider {
        let mut p = MetadataProvider::new();
        p.insert(
            TypeNode::interface("Orders.IOrderHub").with_member(Member::method(
                "placeOrder",
                vec![Parameter::new("order", "Orders.Order")],
                "System.Threading.Tasks.Task<Orders.OrderId>",
            )),
        );
        p.insert(
            TypeNode::interface("Orders.IOrderClient").with_member(Member::method(
                "orderConfirmed",
                vec![Parameter::new("id", "Orders.OrderId")],
                "System.Void",
            )),
        );
        p.insert(
            TypeNode::class("Orders.Order")
                .with_base("Orders.Entity")
                .with_member(Member::property(
                    "lines",
                    "System.Collections.Generic.List<Orders.OrderLine>",
                ))
                .with_member(Member::property("status", "Orders.Status"))
                .with_member(Member::property("tags", "System.String[]")),
        );
        p.insert(TypeNode::class("Orders.Entity").with_base("System.Object"));
        p.insert(TypeNode::class("Orders.OrderId").with_base("System.Object"));
        p.insert(
            TypeNode::class("Orders.OrderLine")
                .with_member(Member::property("sku", "System.String"))
                .with_member(Member::property("history", "Orders.OrderLine[]")),
        );
        p.insert(TypeNode::enumeration("Orders.Status").with_enum_value("Open", 0));
        p.insert(TypeNode::class("Billing.Invoice"));
        p
    }

    #[test]
    fn test_closure_completeness() {
        let p = orders();
        let closure = hub_closure(
            &p,
            &TypeId::new("Orders.IOrderHub"),
            &TypeId::new("Orders.IOrderClient"),
            "Orders",
        )
        .expect("closure");

        for expected in [
            "Orders.Order",
            "Orders.Entity",
            "Orders.OrderId",
            "Orders.OrderLine",
            "Orders.Status",
        ] {
            assert!(closure.contains(&TypeId::new(expected)), "{expected} missing");
        }
        assert_eq!(closure.len(), 5);
        assert!(!closure.contains(&TypeId::new("Orders.IOrderHub")));
        assert!(!closure.contains(&TypeId::new("Orders.IOrderClient")));
        assert!(!closure.contains(&TypeId::new("Orders.OrderLine[]")));
        assert!(!closure.contains(&TypeId::new("System.String")));
    }

    #[test]
    fn test_closure_discovery_order() {
        let p = orders();
        let closure =
            compute_closure(&p, &TypeId::new("Orders.IOrderHub"), "Orders").expect("closure");
        assert_eq!(
            ids(&closure),
            vec![
                "Orders.OrderId",
                "Orders.Order",
                "Orders.Entity",
                "Orders.OrderLine",
                "Orders.Status",
                "Orders.IOrderHub",
            ]
        );
    }

    #[test]
    fn test_closure_idempotent() {
        let p = orders();
        let root = TypeId::new("Orders.IOrderHub");
        let a = compute_closure(&p, &root, "Orders").expect("a");
        let b = compute_closure(&p, &root, "Orders").expect("b");
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_empty_filter_keeps_namespaced_types() {
        let p = orders();
        let closure =
            compute_closure(&p, &TypeId::new("Orders.IOrderHub"), "").expect("closure");
        assert!(closure.contains(&TypeId::new("System.String")));
        assert!(closure.contains(&TypeId::new("System.Collections.Generic.List<Orders.OrderLine>")));
        assert!(!closure.contains(&TypeId::new("System.String[]")));
        // Generic parameters carry no namespace
        assert!(!closure.contains(&TypeId::new("T")));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut p = MetadataProvider::new();
        p.insert(TypeNode::interface("Graph.IRoot").with_member(Member::property("a", "Graph.A")));
        p.insert(TypeNode::class("Graph.A").with_member(Member::property("b", "Graph.B")));
        p.insert(
            TypeNode::class("Graph.B")
                .with_member(Member::property("a", "Graph.A"))
                .with_member(Member::property("me", "Graph.B")),
        );

        let closure = compute_closure(&p, &TypeId::new("Graph.IRoot"), "Graph").expect("closure");
        assert_eq!(ids(&closure), vec!["Graph.A", "Graph.B", "Graph.IRoot"]);
    }

    #[test]
    fn test_memberless_type_reached_via_interface() {
        let mut p = MetadataProvider::new();
        p.insert(TypeNode::interface("App.IRoot").with_interface("App.IMarker"));
        p.insert(TypeNode::interface("App.IMarker"));

        let closure = compute_closure(&p, &TypeId::new("App.IRoot"), "App").expect("closure");
        assert!(closure.contains(&TypeId::new("App.IMarker")));
    }

    #[test]
    fn test_traversal_passes_through_filtered_types() {
        let mut p = MetadataProvider::new();
        p.insert(
            TypeNode::interface("App.IRoot").with_member(Member::property("ext", "Vendor.Wrapper")),
        );
        p.insert(TypeNode::class("Vendor.Wrapper").with_member(Member::property("inner", "App.Inner")));
        p.insert(TypeNode::class("App.Inner"));

        let closure = compute_closure(&p, &TypeId::new("App.IRoot"), "App").expect("closure");
        assert!(closure.contains(&TypeId::new("App.Inner")));
        assert!(!closure.contains(&TypeId::new("Vendor.Wrapper")));
        assert!(closure.lookup(&TypeId::new("Vendor.Wrapper")).is_some());
    }

    #[test]
    fn test_missing_metadata_aborts() {
        let mut p = MetadataProvider::new();
        p.insert(
            TypeNode::interface("App.IRoot").with_member(Member::property("x", "App.Missing")),
        );
        let err = compute_closure(&p, &TypeId::new("App.IRoot"), "App").unwrap_err();
        assert!(matches!(err, GraphError::UnknownType(id) if id.as_str() == "App.Missing"));
    }

    #[test]
    fn test_union_deduplicates_shared_types() {
        let p = orders();
        let server = compute_closure(&p, &TypeId::new("Orders.IOrderHub"), "Orders").expect("s");
        let client =
            compute_closure(&p, &TypeId::new("Orders.IOrderClient"), "Orders").expect("c");
        assert!(client.contains(&TypeId::new("Orders.OrderId")));

        let mut union = server.clone();
        union.union(client);
        assert_eq!(union.len(), server.len() + 1);
    }
}
