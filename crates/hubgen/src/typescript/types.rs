// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type handle to TypeScript type mapping.

use crate::error::GraphError;
use crate::graph::Closure;
use crate::model::{TypeId, TypeNode};
use crate::naming::strip_arity;
use crate::provider::TypeDescriptionProvider;
use std::collections::BTreeMap;
use std::sync::Arc;

const TASK: &str = "System.Threading.Tasks.Task";
const TASK_OF: &str = "System.Threading.Tasks.Task`1";
const NULLABLE: &str = "System.Nullable`1";

const NUMBERS: &[&str] = &[
    "System.Byte",
    "System.SByte",
    "System.Int16",
    "System.UInt16",
    "System.Int32",
    "System.UInt32",
    "System.Int64",
    "System.UInt64",
    "System.Single",
    "System.Double",
    "System.Decimal",
];

const STRINGS: &[&str] = &["System.String", "System.Char", "System.Guid"];

const SEQUENCES: &[&str] = &[
    "System.Collections.Generic.List`1",
    "System.Collections.Generic.HashSet`1",
    "System.Collections.Generic.IList`1",
    "System.Collections.Generic.ICollection`1",
    "System.Collections.Generic.IEnumerable`1",
    "System.Collections.Generic.IReadOnlyList`1",
    "System.Collections.Generic.IReadOnlyCollection`1",
];

const DICTIONARIES: &[&str] = &[
    "System.Collections.Generic.Dictionary`2",
    "System.Collections.Generic.IDictionary`2",
    "System.Collections.Generic.IReadOnlyDictionary`2",
];

/// TypeScript spelling of a fixed `System` type.
fn intrinsic(id: &str) -> Option<&'static str> {
    match id {
        "System.Void" => Some("void"),
        "System.Boolean" => Some("boolean"),
        "System.Object" => Some("any"),
        TASK => Some("Promise<void>"),
        _ if NUMBERS.contains(&id) => Some("number"),
        _ if STRINGS.contains(&id) => Some("string"),
        _ => None,
    }
}

fn is_special_generic(definition: &str) -> bool {
    definition == TASK_OF
        || definition == NULLABLE
        || SEQUENCES.contains(&definition)
        || DICTIONARIES.contains(&definition)
}

/// Maps type handles to TypeScript against one closure.
pub struct TsTypeMapper<'a> {
    provider: &'a dyn TypeDescriptionProvider,
    closure: &'a Closure,
    substitutions: &'a BTreeMap<String, String>,
}

impl<'a> TsTypeMapper<'a> {
    pub fn new(
        provider: &'a dyn TypeDescriptionProvider,
        closure: &'a Closure,
        substitutions: &'a BTreeMap<String, String>,
    ) -> Self {
        Self {
            provider,
            closure,
            substitutions,
        }
    }

    fn node(&self, id: &TypeId) -> Result<Arc<TypeNode>, GraphError> {
        match self.closure.lookup(id) {
            Some(node) => Ok(Arc::clone(node)),
            None => self.provider.describe(id),
        }
    }

    /// Whether `id` maps to a built-in TypeScript spelling instead of a
    /// declaration of its own.
    pub fn is_intrinsic(&self, id: &TypeId) -> bool {
        self.substitutions.contains_key(id.as_str())
            || intrinsic(id.as_str()).is_some()
            || is_special_generic(id.as_str())
    }

    /// Whether `id` is declared by the generated module, directly or as an
    /// instance of a declared generic definition.
    pub fn is_declared(&self, id: &TypeId) -> Result<bool, GraphError> {
        if self.is_intrinsic(id) {
            return Ok(false);
        }
        let node = self.node(id)?;
        Ok(match &node.definition {
            Some(def) => self.closure.contains(def) && !self.is_intrinsic(def),
            None => self.closure.contains(id) && !node.is_wrapper(),
        })
    }

    /// TypeScript type of `id`.
    pub fn map(&self, id: &TypeId) -> Result<String, GraphError> {
        if let Some(ts) = self.substitutions.get(id.as_str()) {
            return Ok(ts.clone());
        }
        if let Some(ts) = intrinsic(id.as_str()) {
            return Ok(ts.to_string());
        }

        let node = self.node(id)?;
        if node.is_by_ref {
            return self.map_element(&node);
        }
        if node.is_array {
            return Ok(format!("{}[]", self.map_element(&node)?));
        }
        if let Some(def) = &node.definition {
            return self.map_instance(&node, def);
        }
        if node.is_generic_parameter {
            return Ok(node.name.clone());
        }
        if self.closure.contains(id) {
            return Ok(strip_arity(&node.name).to_string());
        }

        tracing::debug!("no TypeScript mapping for {}, using any", id);
        Ok("any".to_string())
    }

    /// Method return type, always asynchronous.
    pub fn map_async(&self, id: &TypeId) -> Result<String, GraphError> {
        let node = self.node(id)?;
        let is_task = id.as_str() == TASK
            || node.definition.as_ref().map(TypeId::as_str) == Some(TASK_OF);
        let ts = self.map(id)?;
        Ok(if is_task { ts } else { format!("Promise<{}>", ts) })
    }

    fn map_element(&self, node: &TypeNode) -> Result<String, GraphError> {
        match &node.element {
            Some(element) => self.map(element),
            None => Ok("any".to_string()),
        }
    }

    fn map_instance(&self, node: &TypeNode, def: &TypeId) -> Result<String, GraphError> {
        let args = node
            .generic_arguments
            .iter()
            .map(|a| self.map(a))
            .collect::<Result<Vec<_>, _>>()?;
        let arg = |i: usize| args.get(i).cloned().unwrap_or_else(|| "any".to_string());

        let def = def.as_str();
        let ts = if def == TASK_OF {
            format!("Promise<{}>", arg(0))
        } else if def == NULLABLE {
            arg(0)
        } else if SEQUENCES.contains(&def) {
            format!("{}[]", arg(0))
        } else if DICTIONARIES.contains(&def) {
            format!("{{ [key: string]: {} }}", arg(1))
        } else if let Some(ts) = self.substitutions.get(def) {
            ts.clone()
        } else if self.closure.contains(&TypeId::new(def)) {
            format!("{}<{}>", strip_arity(&node.name), args.join(", "))
        } else {
            "any".to_string()
        };
        Ok(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::compute_closure;
    use crate::model::Member;
    use crate::provider::MetadataProvider;

    fn fixture() -> (MetadataProvider, Closure) {
        let mut p = MetadataProvider::new();
        p.insert(
            TypeNode::interface("Shop.IRoot")
                .with_member(Member::property("page", "Shop.Page<Shop.Item>"))
                .with_member(Member::property("when", "System.DateTime")),
        );
        p.insert(
            TypeNode::class("Shop.Page`1")
                .with_generic_parameters(&["T"])
                .with_member(Member::property("items", "T[]")),
        );
        p.insert(TypeNode::class("Shop.Item"));
        p.insert(TypeNode::class("Vendor.Blob"));
        let closure = compute_closure(&p, &TypeId::new("Shop.IRoot"), "Shop").expect("closure");
        (p, closure)
    }

    fn subs() -> BTreeMap<String, String> {
        BTreeMap::from([("System.DateTime".to_string(), "string".to_string())])
    }

    #[test]
    fn test_primitive_mapping() {
        let (p, closure) = fixture();
        let subs = subs();
        let m = TsTypeMapper::new(&p, &closure, &subs);
        let map = |h: &str| m.map(&TypeId::new(h)).expect(h);

        assert_eq!(map("System.Int32"), "number");
        assert_eq!(map("System.Decimal"), "number");
        assert_eq!(map("System.Guid"), "string");
        assert_eq!(map("System.Boolean"), "boolean");
        assert_eq!(map("System.Object"), "any");
        assert_eq!(map("System.Void"), "void");
        assert_eq!(map("System.DateTime"), "string");
        assert_eq!(map("System.TimeSpan"), "any");
    }

    #[test]
    fn test_constructed_mapping() {
        let (p, closure) = fixture();
        let subs = subs();
        let m = TsTypeMapper::new(&p, &closure, &subs);
        let map = |h: &str| m.map(&TypeId::new(h)).expect(h);

        assert_eq!(map("System.Threading.Tasks.Task"), "Promise<void>");
        assert_eq!(
            map("System.Threading.Tasks.Task<Shop.Item>"),
            "Promise<Item>"
        );
        assert_eq!(map("Shop.Item[]"), "Item[]");
        assert_eq!(map("Shop.Item&"), "Item");
        assert_eq!(map("System.Nullable<System.Int32>"), "number");
        assert_eq!(
            map("System.Collections.Generic.IEnumerable<Shop.Item>"),
            "Item[]"
        );
        assert_eq!(
            map("System.Collections.Generic.Dictionary<System.String, Shop.Item[]>"),
            "{ [key: string]: Item[] }"
        );
        assert_eq!(map("Shop.Page<Shop.Item>"), "Page<Item>");
        assert_eq!(map("Shop.Page`1"), "Page");
        assert_eq!(map("T"), "T");
        assert_eq!(map("Vendor.Blob"), "any");
    }

    #[test]
    fn test_async_wrapping() {
        let (p, closure) = fixture();
        let subs = subs();
        let m = TsTypeMapper::new(&p, &closure, &subs);
        let map_async = |h: &str| m.map_async(&TypeId::new(h)).expect(h);

        assert_eq!(map_async("System.Void"), "Promise<void>");
        assert_eq!(map_async("System.Threading.Tasks.Task"), "Promise<void>");
        assert_eq!(map_async("System.Int32"), "Promise<number>");
        assert_eq!(
            map_async("System.Threading.Tasks.Task<System.String>"),
            "Promise<string>"
        );
    }

    #[test]
    fn test_declared_types() {
        let (p, closure) = fixture();
        let subs = subs();
        let m = TsTypeMapper::new(&p, &closure, &subs);

        assert!(m.is_declared(&TypeId::new("Shop.Item")).expect("item"));
        assert!(m.is_declared(&TypeId::new("Shop.Page<Shop.Item>")).expect("page"));
        assert!(!m.is_declared(&TypeId::new("System.String")).expect("string"));
        assert!(!m.is_declared(&TypeId::new("Vendor.Blob")).expect("blob"));
    }
}
