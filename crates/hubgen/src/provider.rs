// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type description providers.
//!
//! The graph algorithms only see [`TypeDescriptionProvider`]. The bundled
//! [`MetadataProvider`] serves type definitions loaded from a YAML or JSON
//! metadata document, a set of well-known `System` types, and synthesizes
//! array, by-ref and generic instance nodes from their handles.

use crate::error::{GraphError, MetadataError};
use crate::handle::{self, TypeExpr};
use crate::model::{EnumValue, Member, TypeId, TypeKind, TypeNode};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Source of type descriptions.
pub trait TypeDescriptionProvider {
    /// Describe the type behind `id`.
    ///
    /// An unknown or malformed handle is an error; callers abort on it.
    fn describe(&self, id: &TypeId) -> Result<Arc<TypeNode>, GraphError>;
}

/// One type definition in a metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Full name, e.g. `Orders.Order` or ``Orders.Page`1``.
    pub id: String,

    /// Simple name; derived from `id` when absent.
    #[serde(default)]
    pub name: Option<String>,

    /// Namespace; derived from `id` when absent.
    #[serde(default)]
    pub namespace: Option<String>,

    pub kind: TypeKind,

    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub members: Vec<Member>,

    /// Type parameters of a generic definition (`["T"]`).
    #[serde(default)]
    pub generic_parameters: Vec<String>,

    #[serde(default)]
    pub enum_values: Vec<EnumValue>,
}

/// Metadata document: the reflection snapshot of an assembly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

impl MetadataDocument {
    pub fn from_yaml_str(s: &str) -> Result<Self, MetadataError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a document; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}

/// Well-known types every document may reference without defining.
const WELL_KNOWN_CLASSES: &[&str] = &["System.Object", "System.String", "System.Uri"];

const WELL_KNOWN_VALUES: &[&str] = &[
    "System.Void",
    "System.Boolean",
    "System.Char",
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
    "System.Guid",
    "System.DateTime",
    "System.DateTimeOffset",
    "System.TimeSpan",
];

const WELL_KNOWN_GENERICS: &[(&str, TypeKind, &[&str])] = &[
    ("System.Nullable`1", TypeKind::Other, &["T"]),
    ("System.Threading.Tasks.Task`1", TypeKind::Class, &["TResult"]),
    ("System.Collections.Generic.List`1", TypeKind::Class, &["T"]),
    ("System.Collections.Generic.HashSet`1", TypeKind::Class, &["T"]),
    ("System.Collections.Generic.IList`1", TypeKind::Interface, &["T"]),
    ("System.Collections.Generic.ICollection`1", TypeKind::Interface, &["T"]),
    ("System.Collections.Generic.IEnumerable`1", TypeKind::Interface, &["T"]),
    ("System.Collections.Generic.IReadOnlyList`1", TypeKind::Interface, &["T"]),
    (
        "System.Collections.Generic.IReadOnlyCollection`1",
        TypeKind::Interface,
        &["T"],
    ),
    (
        "System.Collections.Generic.Dictionary`2",
        TypeKind::Class,
        &["TKey", "TValue"],
    ),
    (
        "System.Collections.Generic.IDictionary`2",
        TypeKind::Interface,
        &["TKey", "TValue"],
    ),
    (
        "System.Collections.Generic.IReadOnlyDictionary`2",
        TypeKind::Interface,
        &["TKey", "TValue"],
    ),
];

/// Provider backed by a metadata document.
pub struct MetadataProvider {
    definitions: HashMap<TypeId, Arc<TypeNode>>,
    /// Arrays, by-ref wrappers and generic instances, built on first use
    constructed: DashMap<TypeId, Arc<TypeNode>>,
}

impl Default for MetadataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider {
    /// Provider with the well-known `System` types only.
    pub fn new() -> Self {
        let mut provider = Self {
            definitions: HashMap::new(),
            constructed: DashMap::new(),
        };

        for id in WELL_KNOWN_CLASSES {
            let mut node = TypeNode::class(*id);
            if *id != "System.Object" {
                node.base = Some(TypeId::new("System.Object"));
            }
            provider.insert(node);
        }
        for id in WELL_KNOWN_VALUES {
            provider.insert(TypeNode::new(*id, TypeKind::Other));
        }
        provider.insert(TypeNode::class("System.Threading.Tasks.Task").with_base("System.Object"));
        for (id, kind, params) in WELL_KNOWN_GENERICS {
            provider.insert(TypeNode::new(*id, *kind).with_generic_parameters(params));
        }
        provider
    }

    /// Provider with the well-known types plus every definition of `doc`.
    pub fn from_document(doc: MetadataDocument) -> Result<Self, MetadataError> {
        let mut provider = Self::new();
        let mut seen = std::collections::HashSet::new();

        for def in doc.types {
            let node = definition_to_node(def)?;
            if !seen.insert(node.id.clone()) {
                return Err(MetadataError::Duplicate(node.id));
            }
            provider.insert(node);
        }

        tracing::debug!("metadata provider loaded {} types", provider.len());
        Ok(provider)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        Self::from_document(MetadataDocument::from_file(path)?)
    }

    /// Register `node`, replacing a previous definition and declaring its
    /// generic parameters.
    pub fn insert(&mut self, node: TypeNode) {
        for param in &node.generic_parameters {
            let id = TypeId::new(param.clone());
            self.definitions.entry(id.clone()).or_insert_with(|| {
                let mut p = TypeNode::new(id, TypeKind::Other);
                p.is_generic_parameter = true;
                Arc::new(p)
            });
        }
        self.constructed.clear();
        self.definitions.insert(node.id.clone(), Arc::new(node));
    }

    /// Number of defined (not constructed) types.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition of a generic instance name: `Page` resolves to ``Page`1``.
    fn generic_definition(&self, name: &str, arity: usize) -> Option<&Arc<TypeNode>> {
        self.definitions
            .get(&TypeId::new(format!("{name}`{arity}")))
            .or_else(|| self.definitions.get(&TypeId::new(name)))
    }

    fn construct(&self, id: &TypeId, expr: &TypeExpr) -> Result<Arc<TypeNode>, GraphError> {
        let node = match expr {
            TypeExpr::Named { name, args } if args.is_empty() => {
                return self
                    .definitions
                    .get(&TypeId::new(name.clone()))
                    .cloned()
                    .ok_or_else(|| GraphError::UnknownType(id.clone()));
            }
            TypeExpr::Named { name, args } => {
                let def = self
                    .generic_definition(name, args.len())
                    .ok_or_else(|| GraphError::UnknownType(id.clone()))?;
                let mut node = TypeNode::new(id.clone(), def.kind);
                node.name = def.name.clone();
                node.namespace = def.namespace.clone();
                node.definition = Some(def.id.clone());
                node.generic_arguments = args.iter().map(|a| TypeId::new(a.to_string())).collect();
                node
            }
            TypeExpr::Array(inner) | TypeExpr::ByRef(inner) => {
                let element = self.describe(&TypeId::new(inner.to_string()))?;
                let mut node = TypeNode::new(id.clone(), TypeKind::Class);
                node.namespace = element.namespace.clone();
                node.element = Some(element.id.clone());
                if matches!(expr, TypeExpr::Array(_)) {
                    node.name = format!("{}[]", element.name);
                    node.is_array = true;
                } else {
                    node.name = format!("{}&", element.name);
                    node.kind = element.kind;
                    node.is_by_ref = true;
                }
                node
            }
        };

        let node = Arc::new(node);
        self.constructed.insert(id.clone(), Arc::clone(&node));
        Ok(node)
    }
}

impl TypeDescriptionProvider for MetadataProvider {
    fn describe(&self, id: &TypeId) -> Result<Arc<TypeNode>, GraphError> {
        if let Some(node) = self.definitions.get(id) {
            return Ok(Arc::clone(node));
        }
        if let Some(node) = self.constructed.get(id) {
            return Ok(Arc::clone(node.value()));
        }

        let expr = handle::parse(id.as_str())?;
        let normalized = TypeId::new(expr.to_string());
        if normalized != *id {
            return self.describe(&normalized);
        }
        self.construct(id, &expr)
    }
}

fn normalize_ref(owner: &str, handle: &str) -> Result<TypeId, MetadataError> {
    TypeId::parse(handle).map_err(|source| MetadataError::Handle {
        id: owner.to_string(),
        source,
    })
}

fn definition_to_node(def: TypeDefinition) -> Result<TypeNode, MetadataError> {
    let owner = def.id.clone();
    let id = normalize_ref(&owner, &def.id)?;

    let mut node = TypeNode::new(id, def.kind);
    if let Some(name) = def.name {
        node.name = name;
    }
    if def.namespace.is_some() {
        node.namespace = def.namespace;
    }
    node.base = def
        .base
        .as_deref()
        .map(|b| normalize_ref(&owner, b))
        .transpose()?;
    node.interfaces = def
        .interfaces
        .iter()
        .map(|i| normalize_ref(&owner, i))
        .collect::<Result<_, _>>()?;
    node.members = def
        .members
        .into_iter()
        .map(|member| normalize_member(&owner, member))
        .collect::<Result<_, _>>()?;
    node.generic_parameters = def.generic_parameters;
    node.enum_values = def.enum_values;
    Ok(node)
}

fn normalize_member(owner: &str, member: Member) -> Result<Member, MetadataError> {
    Ok(match member {
        Member::Property { name, ty } => Member::Property {
            name,
            ty: normalize_ref(owner, ty.as_str())?,
        },
        Member::Method {
            name,
            parameters,
            returns,
        } => Member::Method {
            name,
            parameters: parameters
                .into_iter()
                .map(|mut p| {
                    p.ty = normalize_ref(owner, p.ty.as_str())?;
                    Ok(p)
                })
                .collect::<Result<_, MetadataError>>()?,
            returns: normalize_ref(owner, returns.as_str())?,
        },
    })
}
