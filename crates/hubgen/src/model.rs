// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type description model.

use crate::error::HandleError;
use crate::handle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a type (e.g. `Orders.Order`, `Orders.Order[]`,
/// `System.Threading.Tasks.Task<Orders.OrderId>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    /// Wrap a handle that is already normalized.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Parse and normalize `handle`.
    pub fn parse(handle: &str) -> Result<Self, HandleError> {
        handle::normalize(handle).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Enum,
    Interface,
    Other,
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeId,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeId>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Public member signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "lowercase")]
pub enum Member {
    Property {
        name: String,
        #[serde(rename = "type")]
        ty: TypeId,
    },
    Method {
        name: String,
        #[serde(default)]
        parameters: Vec<Parameter>,
        #[serde(default = "void_type")]
        returns: TypeId,
    },
}

fn void_type() -> TypeId {
    TypeId::new("System.Void")
}

impl Member {
    pub fn property(name: impl Into<String>, ty: impl Into<TypeId>) -> Self {
        Self::Property {
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn method(
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        returns: impl Into<TypeId>,
    ) -> Self {
        Self::Method {
            name: name.into(),
            parameters,
            returns: returns.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Property { name, .. } | Self::Method { name, .. } => name,
        }
    }

    /// Types this member mentions: the property type, or the return type
    /// followed by the parameter types.
    pub fn referenced_types(&self) -> Vec<&TypeId> {
        match self {
            Self::Property { ty, .. } => vec![ty],
            Self::Method {
                parameters,
                returns,
                ..
            } => std::iter::once(returns)
                .chain(parameters.iter().map(|p| &p.ty))
                .collect(),
        }
    }
}

/// Enumeration member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// A described type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub id: TypeId,
    /// Simple name (`Order`, ``Page`1``, `Order[]`)
    pub name: String,
    pub namespace: Option<String>,
    pub kind: TypeKind,
    pub base: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub members: Vec<Member>,
    /// Declared type parameters of a generic definition
    pub generic_parameters: Vec<String>,
    /// Arguments of a generic instance
    pub generic_arguments: Vec<TypeId>,
    /// Generic definition of an instance
    pub definition: Option<TypeId>,
    /// Wrapped type of an array or by-ref wrapper
    pub element: Option<TypeId>,
    pub is_by_ref: bool,
    pub is_array: bool,
    pub is_generic_parameter: bool,
    pub enum_values: Vec<EnumValue>,
}

impl TypeNode {
    pub fn new(id: impl Into<TypeId>, kind: TypeKind) -> Self {
        let id = id.into();
        let (namespace, name) = split_full_name(id.as_str());
        Self {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            id,
            kind,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            generic_parameters: Vec::new(),
            generic_arguments: Vec::new(),
            definition: None,
            element: None,
            is_by_ref: false,
            is_array: false,
            is_generic_parameter: false,
            enum_values: Vec::new(),
        }
    }

    pub fn class(id: impl Into<TypeId>) -> Self {
        Self::new(id, TypeKind::Class)
    }

    pub fn interface(id: impl Into<TypeId>) -> Self {
        Self::new(id, TypeKind::Interface)
    }

    pub fn enumeration(id: impl Into<TypeId>) -> Self {
        Self::new(id, TypeKind::Enum)
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<TypeId>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<TypeId>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_generic_parameters(mut self, params: &[&str]) -> Self {
        self.generic_parameters = params.iter().map(|p| p.to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_enum_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.enum_values.push(EnumValue {
            name: name.into(),
            value,
        });
        self
    }

    /// Array and by-ref wrappers are transport artifacts, never declared.
    pub fn is_wrapper(&self) -> bool {
        self.is_array || self.is_by_ref
    }

    pub fn is_generic_instance(&self) -> bool {
        self.definition.is_some()
    }

    /// Namespace prefix filter. A type without a namespace never matches.
    pub fn matches_namespace(&self, filter: &str) -> bool {
        self.namespace
            .as_deref()
            .is_some_and(|ns| ns.starts_with(filter))
    }

    pub fn methods(&self) -> impl Iterator<Item = (&str, &[Parameter], &TypeId)> {
        self.members.iter().filter_map(|m| match m {
            Member::Method {
                name,
                parameters,
                returns,
            } => Some((name.as_str(), parameters.as_slice(), returns)),
            Member::Property { .. } => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &TypeId)> {
        self.members.iter().filter_map(|m| match m {
            Member::Property { name, ty } => Some((name.as_str(), ty)),
            Member::Method { .. } => None,
        })
    }
}

/// Split `Orders.Sub.Order` into (`Orders.Sub`, `Order`).
///
/// Dots inside generic brackets are ignored.
pub fn split_full_name(full: &str) -> (Option<&str>, &str) {
    let head = full.find('<').map_or(full, |i| &full[..i]);
    match head.rfind('.') {
        Some(i) => (Some(&full[..i]), &full[i + 1..]),
        None => (None, full),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_name() {
        assert_eq!(split_full_name("Orders.Order"), (Some("Orders"), "Order"));
        assert_eq!(
            split_full_name("Orders.Sub.Page`1"),
            (Some("Orders.Sub"), "Page`1")
        );
        assert_eq!(split_full_name("T"), (None, "T"));
        assert_eq!(
            split_full_name("System.Collections.Generic.List<Orders.Item>"),
            (Some("System.Collections.Generic"), "List<Orders.Item>")
        );
    }

    #[test]
    fn test_namespace_filter() {
        let node = TypeNode::class("Orders.Models.Order");
        assert!(node.matches_namespace("Orders"));
        assert!(node.matches_namespace(""));
        assert!(!node.matches_namespace("Billing"));

        let param = TypeNode::new("T", TypeKind::Other);
        assert!(!param.matches_namespace(""));
    }

    #[test]
    fn test_member_references() {
        let m = Member::method(
            "placeOrder",
            vec![Parameter::new("order", "Orders.Order")],
            "System.Threading.Tasks.Task<Orders.OrderId>",
        );
        let refs: Vec<&str> = m.referenced_types().iter().map(|t| t.as_str()).collect();
        assert_eq!(
            refs,
            vec!["System.Threading.Tasks.Task<Orders.OrderId>", "Orders.Order"]
        );
    }

    #[test]
    fn test_member_yaml_shape() {
        let yaml = "- member: property\n  name: total\n  type: System.Decimal\n- member: method\n  name: cancel\n";
        let members: Vec<Member> = serde_yaml::from_str(yaml).expect("members");
        assert_eq!(members[0], Member::property("total", "System.Decimal"));
        assert_eq!(members[1], Member::method("cancel", Vec::new(), "System.Void"));
    }
}
