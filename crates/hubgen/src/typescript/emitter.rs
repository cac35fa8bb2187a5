// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeScript module emission.
//!
//! A [`ModuleView`] is built from the closure and emission order, then
//! rendered through the embedded tera templates.

use super::types::TsTypeMapper;
use crate::config::HubGenConfig;
use crate::error::{EmitError, GraphError};
use crate::graph::Closure;
use crate::model::{Parameter, TypeId, TypeKind, TypeNode};
use crate::naming::{artifact_name, dispatcher_field, lower_first, strip_arity};
use crate::order::EmissionOrder;
use crate::provider::TypeDescriptionProvider;
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("module.ts", include_str!("templates/module.ts")),
    ("declarations.ts", include_str!("templates/declarations.ts")),
    ("invoker.ts", include_str!("templates/invoker.ts")),
    ("client.ts", include_str!("templates/client.ts")),
];

#[derive(Debug, Clone, Serialize)]
pub struct ImportsView {
    pub signalr_module: String,
    pub events_module: String,
    pub provider_type: String,
    pub provider_module: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyView {
    pub max_queue_count: usize,
    pub queue_timeout_secs: u64,
    pub offline_queue_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyView {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodView {
    /// Emitted identifier
    pub name: String,
    /// Remote operation name, always exact
    pub remote: String,
    /// `order: Order, note: string`
    pub params: String,
    /// `, order, note`, appended after the operation name
    pub args: String,
    pub returns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumValueView {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeclarationView {
    pub id: String,
    /// `enum` or `interface`
    pub kind: &'static str,
    pub name: String,
    /// `<T>` for generic definitions
    pub generics: String,
    pub extends: Vec<String>,
    pub properties: Vec<PropertyView>,
    pub methods: Vec<MethodView>,
    pub enum_values: Vec<EnumValueView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HubView {
    pub interface_name: String,
    pub artifact: String,
    pub invoker: String,
    pub path: String,
    pub methods: Vec<MethodView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallbackView {
    pub name: String,
    pub remote: String,
    pub field: String,
    pub params: String,
    pub dispatcher: String,
    /// Dispatch argument: empty, a bare name, or a tuple
    pub payload: String,
    /// `, a, b` appended to the receive log call
    pub log_args: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    pub artifact: String,
    pub callbacks: Vec<CallbackView>,
}

/// Everything the templates render.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleView {
    pub version: &'static str,
    pub imports: ImportsView,
    pub policy: PolicyView,
    pub declarations: Vec<DeclarationView>,
    pub hub: HubView,
    pub client: ClientView,
}

impl ModuleView {
    /// Build the view of one hub pair.
    pub fn build(
        config: &HubGenConfig,
        provider: &dyn TypeDescriptionProvider,
        closure: &Closure,
        order: &EmissionOrder,
    ) -> Result<Self, EmitError> {
        let mapper = TsTypeMapper::new(provider, closure, &config.substitutions);
        let camel = config.emit.camel_case_members;

        let server = root(provider, &config.hub.server)?;
        let client = root(provider, &config.hub.client)?;

        let mut declarations = Vec::new();
        for node in order.sorted(closure) {
            if is_emitted(&mapper, node) {
                declarations.push(declaration(&mapper, node, camel)?);
            }
        }

        let hub_methods = server
            .methods()
            .map(|(name, params, returns)| {
                Ok(MethodView {
                    name: member_name(name, camel),
                    remote: name.to_string(),
                    params: param_list(&mapper, params)?,
                    args: params.iter().map(|p| format!(", {}", p.name)).collect(),
                    returns: mapper.map_async(returns)?,
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        let callbacks = client
            .methods()
            .map(|(name, params, _)| callback(&mapper, name, params, camel))
            .collect::<Result<Vec<_>, GraphError>>()?;

        let artifact = artifact_name(&server.name);
        Ok(Self {
            version: env!("CARGO_PKG_VERSION"),
            imports: ImportsView {
                signalr_module: config.imports.signalr_module.clone(),
                events_module: config.imports.events_module.clone(),
                provider_type: config.imports.connection_provider_type.clone(),
                provider_module: config.imports.connection_provider_module.clone(),
            },
            policy: PolicyView {
                max_queue_count: config.queue.max_queue_count,
                queue_timeout_secs: config.queue.queue_timeout_secs,
                offline_queue_interval_secs: config.queue.offline_queue_interval_secs,
            },
            declarations,
            hub: HubView {
                interface_name: strip_arity(&server.name).to_string(),
                invoker: format!("{}Invoker", artifact),
                artifact,
                path: config.hub.path.clone(),
                methods: hub_methods,
            },
            client: ClientView {
                artifact: artifact_name(&client.name),
                callbacks,
            },
        })
    }
}

fn root(provider: &dyn TypeDescriptionProvider, handle: &str) -> Result<Arc<TypeNode>, EmitError> {
    let id = TypeId::parse(handle).map_err(GraphError::from)?;
    let node = provider.describe(&id)?;
    if node.kind != TypeKind::Interface {
        return Err(EmitError::RootNotInterface(id));
    }
    Ok(node)
}

/// Generic instances, type parameters and `System` intrinsics are spelled
/// inline, never declared.
fn is_emitted(mapper: &TsTypeMapper<'_>, node: &TypeNode) -> bool {
    !(node.is_wrapper()
        || node.is_generic_instance()
        || node.is_generic_parameter
        || mapper.is_intrinsic(&node.id))
}

fn member_name(name: &str, camel: bool) -> String {
    if camel {
        lower_first(name)
    } else {
        name.to_string()
    }
}

fn param_list(mapper: &TsTypeMapper<'_>, params: &[Parameter]) -> Result<String, GraphError> {
    let parts = params
        .iter()
        .map(|p| Ok(format!("{}: {}", p.name, mapper.map(&p.ty)?)))
        .collect::<Result<Vec<_>, GraphError>>()?;
    Ok(parts.join(", "))
}

fn declaration(
    mapper: &TsTypeMapper<'_>,
    node: &TypeNode,
    camel: bool,
) -> Result<DeclarationView, GraphError> {
    let name = strip_arity(&node.name).to_string();
    let generics = if node.generic_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", node.generic_parameters.join(", "))
    };

    if node.kind == TypeKind::Enum {
        return Ok(DeclarationView {
            id: node.id.to_string(),
            kind: "enum",
            name,
            generics: String::new(),
            extends: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            enum_values: node
                .enum_values
                .iter()
                .map(|v| EnumValueView {
                    name: v.name.clone(),
                    value: v.value,
                })
                .collect(),
        });
    }

    let mut extends = Vec::new();
    for parent in node.base.iter().chain(node.interfaces.iter()) {
        if mapper.is_declared(parent)? {
            extends.push(mapper.map(parent)?);
        }
    }

    let properties = node
        .properties()
        .map(|(prop, ty)| {
            Ok(PropertyView {
                name: member_name(prop, camel),
                ty: mapper.map(ty)?,
            })
        })
        .collect::<Result<Vec<_>, GraphError>>()?;

    let methods = node
        .methods()
        .map(|(method, params, returns)| {
            Ok(MethodView {
                name: member_name(method, camel),
                remote: method.to_string(),
                params: param_list(mapper, params)?,
                args: String::new(),
                returns: mapper.map(returns)?,
            })
        })
        .collect::<Result<Vec<_>, GraphError>>()?;

    Ok(DeclarationView {
        id: node.id.to_string(),
        kind: "interface",
        name,
        generics,
        extends,
        properties,
        methods,
        enum_values: Vec::new(),
    })
}

fn callback(
    mapper: &TsTypeMapper<'_>,
    name: &str,
    params: &[Parameter],
    camel: bool,
) -> Result<CallbackView, GraphError> {
    let types = params
        .iter()
        .map(|p| mapper.map(&p.ty))
        .collect::<Result<Vec<_>, GraphError>>()?;
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();

    let (dispatcher, payload) = match types.len() {
        0 => ("SignalDispatcher".to_string(), String::new()),
        1 => (
            format!("SimpleEventDispatcher<{}>", types[0]),
            names[0].to_string(),
        ),
        _ => (
            format!("SimpleEventDispatcher<[{}]>", types.join(", ")),
            format!("[{}]", names.join(", ")),
        ),
    };

    Ok(CallbackView {
        name: member_name(name, camel),
        remote: name.to_string(),
        field: dispatcher_field(name),
        params: param_list(mapper, params)?,
        dispatcher,
        payload,
        log_args: names.iter().map(|n| format!(", {n}")).collect(),
    })
}

/// Renders [`ModuleView`]s with the embedded templates.
pub struct TypeScriptEmitter {
    tera: Tera,
}

impl TypeScriptEmitter {
    pub fn new() -> Result<Self, EmitError> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &ModuleView) -> Result<String, EmitError> {
        let ctx = Context::from_serialize(view)?;
        Ok(self.tera.render("module.ts", &ctx)?)
    }
}
