// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end generation: closure, order, view, render.

use crate::config::HubGenConfig;
use crate::error::{GenerateError, GraphError};
use crate::graph::{hub_closure, Closure};
use crate::model::TypeId;
use crate::order::{assign_order, EmissionOrder};
use crate::provider::TypeDescriptionProvider;
use crate::typescript::{ModuleView, TypeScriptEmitter};
use std::fs;
use std::path::Path;

/// Closure and emission order of one hub pair.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub server: TypeId,
    pub client: TypeId,
    pub closure: Closure,
    pub order: EmissionOrder,
}

/// Summary of one generated module.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub declarations: Vec<String>,
    pub hub_operations: Vec<String>,
    pub callbacks: Vec<String>,
}

impl GenerationReport {
    pub fn summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("  hubgen Generation Report");
        println!("{}", "=".repeat(60));
        println!();
        println!("  [OK] Declarations:    {}", self.declarations.len());
        println!("  [OK] Hub operations:  {}", self.hub_operations.len());
        println!("  [OK] Callbacks:       {}", self.callbacks.len());
        println!();
        println!("{}", "=".repeat(60));
    }
}

/// Generated TypeScript module.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub source: String,
    pub report: GenerationReport,
}

impl GeneratedModule {
    /// Write the module, creating parent directories.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), GenerateError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &self.source)?;
        tracing::info!("wrote {} ({} bytes)", path.display(), self.source.len());
        Ok(())
    }
}

/// Generator for one configured hub pair.
pub struct HubGenerator<'a> {
    config: &'a HubGenConfig,
    provider: &'a dyn TypeDescriptionProvider,
}

impl<'a> HubGenerator<'a> {
    pub fn new(config: &'a HubGenConfig, provider: &'a dyn TypeDescriptionProvider) -> Self {
        Self { config, provider }
    }

    /// Compute the closure and emission order.
    pub fn plan(&self) -> Result<GenerationPlan, GenerateError> {
        self.config.validate()?;
        let server = TypeId::parse(&self.config.hub.server).map_err(GraphError::from)?;
        let client = TypeId::parse(&self.config.hub.client).map_err(GraphError::from)?;

        let closure = hub_closure(
            self.provider,
            &server,
            &client,
            &self.config.hub.namespace_filter,
        )?;
        let order = assign_order(&closure)?;
        tracing::info!(
            "{} / {}: {} types in closure",
            server,
            client,
            closure.len()
        );

        Ok(GenerationPlan {
            server,
            client,
            closure,
            order,
        })
    }

    /// Generate the TypeScript module.
    pub fn generate(&self) -> Result<GeneratedModule, GenerateError> {
        let plan = self.plan()?;
        let view = ModuleView::build(self.config, self.provider, &plan.closure, &plan.order)?;
        let source = TypeScriptEmitter::new()?.render(&view)?;

        let report = GenerationReport {
            declarations: view.declarations.iter().map(|d| d.id.clone()).collect(),
            hub_operations: view.hub.methods.iter().map(|m| m.remote.clone()).collect(),
            callbacks: view.client.callbacks.iter().map(|c| c.remote.clone()).collect(),
        };
        tracing::info!(
            "rendered {}Invoker and {} ({} declarations)",
            view.hub.artifact,
            view.client.artifact,
            report.declarations.len()
        );

        Ok(GeneratedModule { source, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, Parameter, TypeNode};
    use crate::provider::MetadataProvider;

    fn provider() -> MetadataProvider {
        let mut p = MetadataProvider::new();
        p.insert(TypeNode::interface("Feed.IFeedHub").with_member(Member::method(
            "Subscribe",
            vec![Parameter::new("topic", "Feed.Topic")],
            "System.Void",
        )));
        p.insert(TypeNode::interface("Feed.IFeedClient").with_member(Member::method(
            "Published",
            vec![Parameter::new("item", "Feed.Item")],
            "System.Void",
        )));
        p.insert(TypeNode::class("Feed.Topic"));
        p.insert(TypeNode::class("Feed.Item").with_member(Member::property("topic", "Feed.Topic")));
        p
    }

    #[test]
    fn test_plan_excludes_roots() {
        let p = provider();
        let mut config = HubGenConfig::for_hub("Feed.IFeedHub", "Feed.IFeedClient");
        config.hub.namespace_filter = "Feed".into();

        let plan = HubGenerator::new(&config, &p).plan().expect("plan");
        assert_eq!(plan.closure.len(), 2);
        assert!(!plan.closure.contains(&plan.server));
        assert!(!plan.closure.contains(&plan.client));
    }

    #[test]
    fn test_generate_report() {
        let p = provider();
        let config = HubGenConfig::for_hub("Feed.IFeedHub", "Feed.IFeedClient");
        let module = HubGenerator::new(&config, &p).generate().expect("generate");

        assert_eq!(module.report.hub_operations, vec!["Subscribe"]);
        assert_eq!(module.report.callbacks, vec!["Published"]);
        assert!(module.source.contains("export class FeedHubInvoker implements IFeedHub"));
        assert!(module.source.contains("export class FeedClient {"));
    }

    #[test]
    fn test_invalid_config_rejected_before_traversal() {
        let p = provider();
        let config = HubGenConfig::for_hub("Feed.IFeedHub", "");
        assert!(matches!(
            HubGenerator::new(&config, &p).plan(),
            Err(GenerateError::Config(_))
        ));
    }

    #[test]
    fn test_missing_type_fails_generation() {
        let mut p = provider();
        p.insert(TypeNode::interface("Feed.IFeedHub").with_member(Member::property(
            "broken",
            "Feed.Nowhere",
        )));
        let config = HubGenConfig::for_hub("Feed.IFeedHub", "Feed.IFeedClient");
        assert!(matches!(
            HubGenerator::new(&config, &p).generate(),
            Err(GenerateError::Graph(GraphError::UnknownType(_)))
        ));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/out/feed.ts");
        let module = GeneratedModule {
            source: "export {};\n".into(),
            report: GenerationReport::default(),
        };
        module.write_to(&path).expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "export {};\n");
    }
}
