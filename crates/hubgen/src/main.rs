// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! hubgen CLI
//!
//! Generates a TypeScript hub invoker and callback client from .NET type
//! metadata.
//!
//! # Usage
//!
//! ```bash
//! # Write an example configuration
//! hubgen gen-config -o hubgen.toml
//!
//! # Generate the module configured in hubgen.toml
//! hubgen generate -c hubgen.toml
//!
//! # Override metadata and output
//! hubgen generate -c hubgen.toml -m build/orders.yaml -o web/src/order-hub.ts
//!
//! # Inspect the closure and emission order
//! hubgen closure -c hubgen.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hubgen::{HubGenConfig, HubGenerator, MetadataProvider};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// TypeScript hub client generator
#[derive(Parser, Debug)]
#[command(name = "hubgen")]
#[command(about = "hubgen - TypeScript hub invokers and callback clients from .NET metadata")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error); defaults to the
    /// configuration's log_level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the TypeScript module
    Generate {
        /// Configuration file path
        #[arg(short, long, default_value = "hubgen.toml")]
        config: PathBuf,

        /// Metadata document (overrides the configuration)
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Output file (overrides the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the type closure in emission order
    Closure {
        /// Configuration file path
        #[arg(short, long, default_value = "hubgen.toml")]
        config: PathBuf,

        /// Metadata document (overrides the configuration)
        #[arg(short, long)]
        metadata: Option<PathBuf>,
    },

    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "hubgen.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            config,
            metadata,
            output,
        } => cmd_generate(&config, metadata, output, args.log_level),
        Commands::Closure { config, metadata } => cmd_closure(&config, metadata, args.log_level),
        Commands::GenConfig { output } => {
            init_logging(args.log_level.as_deref().unwrap_or("info"));
            cmd_gen_config(&output)
        }
        Commands::Validate { config } => {
            init_logging(args.log_level.as_deref().unwrap_or("info"));
            cmd_validate(&config)
        }
    }
}

/// Load the configuration and start logging at the effective level.
fn load_config(path: &Path, log_level: Option<String>) -> Result<HubGenConfig> {
    let config = HubGenConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))?;
    init_logging(log_level.as_deref().unwrap_or(&config.log_level));
    tracing::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Paths in the configuration are relative to the configuration file.
fn relative_to(config_path: &Path, path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

fn load_metadata(
    config_path: &Path,
    config: &HubGenConfig,
    metadata: Option<PathBuf>,
) -> Result<MetadataProvider> {
    let path = match metadata {
        Some(path) => path,
        None => config
            .metadata
            .as_deref()
            .map(|p| relative_to(config_path, p))
            .context("No metadata document (set `metadata` or pass --metadata)")?,
    };
    tracing::info!("loading metadata from {}", path.display());
    MetadataProvider::from_file(&path)
        .with_context(|| format!("Failed to load metadata {}", path.display()))
}

fn cmd_generate(
    config_path: &Path,
    metadata: Option<PathBuf>,
    output: Option<PathBuf>,
    log_level: Option<String>,
) -> Result<()> {
    let config = load_config(config_path, log_level)?;
    let provider = load_metadata(config_path, &config, metadata)?;

    let module = HubGenerator::new(&config, &provider)
        .generate()
        .context("Generation failed")?;

    let output = output.or_else(|| {
        config
            .output
            .as_deref()
            .map(|p| relative_to(config_path, p))
    });
    match output {
        Some(path) => {
            module
                .write_to(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            module.report.summary();
            println!("Generated {}", path.display());
        }
        None => print!("{}", module.source),
    }
    Ok(())
}

fn cmd_closure(config_path: &Path, metadata: Option<PathBuf>, log_level: Option<String>) -> Result<()> {
    let config = load_config(config_path, log_level)?;
    let provider = load_metadata(config_path, &config, metadata)?;

    let plan = HubGenerator::new(&config, &provider)
        .plan()
        .context("Closure computation failed")?;

    println!("Server: {}", plan.server);
    println!("Client: {}", plan.client);
    println!("Closure ({} types):", plan.closure.len());
    for node in plan.order.sorted(&plan.closure) {
        let index = plan
            .order
            .order_of(&node.id)
            .map_or_else(|| "-".to_string(), |i| i.to_string());
        println!("  [{:>3}] {}", index, node.id);
    }
    Ok(())
}

fn cmd_gen_config(output: &Path) -> Result<()> {
    let config = HubGenConfig::example();
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

    let content = format!(
        r#"# hubgen Configuration
# Generated by hubgen gen-config

{}
"#,
        toml_str
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Generated configuration file: {}", output.display());
    Ok(())
}

fn cmd_validate(config_path: &Path) -> Result<()> {
    match HubGenConfig::from_file(config_path) {
        Ok(config) => {
            println!("Configuration valid!");
            println!();
            println!("Server: {}", config.hub.server);
            println!("Client: {}", config.hub.client);
            println!("Path:   {}", config.hub.path);
            println!(
                "Filter: {}",
                if config.hub.namespace_filter.is_empty() {
                    "(all namespaces)"
                } else {
                    &config.hub.namespace_filter
                }
            );
            println!(
                "Queue:  {} calls, {}s timeout, {}s drain interval",
                config.queue.max_queue_count,
                config.queue.queue_timeout_secs,
                config.queue.offline_queue_interval_secs
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Configuration invalid: {}", e);
            std::process::exit(1);
        }
    }
}
