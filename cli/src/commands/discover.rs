//! # cfnkit Discover Command
//!
//! File: cli/src/commands/discover.rs
//!
//! ## Overview
//!
//! Implements `cfnkit discover`, which prints the discovery document for one
//! resource of a template. A logical name the template does not declare is not
//! an error: nothing is printed and the command succeeds.
//!
//! Attribute lists come from the built-in table plus any
//! `[discovery.attributes]` entries in the configuration.
//!
use super::load_template;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use cfnkit::render_discovery_with;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `cfnkit discover`.
#[derive(Parser, Debug)]
pub struct DiscoverArgs {
    /// Template declaring the resource.
    template: PathBuf,
    /// Logical name of the resource to describe.
    logical_name: String,
}

pub fn handle_discover(args: DiscoverArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load cfnkit configuration")?;
    let template = load_template(&args.template)?;
    let resolver = cfg.output_resolver();

    let document = render_discovery_with(&resolver, &template, &args.logical_name)
        .with_context(|| format!("Failed to render discovery for '{}'", args.logical_name))?;

    match document {
        Some(bytes) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .context("Failed to write discovery document")?;
            stdout.flush()?;
        }
        None => info!(
            "'{}' is not declared in {}; nothing to discover.",
            args.logical_name,
            args.template.display()
        ),
    }
    Ok(())
}
