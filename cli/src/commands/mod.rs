//! # cfnkit Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the `cfnkit` CLI and the
//! small helpers they share. Each command defines its own Clap arguments
//! struct and a `handle_*` function invoked from `main.rs`.
//!
//! ## Commands
//!
//! - `merge`: merge one template into another, reporting every collision
//! - `discover`: print the discovery document for a resource
//! - `outputs`: list the output attributes each resource exposes
//!

/// `cfnkit discover <TEMPLATE> <LOGICAL_NAME>`.
pub mod discover;
/// `cfnkit merge <SOURCE> <DESTINATION>`.
pub mod merge;
/// `cfnkit outputs <TEMPLATE> [LOGICAL_NAME]`.
pub mod outputs;

use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use cfnkit::Template;
use std::path::Path;
use tracing::debug;

/// Reads and decodes a CloudFormation JSON template.
pub(crate) fn load_template(path: &Path) -> Result<Template> {
    let text = io::read_file_to_string(path)?;
    let template = Template::from_json(&text)
        .with_context(|| format!("Failed to parse template {}", path.display()))?;
    debug!(
        "Loaded template {} ({} resources, {} mappings, {} outputs)",
        path.display(),
        template.resources.len(),
        template.mappings.len(),
        template.outputs.len()
    );
    Ok(template)
}
