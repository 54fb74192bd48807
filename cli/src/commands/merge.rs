//! # cfnkit Merge Command
//!
//! File: cli/src/commands/merge.rs
//!
//! ## Overview
//!
//! Implements `cfnkit merge`, which adds every resource, mapping and output of
//! SOURCE to DESTINATION and prints the combined template.
//!
//! A logical name declared in both files is never overwritten. If any such
//! collision exists the command fails, listing all of them, and writes
//! nothing. (The partially merged document only exists in memory.)
//!
//! ## Examples
//!
//! ```bash
//! cfnkit merge lambda.json stack.json
//! cfnkit merge lambda.json stack.json -o build/stack.json --compact
//! ```
//!
use super::load_template;
use crate::common::fs::io;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use cfnkit::merge_templates;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `cfnkit merge`.
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Template whose entries are added.
    source: PathBuf,
    /// Template that receives the entries.
    destination: PathBuf,
    /// Write the merged template to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Emit compact JSON even if the configuration asks for pretty output.
    #[arg(long)]
    compact: bool,
}

/// Handles `cfnkit merge`.
///
/// # Errors
///
/// Fails if configuration or either template cannot be loaded, if the merge
/// finds collisions, or if the output cannot be written.
pub fn handle_merge(args: MergeArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load cfnkit configuration")?;

    let source = load_template(&args.source)?;
    let mut destination = load_template(&args.destination)?;

    merge_templates(source, &mut destination).with_context(|| {
        format!(
            "Failed to merge '{}' into '{}'",
            args.source.display(),
            args.destination.display()
        )
    })?;

    let json = if cfg.output.pretty() && !args.compact {
        destination.to_json_pretty()?
    } else {
        destination.to_json()?
    };

    match &args.output {
        Some(path) => {
            io::write_string_to_file(path, &json)?;
            info!("Merged template written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_merge_args() {
        let args =
            MergeArgs::try_parse_from(["merge", "a.json", "b.json", "-o", "out.json"]).unwrap();
        assert_eq!(args.source, PathBuf::from("a.json"));
        assert_eq!(args.destination, PathBuf::from("b.json"));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(!args.compact);
    }

    #[test]
    fn test_merge_requires_two_templates() {
        assert!(MergeArgs::try_parse_from(["merge", "a.json"]).is_err());
    }
}
