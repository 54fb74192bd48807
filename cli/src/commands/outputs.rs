//! # cfnkit Outputs Command
//!
//! File: cli/src/commands/outputs.rs
//!
//! ## Overview
//!
//! Implements `cfnkit outputs`, which lists the `Fn::GetAtt` attributes each
//! resource of a template exposes, one line per resource:
//!
//! ```text
//! MyQueue (AWS::SQS::Queue): Arn, QueueName
//! Role (AWS::IAM::Role): (none)
//! ```
//!
use super::load_template;
use crate::core::config;
use crate::core::error::{CliError, Result};
use anyhow::Context;
use cfnkit::{OutputResolver, Resource};
use clap::Parser;
use std::path::PathBuf;

/// Arguments for `cfnkit outputs`.
#[derive(Parser, Debug)]
pub struct OutputsArgs {
    /// Template to inspect.
    template: PathBuf,
    /// Only show this resource.
    logical_name: Option<String>,
}

pub fn handle_outputs(args: OutputsArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load cfnkit configuration")?;
    let template = load_template(&args.template)?;
    let resolver = cfg.output_resolver();

    match &args.logical_name {
        Some(name) => {
            let resource = template
                .resource(name)
                .ok_or_else(|| CliError::ResourceNotFound { name: name.clone() })?;
            println!("{}", describe(&resolver, name, resource));
        }
        None => {
            for (name, resource) in &template.resources {
                println!("{}", describe(&resolver, name, resource));
            }
        }
    }
    Ok(())
}

fn describe(resolver: &OutputResolver, name: &str, resource: &Resource) -> String {
    let attributes = resolver.resolve(&resource.properties);
    let listed = if attributes.is_empty() {
        "(none)".to_string()
    } else {
        attributes.join(", ")
    };
    format!("{} ({}): {}", name, resource.resource_type(), listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfnkit::{IamRole, S3Bucket};

    #[test]
    fn test_describe_lines() {
        let resolver = OutputResolver::builtin();
        assert_eq!(
            describe(&resolver, "Site", &Resource::new(S3Bucket::default())),
            "Site (AWS::S3::Bucket): DomainName, WebsiteURL"
        );
        assert_eq!(
            describe(&resolver, "Role", &Resource::new(IamRole::default())),
            "Role (AWS::IAM::Role): (none)"
        );
    }

    #[test]
    fn test_parses_optional_name() {
        let args = OutputsArgs::try_parse_from(["outputs", "stack.json"]).unwrap();
        assert!(args.logical_name.is_none());
        let args = OutputsArgs::try_parse_from(["outputs", "stack.json", "Queue"]).unwrap();
        assert_eq!(args.logical_name.as_deref(), Some("Queue"));
    }
}
