//! # cfnkit Error Types
//!
//! File: lib/src/error.rs
//!
//! ## Overview
//!
//! This module defines the error type returned by every fallible operation in
//! the library. Errors are always returned to the caller, never swallowed:
//!
//! - `UnsupportedResourceKind`: the registry cannot build properties for a type name.
//! - `TemplateCollision`: a merge found duplicate logical names. Every collision
//!   found during the merge is carried, not just the first.
//! - `Rendering`: the discovery document pattern could not be evaluated.
//! - `Json`: a template could not be encoded or decoded.
//!
//! Resolving outputs for a kind the library does not know is deliberately *not*
//! an error; see `outputs`.
//!
use std::fmt;
use thiserror::Error;

/// The three template collections that take part in a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateSection {
    Resources,
    Mappings,
    Outputs,
}

impl fmt::Display for TemplateSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateSection::Resources => "Resources",
            TemplateSection::Mappings => "Mappings",
            TemplateSection::Outputs => "Outputs",
        };
        f.write_str(name)
    }
}

/// A logical name that exists in both templates of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub section: TemplateSection,
    pub name: String,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section {
            TemplateSection::Resources => {
                write!(f, "Duplicate CloudFormation resource name: {}", self.name)
            }
            TemplateSection::Mappings => {
                write!(f, "Duplicate CloudFormation Mapping name: {}", self.name)
            }
            TemplateSection::Outputs => {
                write!(f, "Duplicate CloudFormation output key name: {}", self.name)
            }
        }
    }
}

/// Error type for all library operations.
#[derive(Error, Debug)]
pub enum CfnError {
    #[error("Unsupported resource type: {resource_type}")]
    UnsupportedResourceKind { resource_type: String },

    #[error("Template merge failed: {}", format_collisions(.collisions))]
    TemplateCollision { collisions: Vec<Collision> },

    #[error("Discovery document rendering failed: {0}")]
    Rendering(String),

    #[error("Template JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl CfnError {
    /// Returns the itemized collisions if this is a merge failure.
    pub fn collisions(&self) -> &[Collision] {
        match self {
            CfnError::TemplateCollision { collisions } => collisions,
            _ => &[],
        }
    }
}

fn format_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CfnError>;
