//! # cfnkit Template Document
//!
//! File: lib/src/template.rs
//!
//! ## Overview
//!
//! The in-memory form of a CloudFormation template. `Resources`, `Mappings`
//! and `Outputs` are keyed by logical name and take part in merging; the other
//! top-level sections are carried through unchanged. Sections without a field
//! of their own (`Transform`, `Metadata`, `Rules`, ...) land in `other`.
//!
//! Collections are `BTreeMap`s, so encoding a template always yields the same
//! key order regardless of how it was assembled.
//!
use crate::error::{CfnError, Collision, Result, TemplateSection};
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One entry of the `Outputs` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Output {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            description: None,
            value: value.into(),
            export: None,
            condition: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub format_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub conditions: Map<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mappings: BTreeMap<String, Value>,
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a template from CloudFormation JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Declares a resource. Fails instead of replacing an existing one.
    pub fn add_resource(&mut self, name: impl Into<String>, resource: Resource) -> Result<()> {
        insert_unique(&mut self.resources, TemplateSection::Resources, name.into(), resource)
    }

    /// Declares a mapping. Fails instead of replacing an existing one.
    pub fn add_mapping(&mut self, name: impl Into<String>, mapping: Value) -> Result<()> {
        insert_unique(&mut self.mappings, TemplateSection::Mappings, name.into(), mapping)
    }

    /// Declares an output. Fails instead of replacing an existing one.
    pub fn add_output(&mut self, name: impl Into<String>, output: Output) -> Result<()> {
        insert_unique(&mut self.outputs, TemplateSection::Outputs, name.into(), output)
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn resource_mut(&mut self, name: &str) -> Option<&mut Resource> {
        self.resources.get_mut(name)
    }
}

fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    section: TemplateSection,
    name: String,
    value: V,
) -> Result<()> {
    if map.contains_key(&name) {
        return Err(CfnError::TemplateCollision {
            collisions: vec![Collision { section, name }],
        });
    }
    map.insert(name, value);
    Ok(())
}
