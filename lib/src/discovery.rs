//! # cfnkit Discovery Documents
//!
//! File: lib/src/discovery.rs
//!
//! ## Overview
//!
//! A discovery document tells a dependent component how to refer to a
//! resource and to each of its runtime attributes before the resource exists:
//!
//! ```text
//! {
//!     "ResourceID" : "MyQueue",
//!     "ResourceRef" : "{"Ref":"MyQueue"}",
//!     "ResourceType" : "AWS::SQS::Queue",
//!     "Properties" : {
//!         "Arn" :"{ "Fn::GetAtt" : [ "MyQueue", "Arn" ] }","QueueName" :"{ "Fn::GetAtt" : [ "MyQueue", "QueueName" ] }"
//!     }
//! }
//! ```
//!
//! The reference expressions are literal text inside JSON string values, not
//! nested JSON. Consumers pattern-match them, so the layout (tab indentation,
//! spacing, `,` joined properties) is fixed.
//!
//! ## Placeholders
//!
//! The document is produced from a fixed pattern with `<< .Field >>`
//! placeholders. The generated fragment may itself pass through an outer
//! `{{ }}` templating step, so the pattern must not use that syntax.
//! Substitution is a small scanner: an unclosed or unknown placeholder is a
//! `CfnError::Rendering` and no output is produced.
//!
use crate::error::{CfnError, Result};
use crate::outputs::{builtin_resolver, OutputResolver};
use crate::template::Template;
use tracing::debug;

const PLACEHOLDER_OPEN: &str = "<<";
const PLACEHOLDER_CLOSE: &str = ">>";

const DISCOVERY_DOCUMENT_PATTERN: &str = concat!(
    "\n",
    "\t{\n",
    "\t\t\"ResourceID\" : \"<< .ResourceID >>\",\n",
    "\t\t\"ResourceRef\" : \"{\"Ref\":\"<< .ResourceID >>\"}\",\n",
    "\t\t\"ResourceType\" : \"<< .ResourceType >>\",\n",
    "\t\t\"Properties\" : {\n",
    "\t\t\t<< .ResourceProperties >>\n",
    "\t\t}\n",
    "\t}\n",
);

/// Describes one resource and its queryable attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryDocument {
    pub resource_id: String,
    pub resource_ref: String,
    pub resource_type: String,
    /// Attribute name to `Fn::GetAtt` expression, in resolver order.
    pub properties: Vec<(String, String)>,
}

impl DiscoveryDocument {
    pub fn new(logical_name: &str, resource_type: &str, attributes: &[String]) -> Self {
        let properties = attributes
            .iter()
            .map(|attr| (attr.clone(), get_att_expression(logical_name, attr)))
            .collect();
        Self {
            resource_id: logical_name.to_string(),
            resource_ref: format!("{{\"Ref\":\"{logical_name}\"}}"),
            resource_type: resource_type.to_string(),
            properties,
        }
    }

    /// Renders the document into its wire form.
    pub fn render(&self) -> Result<Vec<u8>> {
        let text = substitute(DISCOVERY_DOCUMENT_PATTERN, |field| self.field(field))?;
        Ok(text.into_bytes())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            ".ResourceID" => Some(self.resource_id.clone()),
            ".ResourceType" => Some(self.resource_type.clone()),
            ".ResourceProperties" => Some(self.quoted_properties()),
            _ => None,
        }
    }

    fn quoted_properties(&self) -> String {
        self.properties
            .iter()
            .map(|(attr, expr)| format!("\"{attr}\" :\"{expr}\""))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn get_att_expression(logical_name: &str, attribute: &str) -> String {
    format!("{{ \"Fn::GetAtt\" : [ \"{logical_name}\", \"{attribute}\" ] }}")
}

/// Replaces every `<< name >>` in `pattern` with `lookup(name)`.
fn substitute<F>(pattern: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + PLACEHOLDER_OPEN.len()..];
        let Some(end) = after_open.find(PLACEHOLDER_CLOSE) else {
            return Err(CfnError::Rendering(format!(
                "unclosed placeholder in pattern at byte {}",
                pattern.len() - rest.len() + start
            )));
        };
        let name = after_open[..end].trim();
        let value = lookup(name)
            .ok_or_else(|| CfnError::Rendering(format!("unknown placeholder: {name}")))?;
        out.push_str(&value);
        rest = &after_open[end + PLACEHOLDER_CLOSE.len()..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Builds the discovery document for `logical_name`, or `None` if the template
/// does not declare it.
pub fn discovery_document(
    template: &Template,
    logical_name: &str,
    resolver: &OutputResolver,
) -> Option<DiscoveryDocument> {
    let resource = template.resources.get(logical_name)?;
    let attributes = resolver.resolve(&resource.properties);
    Some(DiscoveryDocument::new(
        logical_name,
        resource.resource_type(),
        &attributes,
    ))
}

/// Renders the discovery document for `logical_name` with the built-in
/// attribute table.
///
/// Returns `Ok(None)` when the template has no such resource.
pub fn render_discovery(template: &Template, logical_name: &str) -> Result<Option<Vec<u8>>> {
    render_discovery_with(builtin_resolver(), template, logical_name)
}

/// `render_discovery` with a caller-supplied attribute table.
pub fn render_discovery_with(
    resolver: &OutputResolver,
    template: &Template,
    logical_name: &str,
) -> Result<Option<Vec<u8>>> {
    let Some(document) = discovery_document(template, logical_name, resolver) else {
        debug!(logical_name, "No resource to discover");
        return Ok(None);
    };
    debug!(
        logical_name,
        resource_type = %document.resource_type,
        attributes = document.properties.len(),
        "Rendering discovery document"
    );
    document.render().map(Some)
}
