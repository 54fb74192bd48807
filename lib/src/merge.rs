//! # cfnkit Template Merging
//!
//! File: lib/src/merge.rs
//!
//! ## Overview
//!
//! Combines two independently built templates. Each entry of the source's
//! `Resources`, `Mappings` and `Outputs` is moved into the destination unless
//! the destination already declares that logical name, in which case the
//! destination entry is kept and the name is recorded as a collision.
//!
//! ## Failure Semantics
//!
//! The merge is not transactional. All three sections are processed before
//! reporting, so every collision is listed in one `CfnError::TemplateCollision`
//! and the non-colliding entries stay in the destination. Callers that need
//! all-or-nothing behavior should merge into a clone and swap on success.
//!
//! Only those three sections are merged. Any other section the source carries
//! (`Parameters`, `Conditions`, `Transform`, ...) is dropped with a warning
//! naming it.
//!
use crate::error::{CfnError, Collision, Result, TemplateSection};
use crate::template::Template;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Merges `source` into `destination`.
///
/// # Errors
///
/// Returns `CfnError::TemplateCollision` listing every logical name present in
/// both templates. `destination` still receives every non-colliding entry.
pub fn merge_templates(source: Template, destination: &mut Template) -> Result<()> {
    let unmerged = unmerged_sections(&source);
    if !unmerged.is_empty() {
        warn!(sections = ?unmerged, "Source template sections are not merged and were dropped");
    }

    let mut collisions = Vec::new();

    merge_section(
        TemplateSection::Resources,
        source.resources,
        &mut destination.resources,
        &mut collisions,
    );
    merge_section(
        TemplateSection::Mappings,
        source.mappings,
        &mut destination.mappings,
        &mut collisions,
    );
    merge_section(
        TemplateSection::Outputs,
        source.outputs,
        &mut destination.outputs,
        &mut collisions,
    );

    if collisions.is_empty() {
        return Ok(());
    }

    error!("Failed to update template. The following collisions were found:");
    for collision in &collisions {
        error!(section = %collision.section, name = %collision.name, "\t{}", collision);
    }
    Err(CfnError::TemplateCollision { collisions })
}

/// Top-level sections of `template` that `merge_templates` does not carry over.
fn unmerged_sections(template: &Template) -> Vec<&str> {
    let mut sections = Vec::new();
    if template.format_version.is_some() {
        sections.push("AWSTemplateFormatVersion");
    }
    if template.description.is_some() {
        sections.push("Description");
    }
    if !template.parameters.is_empty() {
        sections.push("Parameters");
    }
    if !template.conditions.is_empty() {
        sections.push("Conditions");
    }
    sections.extend(template.other.keys().map(String::as_str));
    sections
}

fn merge_section<V>(
    section: TemplateSection,
    source: BTreeMap<String, V>,
    destination: &mut BTreeMap<String, V>,
    collisions: &mut Vec<Collision>,
) {
    for (name, value) in source {
        if destination.contains_key(&name) {
            collisions.push(Collision { section, name });
        } else {
            debug!(%section, name = %name, "Merged template entry");
            destination.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, S3Bucket, SnsTopic, SqsQueue};
    use crate::template::Output;
    use serde_json::json;

    fn sample(resource: &str, mapping: &str, output: &str) -> Template {
        let mut template = Template::new();
        template
            .add_resource(resource, Resource::new(SqsQueue::default()))
            .unwrap();
        template.add_mapping(mapping, json!({ "k": { "v": 1 } })).unwrap();
        template
            .add_output(output, Output::new(json!({ "Ref": resource })))
            .unwrap();
        template
    }

    #[test]
    fn test_disjoint_merge_is_union_in_either_direction() {
        let left = sample("A", "MapA", "OutA");
        let right = sample("B", "MapB", "OutB");

        let mut into_right = right.clone();
        merge_templates(left.clone(), &mut into_right).unwrap();

        let mut into_left = left;
        merge_templates(right, &mut into_left).unwrap();

        assert_eq!(into_left, into_right);
        assert_eq!(
            into_left.resources.keys().collect::<Vec<_>>(),
            ["A", "B"]
        );
        assert_eq!(into_left.mappings.len(), 2);
        assert_eq!(into_left.outputs.len(), 2);
    }

    #[test]
    fn test_collision_keeps_destination_and_other_entries() {
        let mut source = Template::new();
        source
            .add_resource("A", Resource::new(S3Bucket::default()))
            .unwrap();
        source
            .add_resource("C", Resource::new(SnsTopic::default()))
            .unwrap();

        let mut destination = Template::new();
        destination
            .add_resource("A", Resource::new(SqsQueue::default()))
            .unwrap();

        let err = merge_templates(source, &mut destination).unwrap_err();
        assert_eq!(
            err.collisions(),
            [Collision {
                section: TemplateSection::Resources,
                name: "A".into()
            }]
        );
        assert!(err.to_string().contains("Duplicate CloudFormation resource name: A"));

        assert_eq!(destination.resources["A"].resource_type(), "AWS::SQS::Queue");
        assert_eq!(destination.resources["C"].resource_type(), "AWS::SNS::Topic");
    }

    #[test]
    fn test_all_collisions_reported() {
        let source = sample("A", "MapX", "Out");
        let mut destination = sample("A", "MapY", "Out");

        let err = merge_templates(source, &mut destination).unwrap_err();
        let sections: Vec<_> = err.collisions().iter().map(|c| c.section).collect();
        assert_eq!(sections, [TemplateSection::Resources, TemplateSection::Outputs]);
        assert!(destination.mappings.contains_key("MapX"));
        assert!(destination.mappings.contains_key("MapY"));
    }

    #[test]
    fn test_merge_empty_source() {
        let mut destination = sample("A", "M", "O");
        let before = destination.clone();
        merge_templates(Template::new(), &mut destination).unwrap();
        assert_eq!(destination, before);
    }

    #[test]
    fn test_unmerged_sections_are_named() {
        assert!(unmerged_sections(&sample("A", "M", "O")).is_empty());

        let template = Template::from_json(
            r#"{"Description":"d","Parameters":{"Stage":{"Type":"String"}},
                "Transform":"AWS::Serverless-2016-10-31","Resources":{}}"#,
        )
        .unwrap();
        assert_eq!(
            unmerged_sections(&template),
            ["Description", "Parameters", "Transform"]
        );
    }

    #[test]
    fn test_mapping_collision_message() {
        let mut source = Template::new();
        source.add_mapping("Shared", json!({})).unwrap();
        let mut destination = Template::new();
        destination.add_mapping("Shared", json!({ "a": 1 })).unwrap();

        let err = merge_templates(source, &mut destination).unwrap_err();
        assert!(err.to_string().contains("Duplicate CloudFormation Mapping name: Shared"));
        assert_eq!(destination.mappings["Shared"], json!({ "a": 1 }));
    }
}
