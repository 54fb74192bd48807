//! # cfnkit Output Attribute Resolution
//!
//! File: lib/src/outputs.rs
//!
//! ## Overview
//!
//! Which `Fn::GetAtt` attributes a resource exposes is a static fact of the
//! CloudFormation type system, so it is kept as a dispatch table keyed by type
//! name rather than derived from the properties at runtime:
//!
//! | Type | Attributes |
//! |---|---|
//! | `AWS::IAM::Role` | (none) |
//! | `AWS::DynamoDB::Table` | `StreamArn` if a `StreamSpecification` is declared |
//! | `AWS::Kinesis::Stream` | `Arn` |
//! | `AWS::Route53::RecordSet` | (none yet) |
//! | `AWS::S3::Bucket` | `DomainName`, `WebsiteURL` |
//! | `AWS::SNS::Topic` | `TopicName` |
//! | `AWS::SQS::Queue` | `Arn`, `QueueName` |
//!
//! Resolution never fails. A type without a table entry resolves to no
//! attributes and logs a warning, so an undiscoverable dependency does not
//! block composing an otherwise valid template.
//!
//! New types are added with `OutputResolver::with_attributes`. The built-in
//! entries above cannot be replaced.
//!
use crate::resource::{
    DynamoDbTable, IamRole, KinesisStream, ResourceProperties, Route53RecordSet, S3Bucket,
    SnsTopic, SqsQueue,
};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

static BUILTIN: LazyLock<OutputResolver> = LazyLock::new(OutputResolver::builtin);

/// The shared built-in table used by `resolve_outputs` and `render_discovery`.
pub(crate) fn builtin_resolver() -> &'static OutputResolver {
    &BUILTIN
}

/// Computes attributes from the resource's own properties.
pub type AttributeFn = fn(&ResourceProperties) -> Vec<String>;

#[derive(Debug, Clone)]
enum AttributeRule {
    Fixed(Vec<String>),
    Computed(AttributeFn),
}

#[derive(Debug, Clone)]
struct TableEntry {
    rule: AttributeRule,
    builtin: bool,
}

/// Dispatch table from CloudFormation type name to exposed attributes.
#[derive(Debug, Clone)]
pub struct OutputResolver {
    table: HashMap<String, TableEntry>,
}

impl Default for OutputResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

fn dynamodb_table_attributes(props: &ResourceProperties) -> Vec<String> {
    match props {
        ResourceProperties::DynamoDbTable(table) if table.stream_specification.is_some() => {
            vec!["StreamArn".to_string()]
        }
        _ => Vec::new(),
    }
}

impl OutputResolver {
    /// A resolver holding only the built-in table.
    pub fn builtin() -> Self {
        let mut resolver = OutputResolver {
            table: HashMap::new(),
        };
        resolver.insert_builtin(IamRole::RESOURCE_TYPE, AttributeRule::Fixed(Vec::new()));
        resolver.insert_builtin(
            DynamoDbTable::RESOURCE_TYPE,
            AttributeRule::Computed(dynamodb_table_attributes),
        );
        resolver.insert_builtin(KinesisStream::RESOURCE_TYPE, fixed(&["Arn"]));
        // Record sets expose no attributes we can discover yet.
        resolver.insert_builtin(Route53RecordSet::RESOURCE_TYPE, AttributeRule::Fixed(Vec::new()));
        resolver.insert_builtin(S3Bucket::RESOURCE_TYPE, fixed(&["DomainName", "WebsiteURL"]));
        resolver.insert_builtin(SnsTopic::RESOURCE_TYPE, fixed(&["TopicName"]));
        resolver.insert_builtin(SqsQueue::RESOURCE_TYPE, fixed(&["Arn", "QueueName"]));
        resolver
    }

    fn insert_builtin(&mut self, resource_type: &str, rule: AttributeRule) {
        self.table.insert(
            resource_type.to_string(),
            TableEntry {
                rule,
                builtin: true,
            },
        );
    }

    /// Registers a fixed attribute list for `resource_type`.
    ///
    /// Returns `false` and leaves the table unchanged if `resource_type` is one
    /// of the built-in entries. A previous non-built-in entry is replaced.
    pub fn register<I, S>(&mut self, resource_type: &str, attributes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.table.get(resource_type).is_some_and(|entry| entry.builtin) {
            warn!(
                resource_type,
                "Ignoring attribute override for a built-in resource type"
            );
            return false;
        }
        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        debug!(resource_type, ?attributes, "Registered output attributes");
        self.table.insert(
            resource_type.to_string(),
            TableEntry {
                rule: AttributeRule::Fixed(attributes),
                builtin: false,
            },
        );
        true
    }

    /// Builder form of `register`.
    pub fn with_attributes<I, S>(mut self, resource_type: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(resource_type, attributes);
        self
    }

    /// Whether `resource_type` has a table entry.
    pub fn supports(&self, resource_type: &str) -> bool {
        self.table.contains_key(resource_type)
    }

    /// Attribute names `props` exposes, in table order.
    pub fn resolve(&self, props: &ResourceProperties) -> Vec<String> {
        let resource_type = props.cfn_resource_type();
        match self.table.get(resource_type).map(|entry| &entry.rule) {
            Some(AttributeRule::Fixed(attributes)) => attributes.clone(),
            Some(AttributeRule::Computed(compute)) => compute(props),
            None => {
                warn!(
                    resource_type,
                    "Discovery information for dependency not yet implemented"
                );
                Vec::new()
            }
        }
    }
}

fn fixed(attributes: &[&str]) -> AttributeRule {
    AttributeRule::Fixed(attributes.iter().map(|a| a.to_string()).collect())
}

/// Resolves attributes using the built-in table.
pub fn resolve_outputs(props: &ResourceProperties) -> Vec<String> {
    builtin_resolver().resolve(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::create_resource_property;
    use crate::resource::{GenericProperties, StreamSpecification};
    use serde_json::{json, Map};

    fn resolve_type(resource_type: &str) -> Vec<String> {
        resolve_outputs(&create_resource_property(resource_type).unwrap())
    }

    #[test]
    fn test_builtin_table() {
        assert!(resolve_type("AWS::IAM::Role").is_empty());
        assert_eq!(resolve_type("AWS::Kinesis::Stream"), ["Arn"]);
        assert!(resolve_type("AWS::Route53::RecordSet").is_empty());
        assert_eq!(resolve_type("AWS::S3::Bucket"), ["DomainName", "WebsiteURL"]);
        assert_eq!(resolve_type("AWS::SNS::Topic"), ["TopicName"]);
        assert_eq!(resolve_type("AWS::SQS::Queue"), ["Arn", "QueueName"]);
    }

    #[test]
    fn test_dynamodb_stream_dependent() {
        let without = ResourceProperties::DynamoDbTable(DynamoDbTable::default());
        assert!(resolve_outputs(&without).is_empty());

        let with = ResourceProperties::DynamoDbTable(DynamoDbTable {
            stream_specification: Some(StreamSpecification {
                stream_view_type: Some(json!({ "Ref": "ViewType" })),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(resolve_outputs(&with), ["StreamArn"]);
    }

    #[test]
    fn test_unknown_kind_is_empty() {
        assert!(resolve_type("AWS::Lambda::Function").is_empty());
        assert!(resolve_type("Custom::Thing").is_empty());
    }

    #[test]
    fn test_builtin_table_is_shared() {
        assert!(std::ptr::eq(builtin_resolver(), builtin_resolver()));
        assert!(builtin_resolver().supports("AWS::SQS::Queue"));
        assert!(!builtin_resolver().supports("AWS::Lambda::Function"));
    }

    #[test]
    fn test_register_extends_table() {
        let resolver = OutputResolver::builtin().with_attributes("AWS::Lambda::Function", ["Arn"]);
        assert!(resolver.supports("AWS::Lambda::Function"));

        let function = ResourceProperties::Generic(GenericProperties {
            resource_type: "AWS::Lambda::Function".into(),
            properties: Map::new(),
        });
        assert_eq!(resolver.resolve(&function), ["Arn"]);
    }

    #[test]
    fn test_register_cannot_override_builtin() {
        let mut resolver = OutputResolver::builtin();
        assert!(!resolver.register("AWS::SQS::Queue", ["QueueUrl"]));
        let queue = create_resource_property("AWS::SQS::Queue").unwrap();
        assert_eq!(resolver.resolve(&queue), ["Arn", "QueueName"]);
    }

    #[test]
    fn test_register_replaces_custom_entry() {
        let mut resolver = OutputResolver::builtin();
        assert!(resolver.register("Custom::Thing", ["A"]));
        assert!(resolver.register("Custom::Thing", ["B", "C"]));
        let thing = create_resource_property("Custom::Thing").unwrap();
        assert_eq!(resolver.resolve(&thing), ["B", "C"]);
    }
}
