//! # cfnkit Resource Registry
//!
//! File: lib/src/registry.rs
//!
//! ## Overview
//!
//! Builds `ResourceProperties` from a CloudFormation type name. Kinds with a
//! dedicated variant are decoded into it; any other well-formed `AWS::`,
//! `Alexa::` or `Custom::` type name becomes `ResourceProperties::Generic`.
//! Anything else is rejected with `CfnError::UnsupportedResourceKind`, which is
//! fatal to the workflow that asked for it.
//!
use crate::error::{CfnError, Result};
use crate::resource::{
    DynamoDbTable, GenericProperties, IamRole, KinesisStream, ResourceProperties,
    Route53RecordSet, S3Bucket, SnsTopic, SqsQueue,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

type Constructor = fn(Value) -> Result<ResourceProperties>;

const TYPED_KINDS: &[(&str, Constructor)] = &[
    (IamRole::RESOURCE_TYPE, build_typed::<IamRole>),
    (DynamoDbTable::RESOURCE_TYPE, build_typed::<DynamoDbTable>),
    (KinesisStream::RESOURCE_TYPE, build_typed::<KinesisStream>),
    (Route53RecordSet::RESOURCE_TYPE, build_typed::<Route53RecordSet>),
    (S3Bucket::RESOURCE_TYPE, build_typed::<S3Bucket>),
    (SnsTopic::RESOURCE_TYPE, build_typed::<SnsTopic>),
    (SqsQueue::RESOURCE_TYPE, build_typed::<SqsQueue>),
];

fn build_typed<T>(properties: Value) -> Result<ResourceProperties>
where
    T: DeserializeOwned + Into<ResourceProperties>,
{
    let typed: T = serde_json::from_value(properties)?;
    Ok(typed.into())
}

/// Creates empty properties for `resource_type`.
///
/// # Errors
///
/// Returns `CfnError::UnsupportedResourceKind` if the type name is not registered.
pub fn create_resource_property(resource_type: &str) -> Result<ResourceProperties> {
    build_resource_property(resource_type, Value::Object(Map::new()))
}

/// Creates properties for `resource_type` from a template `Properties` block.
///
/// # Errors
///
/// Returns `CfnError::UnsupportedResourceKind` if the type name is not
/// registered, or `CfnError::Json` if `properties` does not decode.
pub fn build_resource_property(resource_type: &str, properties: Value) -> Result<ResourceProperties> {
    if let Some((_, construct)) = TYPED_KINDS.iter().find(|(name, _)| *name == resource_type) {
        return construct(properties);
    }

    if is_registered_generic(resource_type) {
        debug!(resource_type, "Using generic properties for resource type");
        let properties: Map<String, Value> = serde_json::from_value(properties)?;
        return Ok(ResourceProperties::Generic(GenericProperties {
            resource_type: resource_type.to_string(),
            properties,
        }));
    }

    error!(resource_type, "Failed to create CloudFormation resource properties");
    Err(CfnError::UnsupportedResourceKind {
        resource_type: resource_type.to_string(),
    })
}

/// Type names with a dedicated `ResourceProperties` variant.
pub fn typed_resource_types() -> impl Iterator<Item = &'static str> {
    TYPED_KINDS.iter().map(|(name, _)| *name)
}

/// `Custom::Name`, `AWS::Service::Resource` or `Alexa::Service::Resource`.
fn is_registered_generic(resource_type: &str) -> bool {
    let segments: Vec<&str> = resource_type.split("::").collect();
    let well_formed = segments
        .iter()
        .all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    if !well_formed {
        return false;
    }
    matches!(
        (segments[0], segments.len()),
        ("Custom", 2) | ("AWS", 3) | ("Alexa", 3)
    )
}
