//! # cfnkit Resource Model
//!
//! File: lib/src/resource.rs
//!
//! ## Overview
//!
//! A `Resource` is one entry of a template's `Resources` section. It owns its
//! `ResourceProperties`, a tagged variant over the resource kinds the library
//! knows about, with a `Generic` variant for every other registered kind.
//!
//! The optional `DependsOn` and `Metadata` collections are private. They start
//! out absent and are created on first write by `add_dependency` and
//! `set_metadata`, which are the only ways to mutate them. Once created they
//! are appended to or inserted into, never replaced.
//!
//! ## Serialization
//!
//! Resources use the CloudFormation JSON shape:
//!
//! ```json
//! { "Type": "AWS::SQS::Queue", "Properties": { ... }, "DependsOn": ["Other"] }
//! ```
//!
//! `Properties` is decoded through the registry, keyed by `Type`. Typed
//! variants keep property keys they do not model in an `other` map, so a
//! template survives a decode/encode cycle unchanged. Modelled fields hold a
//! `serde_json::Value` because any of them may be an intrinsic function
//! (`Ref`, `Fn::Sub`, `Fn::If`, ...) rather than a literal.
//!
//! The same applies one level up: resource attributes other than `Type`,
//! `Properties`, `DependsOn`, `Metadata`, `Condition` and `DeletionPolicy`
//! (`UpdateReplacePolicy`, `CreationPolicy`, ...) are kept in `Resource::other`.
//! `DependsOn` may be a single string on input and is always written as a list.
//!
use crate::error::{CfnError, Result};
use crate::registry;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// `AWS::IAM::Role` properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IamRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assume_role_policy_document: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_policy_arns: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl IamRole {
    pub const RESOURCE_TYPE: &'static str = "AWS::IAM::Role";
}

/// Stream configuration of a DynamoDB table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StreamSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_view_type: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `AWS::DynamoDB::Table` properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DynamoDbTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_definitions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<Value>,
    /// When present, the table exposes a `StreamArn` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_specification: Option<StreamSpecification>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl DynamoDbTable {
    pub const RESOURCE_TYPE: &'static str = "AWS::DynamoDB::Table";
}

/// `AWS::Kinesis::Stream` properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KinesisStream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_period_hours: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl KinesisStream {
    pub const RESOURCE_TYPE: &'static str = "AWS::Kinesis::Stream";
}

/// `AWS::Route53::RecordSet` properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Route53RecordSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_zone_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<Value>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Route53RecordSet {
    pub const RESOURCE_TYPE: &'static str = "AWS::Route53::RecordSet";
}

/// `AWS::S3::Bucket` properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct S3Bucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_control: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_configuration: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl S3Bucket {
    pub const RESOURCE_TYPE: &'static str = "AWS::S3::Bucket";
}

/// `AWS::SNS::Topic` properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnsTopic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SnsTopic {
    pub const RESOURCE_TYPE: &'static str = "AWS::SNS::Topic";
}

/// `AWS::SQS::Queue` properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SqsQueue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_timeout: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_retention_period: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SqsQueue {
    pub const RESOURCE_TYPE: &'static str = "AWS::SQS::Queue";
}

/// Properties of a registered kind without a dedicated variant.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericProperties {
    pub resource_type: String,
    pub properties: Map<String, Value>,
}

/// Kind-specific properties of a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceProperties {
    IamRole(IamRole),
    DynamoDbTable(DynamoDbTable),
    KinesisStream(KinesisStream),
    Route53RecordSet(Route53RecordSet),
    S3Bucket(S3Bucket),
    SnsTopic(SnsTopic),
    SqsQueue(SqsQueue),
    Generic(GenericProperties),
}

impl ResourceProperties {
    /// The CloudFormation type name, e.g. `AWS::SQS::Queue`.
    pub fn cfn_resource_type(&self) -> &str {
        match self {
            ResourceProperties::IamRole(_) => IamRole::RESOURCE_TYPE,
            ResourceProperties::DynamoDbTable(_) => DynamoDbTable::RESOURCE_TYPE,
            ResourceProperties::KinesisStream(_) => KinesisStream::RESOURCE_TYPE,
            ResourceProperties::Route53RecordSet(_) => Route53RecordSet::RESOURCE_TYPE,
            ResourceProperties::S3Bucket(_) => S3Bucket::RESOURCE_TYPE,
            ResourceProperties::SnsTopic(_) => SnsTopic::RESOURCE_TYPE,
            ResourceProperties::SqsQueue(_) => SqsQueue::RESOURCE_TYPE,
            ResourceProperties::Generic(generic) => &generic.resource_type,
        }
    }

    /// Builds properties of the given type from a template `Properties` block.
    ///
    /// # Errors
    ///
    /// `UnsupportedResourceKind` if the registry does not know `resource_type`,
    /// `Json` if the block does not match the kind's shape.
    pub fn from_value(resource_type: &str, properties: Value) -> Result<Self> {
        registry::build_resource_property(resource_type, properties)
    }
}

impl Serialize for ResourceProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ResourceProperties::IamRole(props) => props.serialize(serializer),
            ResourceProperties::DynamoDbTable(props) => props.serialize(serializer),
            ResourceProperties::KinesisStream(props) => props.serialize(serializer),
            ResourceProperties::Route53RecordSet(props) => props.serialize(serializer),
            ResourceProperties::S3Bucket(props) => props.serialize(serializer),
            ResourceProperties::SnsTopic(props) => props.serialize(serializer),
            ResourceProperties::SqsQueue(props) => props.serialize(serializer),
            ResourceProperties::Generic(generic) => generic.properties.serialize(serializer),
        }
    }
}

macro_rules! impl_from_properties {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for ResourceProperties {
                fn from(props: $variant) -> Self {
                    ResourceProperties::$variant(props)
                }
            }
        )*
    };
}

impl_from_properties!(
    IamRole,
    DynamoDbTable,
    KinesisStream,
    Route53RecordSet,
    S3Bucket,
    SnsTopic,
    SqsQueue,
);

impl From<GenericProperties> for ResourceProperties {
    fn from(props: GenericProperties) -> Self {
        ResourceProperties::Generic(props)
    }
}

/// One declared infrastructure object.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub properties: ResourceProperties,
    pub condition: Option<String>,
    pub deletion_policy: Option<String>,
    /// Resource attributes without a dedicated field.
    pub other: Map<String, Value>,
    depends_on: Option<Vec<String>>,
    metadata: Option<BTreeMap<String, Value>>,
}

impl Resource {
    pub fn new(properties: impl Into<ResourceProperties>) -> Self {
        Self {
            properties: properties.into(),
            condition: None,
            deletion_policy: None,
            other: Map::new(),
            depends_on: None,
            metadata: None,
        }
    }

    pub fn resource_type(&self) -> &str {
        self.properties.cfn_resource_type()
    }

    /// Logical names this resource depends on, or `None` if none were ever added.
    pub fn depends_on(&self) -> Option<&[String]> {
        self.depends_on.as_deref()
    }

    pub fn metadata(&self) -> Option<&BTreeMap<String, Value>> {
        self.metadata.as_ref()
    }

    /// Appends `dependency` to `DependsOn`, creating the list first if absent.
    ///
    /// Duplicates are kept: independent callers may add the same dependency.
    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        self.depends_on
            .get_or_insert_with(Vec::new)
            .push(dependency.into());
    }

    /// Sets `Metadata[key]`, creating the map first if absent. Overwrites any
    /// previous value for `key`.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceRepr<'a> {
    #[serde(rename = "Type")]
    resource_type: &'a str,
    properties: &'a ResourceProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    depends_on: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deletion_policy: Option<&'a String>,
    #[serde(flatten)]
    other: &'a Map<String, Value>,
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ResourceRepr {
            resource_type: self.resource_type(),
            properties: &self.properties,
            depends_on: self.depends_on.as_ref(),
            metadata: self.metadata.as_ref(),
            condition: self.condition.as_ref(),
            deletion_policy: self.deletion_policy.as_ref(),
            other: &self.other,
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DependsOnRepr {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawResource {
    #[serde(rename = "Type")]
    resource_type: String,
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    depends_on: Option<DependsOnRepr>,
    #[serde(default)]
    metadata: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    deletion_policy: Option<String>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawResource::deserialize(deserializer)?;
        let block = raw
            .properties
            .unwrap_or_else(|| Value::Object(Map::new()));
        let properties = ResourceProperties::from_value(&raw.resource_type, block).map_err(
            |err| match err {
                CfnError::Json { source } => D::Error::custom(source),
                other => D::Error::custom(other),
            },
        )?;

        Ok(Resource {
            properties,
            condition: raw.condition,
            deletion_policy: raw.deletion_policy,
            other: raw.other,
            depends_on: raw.depends_on.map(|deps| match deps {
                DependsOnRepr::One(name) => vec![name],
                DependsOnRepr::Many(names) => names,
            }),
            metadata: raw.metadata,
        })
    }
}
