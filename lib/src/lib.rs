//! # cfnkit
//!
//! File: lib/src/lib.rs
//!
//! ## Overview
//!
//! Template composition for CloudFormation documents:
//!
//! - `outputs`: which `Fn::GetAtt` attributes a resource exposes.
//! - `discovery`: renders the discovery document a dependent component uses to
//!   reference a resource and its attributes.
//! - `merge`: combines two templates, itemizing every logical-name collision.
//! - `resource` / `registry`: the typed resource model and the factory that
//!   builds it from a type name.
//! - `template`: the document itself.
//!
//! Everything here is synchronous and operates on owned, in-memory values.
//! Nothing is deployed or validated against AWS.
//!
//! ## Examples
//!
//! ```rust
//! use cfnkit::{merge_templates, render_discovery, Resource, SqsQueue, Template};
//!
//! # fn main() -> cfnkit::Result<()> {
//! let mut queues = Template::new();
//! queues.add_resource("MyQueue", Resource::new(SqsQueue::default()))?;
//!
//! let doc = render_discovery(&queues, "MyQueue")?.expect("declared above");
//! assert!(String::from_utf8_lossy(&doc).contains("\"QueueName\""));
//!
//! let mut stack = Template::new();
//! merge_templates(queues, &mut stack)?;
//! assert!(stack.resource("MyQueue").is_some());
//! # Ok(())
//! # }
//! ```
//!
pub mod discovery;
pub mod error;
pub mod merge;
pub mod outputs;
pub mod registry;
pub mod resource;
pub mod template;

pub use discovery::{discovery_document, render_discovery, render_discovery_with, DiscoveryDocument};
pub use error::{CfnError, Collision, Result, TemplateSection};
pub use merge::merge_templates;
pub use outputs::{resolve_outputs, OutputResolver};
pub use registry::create_resource_property;
pub use resource::{
    DynamoDbTable, GenericProperties, IamRole, KinesisStream, Resource, ResourceProperties,
    Route53RecordSet, S3Bucket, SnsTopic, SqsQueue, StreamSpecification,
};
pub use template::{Output, Template};
