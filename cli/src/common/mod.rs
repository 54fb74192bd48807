//! # cfnkit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by the command handlers that are not specific to any
//! one command. Template logic itself lives in the `cfnkit` library crate; this
//! module only holds the CLI-side plumbing around it.
//!
//! - **`fs`**: reading template files and writing merged output.
//!

/// Utilities for filesystem operations (reading and writing files).
pub mod fs;
