//! # cfnkit CLI Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command handler:
//! - `config`: loading, merging, and validating `.cfnkit.toml` configuration
//! - `error`: CLI error types and the `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{CliError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
