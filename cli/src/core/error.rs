//! # cfnkit CLI Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! Errors raised by the command-line layer itself. Library failures arrive as
//! `cfnkit::CfnError` and are wrapped with context by `anyhow`; the variants
//! here cover what only the CLI can get wrong:
//!
//! - Configuration errors (unreadable or invalid `.cfnkit.toml`)
//! - Filesystem errors
//! - Lookups of logical names that the template does not declare
//!
//! `Result<T>` aliases `anyhow::Result<T>` so handlers can attach context with
//! `.with_context(...)` and downcast to either error type when they need to.
//!
use thiserror::Error;

/// Custom error type for the cfnkit CLI.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Resource '{name}' not found in template.")]
    ResourceNotFound { name: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = CliError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let not_found = CliError::ResourceNotFound {
            name: "MyQueue".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "Resource 'MyQueue' not found in template."
        );
    }
}
