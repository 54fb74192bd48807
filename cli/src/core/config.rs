//! # cfnkit Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for the `cfnkit` binary,
//! handling loading, merging, and validation of optional TOML settings.
//!
//! Configuration sources (in order of precedence):
//! 1. The file named by `CFNKIT_CONFIG`, or else a project-specific
//!    `.cfnkit.toml` in the current directory or its ancestors
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/cfnkit/config.toml`)
//! 3. Default values defined in the code
//!
//! ## Schema
//!
//! ```toml
//! [discovery.attributes]
//! # Output attributes for resource types the built-in table does not cover.
//! "AWS::Lambda::Function" = ["Arn"]
//!
//! [output]
//! pretty = true # Pretty-print JSON written by `cfnkit merge`.
//! ```
//!
//! The configuration is loaded once per command execution and passed to the
//! code that needs it.
//!
use crate::core::error::{CliError, Result}; // CLI error type and anyhow-based Result
use anyhow::{anyhow, Context}; // For constructing errors and adding context
use cfnkit::OutputResolver; // Attribute table fed by [discovery.attributes]
use directories::ProjectDirs; // Platform config directory lookup
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn}; // Logging utilities

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "CFNKIT_CONFIG";
const PROJECT_CONFIG_FILENAME: &str = ".cfnkit.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for output attribute discovery.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Resource type name to exposed attribute names.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}

/// Settings for JSON written by the commands.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub pretty: Option<bool>,
}

impl OutputConfig {
    /// Defaults to pretty output.
    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }
}

impl Config {
    /// Builds the output attribute table: the built-in entries plus the
    /// configured ones.
    ///
    /// Entries naming a built-in resource type are skipped; `OutputResolver`
    /// logs the warning for those.
    ///
    /// # Returns
    ///
    /// * `OutputResolver` - A resolver ready for `resolve` or `render_discovery_with`.
    pub fn output_resolver(&self) -> OutputResolver {
        let mut resolver = OutputResolver::builtin();
        for (resource_type, attributes) in &self.discovery.attributes {
            resolver.register(resource_type, attributes.iter().cloned());
        }
        resolver
    }
}

/// Loads the effective configuration for this invocation.
///
/// The user config is read first, then either the file named by
/// `CFNKIT_CONFIG` or the nearest project `.cfnkit.toml`, which takes
/// precedence. The merged result is validated before it is returned.
///
/// # Returns
///
/// * `Result<Config>` - The merged configuration, or `Config::default()` values
///   where no file sets them.
///
/// # Errors
///
/// Returns an `Err` if:
/// - A configuration file exists but cannot be read or parsed as TOML.
/// - The current directory cannot be determined.
/// - The merged configuration fails validation (see `validate_config`).
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(
                "Loading configuration from {}: {}",
                CONFIG_ENV_VAR,
                path.display()
            );
            Some(load_config_from_path(&path)?)
        }
        None => load_project_config()?,
    };
    let merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "cfnkit") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.cfnkit.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the root, stopping at the first directory that
/// holds `.cfnkit.toml` or `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads and parses a single TOML configuration file.
///
/// # Arguments
///
/// * `path` - The configuration file to load.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be read, or if its content is not valid
/// TOML for `Config` (including unknown keys).
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win; attribute tables are unioned per resource type.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = user;
    merged
        .discovery
        .attributes
        .extend(project_cfg.discovery.attributes);
    merged.output.pretty = project_cfg.output.pretty.or(merged.output.pretty);
    merged
}

/// Checks that every `[discovery.attributes]` key looks like a CloudFormation
/// type name and that no attribute name is blank.
fn validate_config(config: &Config) -> Result<()> {
    for (resource_type, attributes) in &config.discovery.attributes {
        if resource_type.trim().is_empty() || !resource_type.contains("::") {
            return Err(anyhow!(CliError::Config(format!(
                "Invalid resource type in [discovery.attributes]: '{}'. Expected a name like 'AWS::Service::Resource'.",
                resource_type
            ))));
        }
        if attributes.iter().any(|a| a.trim().is_empty()) {
            return Err(anyhow!(CliError::Config(format!(
                "Empty attribute name configured for '{}'.",
                resource_type
            ))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfnkit::create_resource_property;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [discovery.attributes]
            "AWS::Lambda::Function" = ["Arn"]
            "Custom::Thing" = ["Id", "Url"]

            [output]
            pretty = false
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");
        assert_eq!(config.discovery.attributes.len(), 2);
        assert_eq!(config.discovery.attributes["Custom::Thing"], ["Id", "Url"]);
        assert!(!config.output.pretty());
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.discovery.attributes.is_empty());
        assert!(config.output.pretty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<Config>("[output]\ncolour = true").is_err());
    }

    #[test]
    fn test_merge_project_wins() {
        let user: Config = toml::from_str(
            r#"
            [discovery.attributes]
            "AWS::Lambda::Function" = ["Arn"]
            "Custom::A" = ["X"]
            [output]
            pretty = false
        "#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
            [discovery.attributes]
            "Custom::A" = ["Y"]
        "#,
        )
        .unwrap();

        let merged = merge_configs(user.clone(), Some(project));
        assert_eq!(merged.discovery.attributes["Custom::A"], ["Y"]);
        assert_eq!(merged.discovery.attributes["AWS::Lambda::Function"], ["Arn"]);
        assert_eq!(merged.output.pretty, Some(false));

        assert_eq!(merge_configs(user.clone(), None), user);
    }

    #[test]
    fn test_validate_config_invalid_type() {
        let mut config = Config::default();
        config
            .discovery
            .attributes
            .insert("Lambda".into(), vec!["Arn".into()]);
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid resource type"));
    }

    #[test]
    fn test_validate_config_empty_attribute() {
        let mut config = Config::default();
        config
            .discovery
            .attributes
            .insert("Custom::A".into(), vec![" ".into()]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join("a").join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join("a").join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_config_from_path_reports_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "[output").unwrap();
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML from file"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builtin_override_warns_once() {
        let config: Config = toml::from_str(
            r#"
            [discovery.attributes]
            "AWS::SQS::Queue" = ["QueueUrl"]
        "#,
        )
        .unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || config.output_resolver());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{output}");
        assert!(warnings[0].contains("AWS::SQS::Queue"));
    }

    #[test]
    fn test_output_resolver_from_config() {
        let config: Config = toml::from_str(
            r#"
            [discovery.attributes]
            "AWS::Lambda::Function" = ["Arn"]
            "AWS::SQS::Queue" = ["QueueUrl"]
        "#,
        )
        .unwrap();
        let resolver = config.output_resolver();

        let function = create_resource_property("AWS::Lambda::Function").unwrap();
        assert_eq!(resolver.resolve(&function), ["Arn"]);
        let queue = create_resource_property("AWS::SQS::Queue").unwrap();
        assert_eq!(resolver.resolve(&queue), ["Arn", "QueueName"]);
    }
}
