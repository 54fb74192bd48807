//! # cfnkit Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the offending path to every
//! error, used by the commands to read template files and write results:
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) if missing, and
//!   fails if the path exists but is not a directory.
//! - **`read_file_to_string`**: reads a whole file with path context on failure.
//! - **`write_string_to_file`**: writes a file, creating its parent directory first.
//!
use crate::core::error::{CliError, Result}; // CLI error type and anyhow-based Result
use anyhow::Context; // For adding context to errors
use std::fs; // Standard filesystem module
use std::path::Path; // Filesystem path type
use tracing::{debug, info}; // Logging utilities

/// Ensures that a directory exists at the specified path.
///
/// Missing parents are created as well (like `mkdir -p`). A path that exists
/// but is a file is an error rather than being replaced.
///
/// # Arguments
///
/// * `path` - The directory that must exist afterwards.
///
/// # Returns
///
/// * `Result<()>` - `Ok(())` if the directory already existed or was created.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(CliError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Arguments
///
/// * `path` - The file to read, typically a template passed on the command line.
///
/// # Returns
///
/// * `Result<String>` - The file content as UTF-8 text.
///
/// # Errors
///
/// Returns an `Err` naming `path` if the file does not exist, cannot be read,
/// or is not valid UTF-8.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a specified file path, overwriting if it exists.
///
/// The parent directory is created first when missing, so `cfnkit merge -o
/// build/stack.json` works in a clean checkout. A bare file name (empty
/// parent) writes into the current directory.
///
/// # Arguments
///
/// * `path` - The destination file.
/// * `content` - The text to write.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created (see
/// `ensure_dir_exists`) or the file cannot be written.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}
