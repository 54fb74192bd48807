//! # cfnkit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers for the CLI. Callers import the submodule directly, e.g.
//! `crate::common::fs::io::read_file_to_string`.
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_file_to_string`, `write_string_to_file`).
pub mod io;
