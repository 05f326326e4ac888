//! Evaluator path resolution and validation utilities.
//!
//! The evaluator can be given as an explicit path or as a bare program
//! name. It is resolved once, before the sweep, so that a typo fails
//! before any output is written.

use std::env;
use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Errors that can occur during evaluator resolution or validation
#[derive(Debug, thiserror::Error)]
pub enum BinaryError {
    #[error("Binary not found: {path}")]
    NotFound { path: String },

    #[error("Binary is not executable: {path}")]
    NotExecutable { path: String },

    #[error("Binary '{name}' not found in PATH")]
    NotInPath { name: String },

    #[error("Cannot determine home directory")]
    NoHomeDir,

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

/// Get the user's home directory from the HOME environment variable
fn get_home_dir() -> Result<PathBuf, BinaryError> {
    env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| BinaryError::NoHomeDir)
}

/// Returns true if `name_or_path` should be used as a path rather than
/// looked up in `PATH`
fn is_explicit_path(name_or_path: &str) -> bool {
    name_or_path.contains('/') || name_or_path.starts_with('~')
}

/// Expand a leading `~` to the user's home directory
fn expand_tilde(path: &str) -> Result<PathBuf, BinaryError> {
    if path == "~" {
        return get_home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(get_home_dir()?.join(rest)),
        None if path.starts_with('~') => Err(BinaryError::InvalidPath {
            path: path.to_string(),
        }),
        None => Ok(PathBuf::from(path)),
    }
}

/// Find the first executable named `name` in a `PATH`-style list
fn search_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| validate_binary(candidate).is_ok())
}

/// Resolve an evaluator from a bare name or explicit path.
///
/// Resolution rules:
/// 1. If the value contains `/` or starts with `~`: treat as explicit path
///    (with `~` expanded)
/// 2. Otherwise: search the directories in `PATH`
///
/// # Examples
///
/// ```ignore
/// resolve_binary_path("slimflysearch") -> /usr/local/bin/slimflysearch
/// resolve_binary_path("~/supersim/bin/slimflysearch") -> /home/user/supersim/bin/slimflysearch
/// resolve_binary_path("./slimflysearch") -> ./slimflysearch
/// ```
pub fn resolve_binary_path(name_or_path: &str) -> Result<PathBuf, BinaryError> {
    if name_or_path.is_empty() {
        return Err(BinaryError::InvalidPath {
            path: name_or_path.to_string(),
        });
    }

    if is_explicit_path(name_or_path) {
        return expand_tilde(name_or_path);
    }

    let path_var = env::var_os("PATH").unwrap_or_default();
    search_path(name_or_path, &path_var).ok_or_else(|| BinaryError::NotInPath {
        name: name_or_path.to_string(),
    })
}

/// Validate that a binary exists and is executable.
pub fn validate_binary(path: &Path) -> Result<(), BinaryError> {
    if !path.is_file() {
        return Err(BinaryError::NotFound {
            path: path.display().to_string(),
        });
    }

    let metadata = path.metadata().map_err(|_| BinaryError::InvalidPath {
        path: path.display().to_string(),
    })?;

    // Check if file is executable (any execute bit set)
    let mode = metadata.permissions().mode();
    if mode & 0o111 == 0 {
        return Err(BinaryError::NotExecutable {
            path: path.display().to_string(),
        });
    }

    Ok(())
}

/// Validate an evaluator specified by name or path.
///
/// Combines resolution and validation in one step.
pub fn validate_binary_spec(name_or_path: &str) -> Result<PathBuf, BinaryError> {
    let resolved = resolve_binary_path(name_or_path)?;
    validate_binary(&resolved)?;
    Ok(resolved)
}
