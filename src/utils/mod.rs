//! Shared utilities: evaluator path resolution.

pub mod binary;

pub use binary::{resolve_binary_path, validate_binary, validate_binary_spec, BinaryError};
