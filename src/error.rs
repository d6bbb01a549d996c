//! Error types for runthis operations.
//!
//! This module defines [`RunthisError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RunthisError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RunthisError::Other`) for unexpected errors
//! - Per-repository failures inside a harness run are recorded in the
//!   result, not returned as errors

use std::path::PathBuf;
use thiserror::Error;

use crate::planner::PlannerError;

/// Core error type for runthis operations.
#[derive(Debug, Error)]
pub enum RunthisError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Repository identifier is not of the form `owner/name`.
    #[error("Invalid repository identifier '{name}': expected owner/name")]
    InvalidRepository { name: String },

    /// None of the README candidates exist.
    #[error("No README found in {path}")]
    ReadmeNotFound { path: PathBuf },

    /// External command could not be spawned or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The planning service could not produce a plan.
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for runthis operations.
pub type Result<T> = std::result::Result<T, RunthisError>;
