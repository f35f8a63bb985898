//! CLI-specific error types and exit code mapping

use shelf_core::error::ShelfError;
use shelf_paginator::PaginatorError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Invalid fixture file (not a JSON array of records).
    #[error("invalid fixture {path}: {reason}")]
    Fixture { path: String, reason: String },

    /// A page fetch failed; carries the message shown to the user.
    #[error("{0}")]
    Fetch(String),

    /// Paginator options rejected at construction.
    #[error("{0}")]
    Options(#[from] PaginatorError),

    /// JSON parsing or serialisation failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from shelf-core.
    #[error("{0}")]
    Core(#[from] ShelfError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration or option error   |
    /// | 3    | Page fetch failed               |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::Options(PaginatorError::InvalidOption { .. })
            | Self::Core(ShelfError::Config(_)) => 2,
            Self::Fetch(_) | Self::Core(ShelfError::Fetch(_)) => 3,
            Self::Io(_) | Self::Core(ShelfError::Io(_)) => 10,
            Self::Command(_)
            | Self::Fixture { .. }
            | Self::Json(_)
            | Self::Options(PaginatorError::RuntimeUnavailable(_))
            | Self::Core(ShelfError::Runtime(_)) => 1,
        }
    }
}
