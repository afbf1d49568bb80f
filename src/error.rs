//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the DupeSync application.
///
/// - 0: Success (completed normally, something was found or transferred)
/// - 1: General error (fatal failure, e.g. a missing root directory)
/// - 2: Nothing found (no duplicates, or nothing needed transferring)
/// - 3: Partial success (completed, but some files were skipped on errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Completed and produced results.
    Success = 0,
    /// An unexpected or fatal error occurred.
    GeneralError = 1,
    /// Completed with an empty result.
    NothingFound = 2,
    /// Completed, but per-file errors were reported.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NothingFound => "DS002",
            Self::PartialSuccess => "DS003",
        }
    }

    /// Pick the code for a completed run.
    #[must_use]
    pub fn for_outcome(had_errors: bool, found_anything: bool) -> Self {
        if had_errors {
            Self::PartialSuccess
        } else if found_anything {
            Self::Success
        } else {
            Self::NothingFound
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
