// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for FastPrint.

use std::path::Path;

use thiserror::Error;

/// Top-level error type for all FastPrint operations.
#[derive(Debug, Error)]
pub enum FastPrintError {
    // -- Discovery errors --
    #[error("folder not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid request: {0}")]
    Validation(String),

    // -- Print helper errors --
    #[error("file not found: {0}")]
    FileMissing(String),

    #[error("print helper not found: install {0} or add it to PATH")]
    HelperNotFound(String),

    #[error("timed out after {0}s - printing took too long")]
    HelperTimeout(u64),

    #[error("{0}")]
    HelperExecution(String),

    // -- Session / audit --
    #[error("session token rejected: {0}")]
    Token(String),

    #[error("database error: {0}")]
    Database(String),

    // -- Transport / persistence --
    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FastPrintError {
    /// Attach a path to an I/O error, promoting the kinds callers care about
    /// (missing entries, refused access) to their structured variants.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(path.display().to_string())
            }
            _ => Self::Io(err),
        }
    }

    /// HTTP status code used when this error is surfaced to a caller.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::FileMissing(_) => 404,
            Self::PermissionDenied(_) => 403,
            Self::Validation(_) => 400,
            Self::Token(_) => 401,
            _ => 500,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FastPrintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_becomes_not_found() {
        let err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let mapped = FastPrintError::from_io(err, Path::new("/missing"));
        assert!(matches!(mapped, FastPrintError::NotFound(ref p) if p == "/missing"));
        assert_eq!(mapped.http_status(), 404);
    }

    #[test]
    fn io_permission_denied_becomes_403() {
        let err = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let mapped = FastPrintError::from_io(err, Path::new("/locked"));
        assert_eq!(mapped.http_status(), 403);
    }

    #[test]
    fn other_io_errors_are_internal() {
        let err = std::io::Error::other("disk on fire");
        let mapped = FastPrintError::from_io(err, Path::new("/x"));
        assert!(matches!(mapped, FastPrintError::Io(_)));
        assert_eq!(mapped.http_status(), 500);
    }

    #[test]
    fn helper_execution_message_is_verbatim() {
        let err = FastPrintError::HelperExecution("printer offline".into());
        assert_eq!(err.to_string(), "printer offline");
    }
}
