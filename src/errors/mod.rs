//! Application error vocabulary.
//!
//! Every failure the tool reports converges on [`AppError`]: a coarse
//! [`ErrorCode`] that partitions failure causes, a human-readable message,
//! an optional fine-grained [`ErrorReason`] stamped by the constructors in
//! [`catalog`], and an optional arbitrary cause.
//!
//! Constructors only build values. Logging is a separate, explicit step
//! (see [`crate::result::logging`]).

pub mod catalog;

use std::fmt;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::schema::ValidationErrors;

/// Coarse error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Database connection, query, or transaction errors
    DatabaseError,
    /// API authentication, rate limiting, or network errors
    ApiError,
    /// File not found, access denied, or I/O errors
    FileSystemError,
    /// Configuration validation or missing required settings
    ConfigError,
    /// Input validation or data format errors
    ValidationError,
    /// Anything not classified elsewhere
    UnknownError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::DatabaseError,
        ErrorCode::ApiError,
        ErrorCode::FileSystemError,
        ErrorCode::ConfigError,
        ErrorCode::ValidationError,
        ErrorCode::UnknownError,
    ];

    /// Wire names in declaration order.
    pub const NAMES: [&'static str; 6] = [
        "DATABASE_ERROR",
        "API_ERROR",
        "FILE_SYSTEM_ERROR",
        "CONFIG_ERROR",
        "VALIDATION_ERROR",
        "UNKNOWN_ERROR",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::FileSystemError => "FILE_SYSTEM_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained reason stamped by the catalog constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorReason {
    DbConnectionFailed,
    DbQueryFailed,
    DbTransactionFailed,
    ApiAuthFailed,
    ApiRateLimit,
    ApiNetworkError,
    FsFileNotFound,
    FsAccessDenied,
    FsReadError,
    FsWriteError,
    ConfigMissingApiKey,
    ConfigInvalid,
    SearchInvalidQuery,
    SearchNoResults,
    UnexpectedError,
}

impl ErrorReason {
    pub const NAMES: [&'static str; 15] = [
        "DB_CONNECTION_FAILED",
        "DB_QUERY_FAILED",
        "DB_TRANSACTION_FAILED",
        "API_AUTH_FAILED",
        "API_RATE_LIMIT",
        "API_NETWORK_ERROR",
        "FS_FILE_NOT_FOUND",
        "FS_ACCESS_DENIED",
        "FS_READ_ERROR",
        "FS_WRITE_ERROR",
        "CONFIG_MISSING_API_KEY",
        "CONFIG_INVALID",
        "SEARCH_INVALID_QUERY",
        "SEARCH_NO_RESULTS",
        "UNEXPECTED_ERROR",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorReason::DbConnectionFailed => "DB_CONNECTION_FAILED",
            ErrorReason::DbQueryFailed => "DB_QUERY_FAILED",
            ErrorReason::DbTransactionFailed => "DB_TRANSACTION_FAILED",
            ErrorReason::ApiAuthFailed => "API_AUTH_FAILED",
            ErrorReason::ApiRateLimit => "API_RATE_LIMIT",
            ErrorReason::ApiNetworkError => "API_NETWORK_ERROR",
            ErrorReason::FsFileNotFound => "FS_FILE_NOT_FOUND",
            ErrorReason::FsAccessDenied => "FS_ACCESS_DENIED",
            ErrorReason::FsReadError => "FS_READ_ERROR",
            ErrorReason::FsWriteError => "FS_WRITE_ERROR",
            ErrorReason::ConfigMissingApiKey => "CONFIG_MISSING_API_KEY",
            ErrorReason::ConfigInvalid => "CONFIG_INVALID",
            ErrorReason::SearchInvalidQuery => "SEARCH_INVALID_QUERY",
            ErrorReason::SearchNoResults => "SEARCH_NO_RESULTS",
            ErrorReason::UnexpectedError => "UNEXPECTED_ERROR",
        }
    }

    /// The coarse category this reason belongs to.
    pub fn code(self) -> ErrorCode {
        match self {
            ErrorReason::DbConnectionFailed
            | ErrorReason::DbQueryFailed
            | ErrorReason::DbTransactionFailed => ErrorCode::DatabaseError,
            ErrorReason::ApiAuthFailed
            | ErrorReason::ApiRateLimit
            | ErrorReason::ApiNetworkError => ErrorCode::ApiError,
            ErrorReason::FsFileNotFound
            | ErrorReason::FsAccessDenied
            | ErrorReason::FsReadError
            | ErrorReason::FsWriteError => ErrorCode::FileSystemError,
            ErrorReason::ConfigMissingApiKey | ErrorReason::ConfigInvalid => ErrorCode::ConfigError,
            ErrorReason::SearchInvalidQuery | ErrorReason::SearchNoResults => {
                ErrorCode::ValidationError
            }
            ErrorReason::UnexpectedError => ErrorCode::UnknownError,
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical failure value shared by every layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ErrorReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Value>,
}

impl AppError {
    /// Create an error with an explicit code and message and no cause.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), reason: None, cause: None }
    }

    pub(crate) fn with_reason(reason: ErrorReason, message: impl Into<String>) -> Self {
        Self { code: reason.code(), message: message.into(), reason: Some(reason), cause: None }
    }

    /// Attach an underlying cause, replacing any existing one.
    pub fn with_cause(mut self, cause: impl Into<Value>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Attach the display form of a source error as the cause.
    pub fn with_source(self, source: &dyn std::error::Error) -> Self {
        self.with_cause(Value::String(source.to_string()))
    }

    /// Catch-all for failures no caller classified.
    pub fn unexpected(detail: impl fmt::Display) -> Self {
        Self::with_reason(ErrorReason::UnexpectedError, format!("Unexpected error: {}", detail))
    }

    /// Classify a failed read of `path` into the file system constructors.
    pub fn from_io(err: &io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::file_not_found(path),
            io::ErrorKind::PermissionDenied => Self::file_access_denied(path),
            _ => Self::file_read_error(path).with_source(err),
        }
    }

    /// Classify a failed write of `path`.
    pub fn from_io_write(err: &io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::file_access_denied(path),
            _ => Self::file_write_error(path).with_source(err),
        }
    }

    pub fn is(&self, reason: ErrorReason) -> bool {
        self.reason == Some(reason)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::new(ErrorCode::ValidationError, format!("Validation failed: {}", errors))
            .with_cause(errors.to_json())
    }
}
