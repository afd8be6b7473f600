//! One constructor per known failure scenario.
//!
//! Constructors that accept optional details in other layers leave the cause
//! empty here; chain [`AppError::with_cause`] to attach one.

use std::path::Path;

use serde_json::{Value, json};

use super::{AppError, ErrorReason};

/// Remedy shown when no API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str =
    "OpenAI API key not found. Please set OPENAI_API_KEY or run cchistory init";

impl AppError {
    // Database

    pub fn database_connection_failed() -> Self {
        Self::with_reason(ErrorReason::DbConnectionFailed, "Failed to connect to database")
    }

    pub fn database_query_failed(query: &str) -> Self {
        Self::with_reason(ErrorReason::DbQueryFailed, format!("Database query failed: {}", query))
    }

    pub fn database_transaction_failed() -> Self {
        Self::with_reason(ErrorReason::DbTransactionFailed, "Database transaction failed")
    }

    // External API

    pub fn api_authentication_failed() -> Self {
        Self::with_reason(ErrorReason::ApiAuthFailed, "API authentication failed")
    }

    /// `retry_after` is in seconds, as reported by the API.
    pub fn api_rate_limit_exceeded(retry_after: Option<u64>) -> Self {
        Self::with_reason(ErrorReason::ApiRateLimit, "API rate limit exceeded")
            .with_cause(json!({ "retryAfter": retry_after }))
    }

    pub fn api_network_error() -> Self {
        Self::with_reason(ErrorReason::ApiNetworkError, "Network request failed")
    }

    // File system

    pub fn file_not_found(path: &Path) -> Self {
        let path = path.display().to_string();
        Self::with_reason(ErrorReason::FsFileNotFound, format!("File not found: {}", path))
            .with_cause(json!({ "path": path }))
    }

    pub fn file_access_denied(path: &Path) -> Self {
        let path = path.display().to_string();
        Self::with_reason(ErrorReason::FsAccessDenied, format!("Access denied: {}", path))
            .with_cause(json!({ "path": path }))
    }

    pub fn file_read_error(path: &Path) -> Self {
        Self::with_reason(
            ErrorReason::FsReadError,
            format!("Failed to read file: {}", path.display()),
        )
    }

    pub fn file_write_error(path: &Path) -> Self {
        Self::with_reason(
            ErrorReason::FsWriteError,
            format!("Failed to write file: {}", path.display()),
        )
    }

    // Configuration

    pub fn missing_api_key() -> Self {
        Self::with_reason(ErrorReason::ConfigMissingApiKey, MISSING_API_KEY_MESSAGE)
    }

    pub fn invalid_config() -> Self {
        Self::with_reason(ErrorReason::ConfigInvalid, "Invalid configuration")
    }

    // Search

    pub fn invalid_search_query(query: &str) -> Self {
        Self::with_reason(ErrorReason::SearchInvalidQuery, format!("Invalid search query: {}", query))
            .with_cause(json!({ "query": query }))
    }

    pub fn no_search_results() -> Self {
        Self::with_reason(ErrorReason::SearchNoResults, "No results found")
    }

    /// `retryAfter` carried by a rate-limit error, if any.
    pub fn retry_after(&self) -> Option<u64> {
        if !self.is(ErrorReason::ApiRateLimit) {
            return None;
        }
        self.cause.as_ref().and_then(|cause| cause.get("retryAfter")).and_then(Value::as_u64)
    }
}
