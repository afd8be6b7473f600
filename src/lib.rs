//! cchistory - shared vocabulary for semantic search over Claude conversation history
//!
//! This library holds the pieces every layer of the tool agrees on:
//!
//! - Domain models for configuration, search queries and results, and stored records
//! - Declarative validators that turn untrusted JSON into those models
//! - A closed catalog of application errors
//! - Result combinators that capture panics and failed operations as typed errors
//! - Loading configuration from a TOML file and the environment
//!
//! # Example
//!
//! ```
//! use cchistory::{EntityKind, validate};
//!
//! let raw = serde_json::json!({"query": "borrow checker", "limit": 5});
//! let entity = validate(EntityKind::SearchQuery, &raw)?;
//! assert_eq!(entity.to_json()["mode"], "hybrid");
//! # Ok::<(), cchistory::ValidationErrors>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod result;
pub mod schema;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, load_config_with};
pub use errors::{AppError, ErrorCode, ErrorReason};
pub use models::{
    Config, ConversationRecord, EmbeddingRecord, MessageRecord, Role, SearchMode, SearchQuery,
    SearchResult, SearchResultMetadata,
};
pub use result::{
    ErrorLogger, Outcome, Thrown, combine_results, log_error, wrap_async_throwable,
    wrap_throwable,
};
pub use schema::{Entity, EntityKind, Validate, ValidationErrors, ValidationIssue, validate};
pub use utils::{expand_tilde, format_path_with_tilde};
