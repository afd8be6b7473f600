//! Typed values for every structured contract the tool accepts or persists.
//!
//! - [`Config`] - Application settings merged from file and environment
//! - [`SearchQuery`] / [`SearchResult`] - Search request and response shapes
//! - [`ConversationRecord`], [`MessageRecord`], [`EmbeddingRecord`] - Persisted rows
//!
//! Values are produced by the validators in [`crate::schema`]; the serde
//! derives use the camelCase wire names so a validated value serializes back
//! into input the validator accepts unchanged.

pub mod config;
pub mod records;
pub mod search;

pub use config::{
    Config, DEFAULT_CHUNK_SIZE, DEFAULT_DATA_DIRECTORY, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_MAX_CONCURRENCY,
};
pub use records::{ConversationRecord, EmbeddingRecord, MessageRecord};
pub use search::{
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, Role, SearchMode, SearchQuery, SearchResult,
    SearchResultMetadata,
};
