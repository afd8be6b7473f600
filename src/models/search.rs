use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of results returned when a query does not say.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Upper bound on results per query.
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// How a query is matched against stored messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Embedding similarity
    Semantic,
    /// Plain text matching
    Keyword,
    /// Both, with scores fused
    #[default]
    Hybrid,
}

impl SearchMode {
    pub const NAMES: [&'static str; 3] = ["semantic", "keyword", "hybrid"];
}

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub const NAMES: [&'static str; 2] = ["user", "assistant"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub mode: SearchMode,
    pub limit: u32,
    /// Minimum similarity score; results below it are dropped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Uuid,
    pub content: String,
    /// Relevance in `[0, 1]`, higher is better
    pub score: f64,
    pub metadata: SearchResultMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultMetadata {
    pub conversation_id: String,
    pub timestamp: DateTime<Utc>,
    pub role: Role,
    /// Zero-based position of the message in its conversation
    pub turn: u64,
}
