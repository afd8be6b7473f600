//! Field tables for every entity, in declaration order.

use super::Validate;
use super::rules::{Check, Fallback, FieldSpec, Kind, NON_NEGATIVE_MESSAGE, Rule};
use crate::errors::{AppError, ErrorCode, ErrorReason};
use crate::models::config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DATA_DIRECTORY, DEFAULT_EMBEDDING_MODEL, DEFAULT_MAX_CONCURRENCY,
};
use crate::models::search::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::models::{
    Config, ConversationRecord, EmbeddingRecord, MessageRecord, Role, SearchMode, SearchQuery,
    SearchResult,
};

pub const API_KEY_REQUIRED: &str = "OpenAI API key is required";
pub const CHUNK_SIZE_INVALID: &str = "Chunk size must be a positive integer";
pub const MAX_CONCURRENCY_INVALID: &str = "Max concurrency must be a positive integer";
pub const QUERY_EMPTY: &str = "Search query cannot be empty";
pub const LIMIT_NOT_POSITIVE: &str = "Limit must be positive";
pub const LIMIT_TOO_LARGE: &str = "Limit cannot exceed 100";
pub const THRESHOLD_OUT_OF_RANGE: &str = "Threshold must be between 0 and 1";
pub const RESULT_ID_INVALID: &str = "Invalid result ID";
pub const CONTENT_EMPTY: &str = "Content cannot be empty";
pub const SCORE_NEGATIVE: &str = "Score must be non-negative";
pub const SCORE_TOO_LARGE: &str = "Score must be at most 1";
pub const CONVERSATION_ID_REQUIRED: &str = "Conversation ID is required";
pub const TIMESTAMP_INVALID: &str = "Invalid timestamp format";
pub const TURN_NEGATIVE: &str = "Turn must be non-negative";

pub const CONFIG_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("apiKey", Kind::String)
        .aliases(&["openaiApiKey"])
        .checks(&[Check::new(Rule::MinLength(1), API_KEY_REQUIRED)]),
    FieldSpec::with_default("dataDirectory", Kind::String, Fallback::Str(DEFAULT_DATA_DIRECTORY))
        .aliases(&["dataDir"]),
    FieldSpec::with_default("embeddingModel", Kind::String, Fallback::Str(DEFAULT_EMBEDDING_MODEL)),
    FieldSpec::with_default("chunkSize", Kind::Number, Fallback::Int(DEFAULT_CHUNK_SIZE as i64))
        .checks(&[Check::integer(), Check::new(Rule::Positive, CHUNK_SIZE_INVALID)]),
    FieldSpec::with_default(
        "maxConcurrency",
        Kind::Number,
        Fallback::Int(DEFAULT_MAX_CONCURRENCY as i64),
    )
    .checks(&[Check::integer(), Check::new(Rule::Positive, MAX_CONCURRENCY_INVALID)]),
];

pub const SEARCH_QUERY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("query", Kind::String)
        .checks(&[Check::new(Rule::MinLength(1), QUERY_EMPTY)]),
    FieldSpec::with_default("mode", Kind::Enum(&SearchMode::NAMES), Fallback::Str("hybrid")),
    FieldSpec::with_default("limit", Kind::Number, Fallback::Int(DEFAULT_SEARCH_LIMIT as i64))
        .checks(&[
            Check::integer(),
            Check::new(Rule::Positive, LIMIT_NOT_POSITIVE),
            Check::new(Rule::Max(MAX_SEARCH_LIMIT as f64), LIMIT_TOO_LARGE),
        ]),
    FieldSpec::optional("threshold", Kind::Number).checks(&[
        Check::new(Rule::Min(0.0), THRESHOLD_OUT_OF_RANGE),
        Check::new(Rule::Max(1.0), THRESHOLD_OUT_OF_RANGE),
    ]),
];

pub const SEARCH_RESULT_METADATA_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("conversationId", Kind::String)
        .checks(&[Check::new(Rule::MinLength(1), CONVERSATION_ID_REQUIRED)]),
    FieldSpec::required("timestamp", Kind::String)
        .checks(&[Check::new(Rule::DateTime, TIMESTAMP_INVALID)]),
    FieldSpec::required("role", Kind::Enum(&Role::NAMES)),
    FieldSpec::required("turn", Kind::Number)
        .checks(&[Check::integer(), Check::new(Rule::NonNegative, TURN_NEGATIVE)]),
];

pub const SEARCH_RESULT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", Kind::String).checks(&[Check::new(Rule::Uuid, RESULT_ID_INVALID)]),
    FieldSpec::required("content", Kind::String)
        .checks(&[Check::new(Rule::MinLength(1), CONTENT_EMPTY)]),
    FieldSpec::required("score", Kind::Number).checks(&[
        Check::new(Rule::Min(0.0), SCORE_NEGATIVE),
        Check::new(Rule::Max(1.0), SCORE_TOO_LARGE),
    ]),
    FieldSpec::required("metadata", Kind::Object(SEARCH_RESULT_METADATA_FIELDS)),
];

pub const CONVERSATION_RECORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", Kind::String).checks(&[Check::uuid()]),
    FieldSpec::required("title", Kind::String),
    FieldSpec::required("createdAt", Kind::String).checks(&[Check::datetime()]),
    FieldSpec::required("updatedAt", Kind::String).checks(&[Check::datetime()]),
];

pub const MESSAGE_RECORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", Kind::String).checks(&[Check::uuid()]),
    FieldSpec::required("conversationId", Kind::String).checks(&[Check::uuid()]),
    FieldSpec::required("role", Kind::Enum(&Role::NAMES)),
    FieldSpec::required("content", Kind::String),
    FieldSpec::required("turn", Kind::Number)
        .checks(&[Check::integer(), Check::new(Rule::NonNegative, NON_NEGATIVE_MESSAGE)]),
    FieldSpec::required("createdAt", Kind::String).checks(&[Check::datetime()]),
];

pub const EMBEDDING_RECORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", Kind::String).checks(&[Check::uuid()]),
    FieldSpec::required("messageId", Kind::String).checks(&[Check::uuid()]),
    FieldSpec::required("embedding", Kind::FloatVector),
    FieldSpec::required("model", Kind::String),
    FieldSpec::required("createdAt", Kind::String).checks(&[Check::datetime()]),
];

pub const APP_ERROR_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("code", Kind::Enum(&ErrorCode::NAMES)),
    FieldSpec::required("message", Kind::String),
    FieldSpec::optional("reason", Kind::Enum(&ErrorReason::NAMES)),
    FieldSpec::optional("cause", Kind::Any),
];

impl Validate for Config {
    const FIELDS: &'static [FieldSpec] = CONFIG_FIELDS;
}

impl Validate for SearchQuery {
    const FIELDS: &'static [FieldSpec] = SEARCH_QUERY_FIELDS;
}

impl Validate for SearchResult {
    const FIELDS: &'static [FieldSpec] = SEARCH_RESULT_FIELDS;
}

impl Validate for ConversationRecord {
    const FIELDS: &'static [FieldSpec] = CONVERSATION_RECORD_FIELDS;
}

impl Validate for MessageRecord {
    const FIELDS: &'static [FieldSpec] = MESSAGE_RECORD_FIELDS;
}

impl Validate for EmbeddingRecord {
    const FIELDS: &'static [FieldSpec] = EMBEDDING_RECORD_FIELDS;
}

impl Validate for AppError {
    const FIELDS: &'static [FieldSpec] = APP_ERROR_FIELDS;
}
