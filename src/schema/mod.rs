//! Validation of raw input against the entity contracts.
//!
//! Each entity declares a static field table (see [`entities`]) that the
//! engine in [`rules`] applies to an untyped [`serde_json::Value`]. The result
//! is either the fully typed, defaulted value or a [`ValidationErrors`] listing
//! every violated rule in declaration order. Validation never panics: wrong
//! primitive types, out-of-range numbers, malformed ids and timestamps, and
//! unknown enum values all come back as issues.
//!
//! ```
//! use cchistory::models::{SearchMode, SearchQuery};
//! use cchistory::schema::Validate;
//!
//! let query = SearchQuery::validate(&serde_json::json!({"query": "tokio select"})).unwrap();
//! assert_eq!(query.mode, SearchMode::Hybrid);
//! assert_eq!(query.limit, 10);
//!
//! let errors = SearchQuery::validate(&serde_json::json!({"query": ""})).unwrap_err();
//! assert_eq!(errors.first().message, "Search query cannot be empty");
//! ```

pub mod entities;
pub mod issues;
pub mod rules;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use issues::{ValidationErrors, ValidationIssue};
pub use rules::FieldSpec;

use crate::errors::AppError;
use crate::models::{
    Config, ConversationRecord, EmbeddingRecord, MessageRecord, SearchQuery, SearchResult,
};

/// An entity backed by a declarative field table.
pub trait Validate: Sized + DeserializeOwned {
    /// Field table, in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// Check `raw` against [`Self::FIELDS`] and build the typed value.
    fn validate(raw: &Value) -> Result<Self, ValidationErrors> {
        let object = rules::validate_object(Self::FIELDS, raw).map_err(|issues| {
            ValidationErrors::from_issues(issues)
                .unwrap_or_else(|| ValidationErrors::new(ValidationIssue::new("", "Invalid input")))
        })?;
        // The tables guarantee shape; this only fails on values outside the
        // target integer types.
        serde_json::from_value(Value::Object(object))
            .map_err(|e| ValidationErrors::new(ValidationIssue::new("", e.to_string())))
    }
}

/// Every entity kind with a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Configuration,
    SearchQuery,
    SearchResult,
    ConversationRecord,
    MessageRecord,
    EmbeddingRecord,
    AppError,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Configuration,
        EntityKind::SearchQuery,
        EntityKind::SearchResult,
        EntityKind::ConversationRecord,
        EntityKind::MessageRecord,
        EntityKind::EmbeddingRecord,
        EntityKind::AppError,
    ];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Configuration => "config",
            EntityKind::SearchQuery => "query",
            EntityKind::SearchResult => "result",
            EntityKind::ConversationRecord => "conversation",
            EntityKind::MessageRecord => "message",
            EntityKind::EmbeddingRecord => "embedding",
            EntityKind::AppError => "error",
        }
    }

    /// Field table behind this kind's validator, in declaration order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Configuration => Config::FIELDS,
            EntityKind::SearchQuery => SearchQuery::FIELDS,
            EntityKind::SearchResult => SearchResult::FIELDS,
            EntityKind::ConversationRecord => ConversationRecord::FIELDS,
            EntityKind::MessageRecord => MessageRecord::FIELDS,
            EntityKind::EmbeddingRecord => EmbeddingRecord::FIELDS,
            EntityKind::AppError => AppError::FIELDS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EntityKind::ALL.into_iter().find(|kind| kind.name() == wanted).ok_or_else(|| {
            let names: Vec<&str> = EntityKind::ALL.iter().map(|kind| kind.name()).collect();
            format!("Unknown entity kind '{}' (expected one of: {})", s, names.join(", "))
        })
    }
}

/// A validated value of any entity kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Configuration(Config),
    SearchQuery(SearchQuery),
    SearchResult(SearchResult),
    ConversationRecord(ConversationRecord),
    MessageRecord(MessageRecord),
    EmbeddingRecord(EmbeddingRecord),
    AppError(AppError),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Configuration(_) => EntityKind::Configuration,
            Entity::SearchQuery(_) => EntityKind::SearchQuery,
            Entity::SearchResult(_) => EntityKind::SearchResult,
            Entity::ConversationRecord(_) => EntityKind::ConversationRecord,
            Entity::MessageRecord(_) => EntityKind::MessageRecord,
            Entity::EmbeddingRecord(_) => EntityKind::EmbeddingRecord,
            Entity::AppError(_) => EntityKind::AppError,
        }
    }

    /// Wire form; validating it again yields an equal entity.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Validate `raw` as an entity of the given kind.
pub fn validate(kind: EntityKind, raw: &Value) -> Result<Entity, ValidationErrors> {
    Ok(match kind {
        EntityKind::Configuration => Entity::Configuration(Config::validate(raw)?),
        EntityKind::SearchQuery => Entity::SearchQuery(SearchQuery::validate(raw)?),
        EntityKind::SearchResult => Entity::SearchResult(SearchResult::validate(raw)?),
        EntityKind::ConversationRecord => {
            Entity::ConversationRecord(ConversationRecord::validate(raw)?)
        }
        EntityKind::MessageRecord => Entity::MessageRecord(MessageRecord::validate(raw)?),
        EntityKind::EmbeddingRecord => Entity::EmbeddingRecord(EmbeddingRecord::validate(raw)?),
        EntityKind::AppError => Entity::AppError(AppError::validate(raw)?),
    })
}
