//! Row shapes the storage engine reads and writes.
//!
//! Uniqueness of `id` and referential integrity of the foreign ids
//! (message to conversation, embedding to message) belong to storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::search::Role;

/// A stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    pub id: Uuid,
    /// Title or summary of the conversation
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: Role,
    pub content: String,
    pub turn: u64,
    pub created_at: DateTime<Utc>,
}

/// Vector embedding of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingRecord {
    pub id: Uuid,
    pub message_id: Uuid,
    pub embedding: Vec<f32>,
    /// Model that produced `embedding`
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl EmbeddingRecord {
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}
