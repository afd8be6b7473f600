//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

pub const VALID_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const OTHER_UUID: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
pub const TIMESTAMP: &str = "2024-01-15T10:30:00Z";

/// Builder for raw SearchResult input
pub struct SearchResultBuilder {
    id: Value,
    content: Value,
    score: Value,
    conversation_id: Value,
    timestamp: Value,
    role: Value,
    turn: Value,
}

impl SearchResultBuilder {
    /// A fully valid result
    pub fn new() -> Self {
        Self {
            id: json!(VALID_UUID),
            content: json!("How do I pin a future?"),
            score: json!(0.85),
            conversation_id: json!("conv-123"),
            timestamp: json!(TIMESTAMP),
            role: json!("user"),
            turn: json!(0),
        }
    }

    pub fn id(mut self, id: impl Into<Value>) -> Self {
        self.id = id.into();
        self
    }

    pub fn content(mut self, content: impl Into<Value>) -> Self {
        self.content = content.into();
        self
    }

    pub fn score(mut self, score: impl Into<Value>) -> Self {
        self.score = score.into();
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<Value>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn role(mut self, role: impl Into<Value>) -> Self {
        self.role = role.into();
        self
    }

    pub fn turn(mut self, turn: impl Into<Value>) -> Self {
        self.turn = turn.into();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "id": self.id,
            "content": self.content,
            "score": self.score,
            "metadata": {
                "conversationId": self.conversation_id,
                "timestamp": self.timestamp,
                "role": self.role,
                "turn": self.turn,
            }
        })
    }
}

/// Raw ConversationRecord input
pub fn conversation_json() -> Value {
    json!({
        "id": VALID_UUID,
        "title": "Async Rust questions",
        "createdAt": TIMESTAMP,
        "updatedAt": "2024-01-15T11:00:00Z",
    })
}

/// Raw MessageRecord input
pub fn message_json() -> Value {
    json!({
        "id": OTHER_UUID,
        "conversationId": VALID_UUID,
        "role": "assistant",
        "content": "Use Box::pin.",
        "turn": 1,
        "createdAt": TIMESTAMP,
    })
}

/// Raw EmbeddingRecord input
pub fn embedding_json(embedding: Value) -> Value {
    json!({
        "id": VALID_UUID,
        "messageId": OTHER_UUID,
        "embedding": embedding,
        "model": "text-embedding-3-small",
        "createdAt": TIMESTAMP,
    })
}

/// Temporary HOME with an optional `.claude-history/config.toml`
pub struct HomeDirBuilder {
    temp_dir: TempDir,
}

impl HomeDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".claude-history").join("config.toml")
    }

    /// Write a config file with the given TOML content
    pub fn with_config(self, content: &str) -> Self {
        let path = self.config_path();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create data dir");
        fs::write(path, content).expect("Failed to write config.toml");
        self
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}
