use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the tool's data (database, config file).
pub const DEFAULT_DATA_DIRECTORY: &str = "~/.claude-history";

/// Default OpenAI model used for embeddings.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default size of text chunks fed to the embedding model.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default number of concurrent indexing operations.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Validated application configuration.
///
/// Built once at startup (see [`crate::config::load_config`]) and never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// OpenAI API key for generating embeddings
    pub api_key: String,
    pub data_directory: String,
    pub embedding_model: String,
    /// Larger chunks give more context per embedding but match less precisely
    pub chunk_size: usize,
    pub max_concurrency: usize,
}

impl Config {
    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", visible)
    }

    /// Data directory with a leading `~` resolved.
    pub fn data_path(&self) -> PathBuf {
        crate::utils::expand_tilde(&self.data_directory)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.masked_api_key())
            .field("data_directory", &self.data_directory)
            .field("embedding_model", &self.embedding_model)
            .field("chunk_size", &self.chunk_size)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}
