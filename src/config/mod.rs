//! Startup configuration.
//!
//! Values come from an optional TOML file and the environment, with the
//! environment taking precedence. The merged object is checked by the same
//! validator as any other [`Config`](crate::models::Config) input.

pub mod loader;

pub use loader::{
    API_KEY_VAR, CHUNK_SIZE_VAR, CONFIG_FILE_NAME, CONFIG_PATH_VAR, DATA_DIR_VAR,
    EMBEDDING_MODEL_VAR, MAX_CONCURRENCY_VAR, config_file_path, config_from_raw, load_config,
    load_config_with, merge_sources, read_config_file, write_config,
};
