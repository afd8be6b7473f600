use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::Config;
use crate::schema::entities::API_KEY_REQUIRED;
use crate::schema::rules::REQUIRED_MESSAGE;
use crate::schema::{Validate, ValidationErrors};
use crate::utils::paths::expand_tilde_with;
use crate::utils::{EnvLookup, process_env};

pub const CONFIG_PATH_VAR: &str = "CCHISTORY_CONFIG";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const DATA_DIR_VAR: &str = "CCHISTORY_DATA_DIR";
pub const EMBEDDING_MODEL_VAR: &str = "CCHISTORY_EMBEDDING_MODEL";
pub const CHUNK_SIZE_VAR: &str = "CCHISTORY_CHUNK_SIZE";
pub const MAX_CONCURRENCY_VAR: &str = "CCHISTORY_MAX_CONCURRENCY";

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvValue {
    Text,
    Integer,
}

/// Environment variable, the config key it overrides, and how to read it.
const ENV_OVERRIDES: &[(&str, &str, EnvValue)] = &[
    (API_KEY_VAR, "apiKey", EnvValue::Text),
    (DATA_DIR_VAR, "dataDirectory", EnvValue::Text),
    (EMBEDDING_MODEL_VAR, "embeddingModel", EnvValue::Text),
    (CHUNK_SIZE_VAR, "chunkSize", EnvValue::Integer),
    (MAX_CONCURRENCY_VAR, "maxConcurrency", EnvValue::Integer),
];

/// Location of the config file.
///
/// `CCHISTORY_CONFIG` wins; otherwise `config.toml` inside the data
/// directory (`CCHISTORY_DATA_DIR` or `~/.claude-history`).
pub fn config_file_path(env: EnvLookup<'_>) -> PathBuf {
    if let Some(path) = env(CONFIG_PATH_VAR) {
        return expand_tilde_with(&path, env);
    }
    let data_dir = env(DATA_DIR_VAR)
        .unwrap_or_else(|| crate::models::DEFAULT_DATA_DIRECTORY.to_string());
    expand_tilde_with(&data_dir, env).join(CONFIG_FILE_NAME)
}

/// Read the TOML config file as a raw object.
///
/// A missing file yields `Ok(None)`.
pub fn read_config_file(path: &Path) -> Result<Option<Map<String, Value>>, AppError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AppError::from_io(&e, path)),
    };

    let parsed: Value = toml::from_str(&content).map_err(|e| {
        AppError::invalid_config().with_cause(serde_json::json!({
            "path": path.display().to_string(),
            "error": e.message(),
        }))
    })?;

    match parsed {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(AppError::invalid_config()),
    }
}

/// Layer environment overrides on top of the file's values.
///
/// Integer-typed variables that do not parse are passed through as strings
/// so validation reports them.
pub fn merge_sources(file: Option<Map<String, Value>>, env: EnvLookup<'_>) -> Value {
    let mut merged = file.unwrap_or_default();
    for &(var, key, kind) in ENV_OVERRIDES {
        let Some(raw) = env(var) else {
            continue;
        };
        let value = match kind {
            EnvValue::Integer => match raw.trim().parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::String(raw),
            },
            EnvValue::Text => Value::String(raw),
        };
        merged.insert(key.to_string(), value);
    }
    Value::Object(merged)
}

/// Validate a merged raw object into a [`Config`].
pub fn config_from_raw(raw: &Value) -> Result<Config, AppError> {
    Config::validate(raw).map_err(config_error)
}

fn config_error(errors: ValidationErrors) -> AppError {
    let key_missing = errors
        .at_path("apiKey")
        .any(|issue| issue.message == REQUIRED_MESSAGE || issue.message == API_KEY_REQUIRED);
    if key_missing {
        return AppError::missing_api_key();
    }
    AppError::invalid_config().with_cause(errors.to_json())
}

/// Load configuration using an explicit environment lookup.
pub fn load_config_with(env: EnvLookup<'_>) -> Result<Config, AppError> {
    let path = config_file_path(env);
    let file = read_config_file(&path)?;
    tracing::debug!(path = %path.display(), found = file.is_some(), "loading configuration");
    config_from_raw(&merge_sources(file, env))
}

/// Load configuration from the config file and the process environment.
pub fn load_config() -> Result<Config, AppError> {
    load_config_with(&process_env)
}

/// Write `config` as TOML, creating parent directories.
///
/// The file holds the API key, so on unix it is created owner-only.
pub fn write_config(path: &Path, config: &Config) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| AppError::from_io_write(&e, parent))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| AppError::unexpected(format!("could not serialize config: {}", e)))?;
    fs::write(path, content).map_err(|e| AppError::from_io_write(&e, path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AppError::from_io_write(&e, path))?;
    }

    tracing::debug!(path = %path.display(), "wrote configuration");
    Ok(())
}
