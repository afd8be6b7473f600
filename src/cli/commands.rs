use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use crate::config::{config_file_path, config_from_raw, load_config, write_config};
use crate::errors::{AppError, ErrorCode};
use crate::schema::{EntityKind, ValidationErrors, validate};
use crate::utils::{format_path_with_tilde, process_env};

#[derive(Parser)]
#[command(name = "cchistory")]
#[command(version = "0.1.0")]
#[command(about = "Semantic search over Claude conversation history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file with the given API key
    Init {
        /// OpenAI API key used for embeddings
        #[arg(long)]
        api_key: String,
        /// Where the index and config live (defaults to ~/.claude-history)
        #[arg(long)]
        data_dir: Option<String>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show the effective configuration
    Config,
    /// Validate a JSON document as one of the entity kinds
    Validate {
        /// config, query, result, conversation, message, embedding or error
        kind: EntityKind,
        /// JSON file to read; stdin when omitted
        file: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { api_key, data_dir, force }) => {
            init(&api_key, data_dir.as_deref(), force)?;
        }
        Some(Commands::Config) => {
            show_config()?;
        }
        Some(Commands::Validate { kind, file }) => {
            if let Err(errors) = validate_input(kind, file.as_deref())? {
                for issue in &errors {
                    eprintln!("{}", issue);
                }
                let label = input_label(file.as_deref());
                bail!("{} is not a valid {} ({} issue(s))", label, kind, errors.len());
            }
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn init(api_key: &str, data_dir: Option<&str>, force: bool) -> Result<(), AppError> {
    let path = config_file_path(&process_env);
    if path.exists() && !force {
        let message = format!(
            "Config file already exists: {} (use --force to overwrite)",
            format_path_with_tilde(&path)
        );
        return Err(AppError::new(ErrorCode::ConfigError, message));
    }

    let mut raw = json!({ "apiKey": api_key });
    if let Some(dir) = data_dir {
        raw["dataDirectory"] = Value::String(dir.to_string());
    }
    let config = config_from_raw(&raw)?;
    write_config(&path, &config)?;

    println!("Wrote {}", format_path_with_tilde(&path));
    println!("API key: {}", config.masked_api_key());
    println!("Data directory: {}", config.data_directory);
    Ok(())
}

fn show_config() -> Result<(), AppError> {
    let config = load_config()?;
    let path = config_file_path(&process_env);

    println!("cchistory configuration");
    println!("=======================");
    println!("Config file: {}", format_path_with_tilde(&path));
    println!("API key: {}", config.masked_api_key());
    println!("Data directory: {}", format_path_with_tilde(&config.data_path()));
    println!("Embedding model: {}", config.embedding_model);
    println!("Chunk size: {}", config.chunk_size);
    println!("Max concurrency: {}", config.max_concurrency);
    Ok(())
}

/// Outer error: the input could not be read or parsed.
/// Inner error: it parsed but broke the entity's rules.
fn validate_input(
    kind: EntityKind,
    file: Option<&Path>,
) -> Result<Result<(), ValidationErrors>, AppError> {
    let content = match file {
        Some(path) => fs::read_to_string(path).map_err(|e| AppError::from_io(&e, path))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| AppError::unexpected(format!("could not read stdin: {}", e)))?;
            buffer
        }
    };

    let raw: Value = serde_json::from_str(&content).map_err(|e| {
        AppError::new(ErrorCode::ValidationError, format!("Invalid JSON: {}", e))
    })?;

    Ok(validate(kind, &raw).map(|entity| {
        // Serializing plain data to a String does not fail
        let pretty = serde_json::to_string_pretty(&entity.to_json()).unwrap_or_default();
        println!("{}", pretty);
    }))
}

fn input_label(file: Option<&Path>) -> String {
    match file {
        Some(path) => format_path_with_tilde(path),
        None => "stdin".to_string(),
    }
}
