//! CLI command definitions and handlers

mod config;
mod detect;
mod learn;
mod models;

use anyhow::Result;
use chared::config::UserConfig;
use chared::store::{resolve_models_dir, ModelStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chared - character encoding detection for text in a known language
#[derive(Parser, Debug)]
#[command(name = "chared")]
#[command(
    version,
    about = "Detect the character encoding of text in a known language",
    long_about = "chared compares the character frequency profile of the input against \
per-encoding profiles trained for one language, and reports the best matching \
encoding(s). The language is chosen by picking its model.",
    after_help = "\
Examples:
  chared detect -m czech page.html          Detect encoding of a file
  chared detect -m czech --all *.txt        Show every candidate with its score
  chared learn sample.txt -e czech.toml -o czech.edm
                                            Learn a model from a UTF-8 sample
  chared models                             List installed models"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Directory holding <language>.edm models
    #[arg(long, global = true)]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect the encoding of one or more files
    #[command(after_help = "\
Examples:
  chared detect -m czech a.txt b.txt         One line per file: <path>: <encoding(s)>
  chared detect -m ./slovak.edm a.txt        Use a model file instead of an installed model
  chared detect -m czech --format json a.txt JSON output for scripting")]
    Detect {
        /// Model id (language) or path to an .edm file
        #[arg(long, short = 'm')]
        model: Option<String>,

        /// Print every candidate with its score and rank
        #[arg(long)]
        all: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Learn a model from a UTF-8 sample text
    #[command(after_help = "\
Manifest format (TOML):
  [model]
  encodings = [\"utf_8\", \"windows_1250\", \"iso8859_2\"]   # also the preference order
  reduce = true")]
    Learn {
        /// Sample text of the language, UTF-8 encoded
        sample: PathBuf,

        /// Training manifest listing the encodings
        #[arg(long, short = 'e')]
        manifest: PathBuf,

        /// Output model file
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// List installed models
    Models {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Manage user configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create ~/.config/chared/config.toml with commented defaults
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run(cli: Cli) -> Result<()> {
    let user_config = UserConfig::load()?;
    let store = ModelStore::new(resolve_models_dir(
        cli.models_dir.as_deref(),
        user_config.models_dir(),
    ));
    tracing::debug!("Using models directory {}", store.dir().display());

    match cli.command {
        Commands::Detect {
            model,
            all,
            format,
            files,
        } => {
            let model_id = match model.as_deref().or(user_config.default_model()) {
                Some(id) => id.to_string(),
                None => anyhow::bail!(
                    "No model given. Use --model <LANGUAGE> or set default_model in {}. {}",
                    UserConfig::user_config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "the user config".to_string()),
                    models::available_hint(&store)
                ),
            };
            detect::run(&store, &model_id, &files, all, &format)
        }

        Commands::Learn {
            sample,
            manifest,
            output,
        } => learn::run(&sample, &manifest, &output),

        Commands::Models { format } => models::run(&store, &format),

        Commands::Config { action } => config::run(action, &user_config, &store),
    }
}
