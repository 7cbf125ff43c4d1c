pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use std::path::Path;
use toml_config::JournalConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "journal.toml";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "learning-journal")]
#[command(about = "Console exercises from the Montressor learning journal")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Path to a journal TOML file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Directory the file exercises work in")]
    pub base_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Chapter 1: greetings, input and type conversion
    Basics,
    /// Chapter 2: the gates of Moria riddle
    Gate,
    /// Chapter 3: Rock, Paper, Scissors, Lizard, Spock against Sheldon
    Rpsls {
        #[arg(long, help = "Seed Sheldon's moves for a repeatable game")]
        seed: Option<u64>,
    },
    /// Chapter 4: Collatz sequences
    Collatz,
    /// Chapter 5: the integer-only division calculator
    Divide,
    /// Chapter 6: the CatHaven roster menu
    Cathaven,
    /// Chapter 7: the Starboard Tankard guest register
    Tavern,
    /// Chapter 8: text cleaning and formatting
    TextPrep,
    /// Chapter 9: regex extraction, validation and masking
    Regex {
        #[arg(long, help = "Read the text to scan from this file instead of the console")]
        input: Option<String>,
        #[arg(long, help = "Also write the results to this file")]
        output: Option<String>,
    },
    /// Chapter 10: paths, text files and the shelf
    FileIo {
        #[arg(long, help = "Seed the critical event sampling")]
        seed: Option<u64>,
    },
    /// Chapter 11: directory copies and zip backups
    Backup {
        #[arg(long, help = "Remove the backup folder afterwards")]
        cleanup: bool,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_journal_config(&self) -> Result<JournalConfig> {
        let config = resolve_journal_config(self.config.as_deref())?;
        Ok(config.with_base_dir(self.base_dir.clone()))
    }
}

/// Explicit path first, then `journal.toml` in the working directory, then defaults.
pub fn resolve_journal_config(explicit: Option<&str>) -> Result<JournalConfig> {
    match explicit {
        Some(path) => JournalConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::debug!("using {} from the working directory", DEFAULT_CONFIG_FILE);
            JournalConfig::from_file(DEFAULT_CONFIG_FILE)
        }
        None => Ok(JournalConfig::default()),
    }
}
