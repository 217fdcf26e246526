use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use webloc_engine::NamingStrategy;

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Fetch each page's title.
    Direct,
    /// Shorten current names through the simplification service.
    Batch,
}

impl From<StrategyArg> for NamingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Direct => NamingStrategy::Direct,
            StrategyArg::Batch => NamingStrategy::Batch,
        }
    }
}

/// Deduplicate and rename .webloc shortcuts after the pages they point at.
#[derive(Debug, Parser)]
#[command(name = "webloc_tidy", version)]
pub struct Cli {
    /// Directory to scan recursively for .webloc files.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// How display names are obtained.
    #[arg(long, value_enum, default_value_t = StrategyArg::Direct)]
    pub strategy: StrategyArg,

    /// Names per simplification request.
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Attempts per batch before its records are quarantined.
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Show what would be renamed without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Report duplicates but leave them on disk.
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Key for the simplification service.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// RON config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the log to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Write the run report as JSON.
    #[arg(long, value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Write a shell script that moves failed and quarantined shortcuts aside.
    #[arg(long, value_name = "FILE")]
    pub remediation_script: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Flags given on the command line win over the config file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if self.keep_duplicates {
            config.remove_duplicates = false;
        }
    }
}
