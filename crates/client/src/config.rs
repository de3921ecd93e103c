//! Client configuration from environment variables and command-line flags.
use std::env;
use std::path::PathBuf;

use clap::Parser;

/// How city summaries are written to stdout.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, strum::EnumString, strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

/// Command-line arguments.
#[derive(Debug, Default, Parser)]
#[command(name = "citysim")]
#[command(about = "Text-driven city builder simulation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Scenario file to load (overrides CITYSIM_INPUT)
    pub input: Option<PathBuf>,

    /// TOML file with city configuration (overrides CITYSIM_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of economy ticks to run after the upgrade passes
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Summary output format
    #[arg(long, value_enum)]
    pub format: Option<SummaryFormat>,

    /// Also write logs to DIR/citysim.log
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write logs to the platform cache directory
    #[arg(long, conflicts_with = "log_dir")]
    pub log_to_file: bool,

    /// Skip the shared-slot walkthrough
    #[arg(long)]
    pub no_demo: bool,
}

/// Resolved client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub input: PathBuf,
    pub config_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub format: SummaryFormat,
    /// Overrides `economy_ticks` from the config file.
    pub economy_ticks: Option<u32>,
    /// `Some(false)` disables the walkthrough regardless of the config file.
    pub run_slot_demo: Option<bool>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(Self::DEFAULT_INPUT),
            config_file: None,
            log_dir: None,
            format: SummaryFormat::Text,
            economy_ticks: None,
            run_slot_demo: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_INPUT: &'static str = "city.txt";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CITYSIM_INPUT` - Scenario file (default: city.txt)
    /// - `CITYSIM_CONFIG` - City configuration TOML (optional)
    /// - `CITYSIM_LOG_DIR` - Directory for the log file (optional)
    /// - `CITYSIM_SUMMARY_FORMAT` - `text` or `json` (default: text)
    /// - `CITYSIM_ECONOMY_TICKS` - Economy ticks to run (optional)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(input) = env::var("CITYSIM_INPUT") {
            config.input = PathBuf::from(input);
        }
        config.config_file = env::var("CITYSIM_CONFIG").ok().map(PathBuf::from);
        config.log_dir = env::var("CITYSIM_LOG_DIR").ok().map(PathBuf::from);

        if let Some(format) = read_env::<SummaryFormat>("CITYSIM_SUMMARY_FORMAT") {
            config.format = format;
        }
        config.economy_ticks = read_env::<u32>("CITYSIM_ECONOMY_TICKS");

        config
    }

    /// Applies command-line flags on top of this configuration.
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let Some(input) = cli.input {
            self.input = input;
        }
        if let Some(path) = cli.config {
            self.config_file = Some(path);
        }
        if let Some(dir) = cli.log_dir {
            self.log_dir = Some(dir);
        } else if cli.log_to_file {
            self.log_dir = Some(default_log_directory());
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if let Some(ticks) = cli.ticks {
            self.economy_ticks = Some(ticks);
        }
        if cli.no_demo {
            self.run_slot_demo = Some(false);
        }
        self
    }
}

/// Platform cache directory for log files.
pub fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "citysim")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| env::temp_dir().join("citysim").join("logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_defaults() {
        let cli = Cli::parse_from([
            "citysim",
            "town.txt",
            "--ticks",
            "3",
            "--format",
            "json",
            "--no-demo",
        ]);
        let config = ClientConfig::default().with_cli(cli);

        assert_eq!(config.input, PathBuf::from("town.txt"));
        assert_eq!(config.economy_ticks, Some(3));
        assert_eq!(config.format, SummaryFormat::Json);
        assert_eq!(config.run_slot_demo, Some(false));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn empty_cli_keeps_config() {
        let base = ClientConfig {
            economy_ticks: Some(2),
            ..ClientConfig::default()
        };
        let config = base.clone().with_cli(Cli::parse_from(["citysim"]));
        assert_eq!(config, base);
    }

    #[test]
    fn log_to_file_uses_cache_dir() {
        let cli = Cli::parse_from(["citysim", "--log-to-file"]);
        let config = ClientConfig::default().with_cli(cli);
        assert_eq!(config.log_dir, Some(default_log_directory()));
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<SummaryFormat>(), Ok(SummaryFormat::Json));
        assert!("yaml".parse::<SummaryFormat>().is_err());
    }
}
