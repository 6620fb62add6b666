//! CLI definition using clap.
//!
//! Flags override the matching values from the config file.

use clap::Parser;
use std::path::PathBuf;

use jitterbug::config::Config;

/// Jitterbug - print ticks from a jittered ticker
#[derive(Parser, Debug)]
#[command(name = "jitterbug")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Nominal interval between ticks, in milliseconds
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many ticks
    #[arg(short = 'n', long)]
    pub count: Option<u64>,

    /// Print ticks as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Apply command-line overrides to a loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(interval_ms) = self.interval_ms {
            config.ticker.interval_ms = interval_ms;
        }
        if let Some(count) = self.count {
            config.ticker.count = Some(count);
        }
        if self.verbose {
            config.log_level = Some("debug".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["jitterbug"]);
        assert!(cli.config.is_none());
        assert!(!cli.is_verbose());
        assert!(cli.interval_ms.is_none());
        assert!(cli.count.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["jitterbug", "-i", "250", "-n", "5", "--json", "-c", "ticks.yml"]);
        assert_eq!(cli.interval_ms, Some(250));
        assert_eq!(cli.count, Some(5));
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("ticks.yml")));
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from(["jitterbug", "--interval-ms", "50", "--count", "2", "--verbose"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.ticker.interval_ms, 50);
        assert_eq!(config.ticker.count, Some(2));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_apply_keeps_config_without_flags() {
        let cli = Cli::parse_from(["jitterbug"]);
        let mut config = Config::default();
        config.ticker.interval_ms = 700;
        cli.apply(&mut config);
        assert_eq!(config.ticker.interval_ms, 700);
        assert_eq!(config.ticker.count, None);
    }
}
