//! Configuration for the jitterbug binary.
//!
//! Loaded from an explicit path, ~/.config/jitterbug/jitterbug.yml or
//! ./jitterbug.yml, falling back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;

use crate::error::{JitterbugError, Result};
use crate::jitter::{Jitter, NoJitter, Normal, Uniform};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub ticker: TickerConfig,
    pub jitter: JitterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Nominal interval between ticks
    pub interval_ms: u64,
    /// Stop after this many ticks; unlimited when absent
    pub count: Option<u64>,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            count: None,
        }
    }
}

/// Which jitter strategy to build, and its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum JitterConfig {
    /// Tick exactly on the nominal interval
    #[default]
    None,
    /// Delays uniform in `[min_ms, interval)`
    Uniform {
        #[serde(default)]
        min_ms: u64,
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Interval plus a normally distributed offset
    Normal {
        stdev_ms: u64,
        #[serde(default)]
        mean_ms: i64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl JitterConfig {
    /// Build the configured strategy.
    pub fn build(&self) -> Result<Box<dyn Jitter + Send>> {
        let jitter: Box<dyn Jitter + Send> = match *self {
            JitterConfig::None => Box::new(NoJitter),
            JitterConfig::Uniform { min_ms, seed } => {
                let min = Duration::from_millis(min_ms);
                match seed {
                    Some(seed) => Box::new(Uniform::with_seed(min, seed)),
                    None => Box::new(Uniform::new(min)),
                }
            }
            JitterConfig::Normal {
                stdev_ms,
                mean_ms,
                seed,
            } => {
                let mean = TimeDelta::try_milliseconds(mean_ms)
                    .ok_or_else(|| JitterbugError::InvalidConfig(format!("jitter.mean_ms {} out of range", mean_ms)))?;
                let stdev = Duration::from_millis(stdev_ms);
                match seed {
                    Some(seed) => Box::new(Normal::with_seed(mean, stdev, seed)?),
                    None => Box::new(Normal::new(mean, stdev)?),
                }
            }
        };
        Ok(jitter)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            ticker: TickerConfig::default(),
            jitter: JitterConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Search order:
    /// 1. Explicit path if provided (must load)
    /// 2. ~/.config/<project>/<project>.yml
    /// 3. ./<project>.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        let (config, skipped) = Self::load_first(candidates);
        for e in &skipped {
            log::warn!("Skipping config: {}", e);
        }
        Ok(config)
    }

    /// Load the first candidate file that exists and parses.
    ///
    /// Candidates that exist but fail to load are skipped and returned
    /// alongside the config so the caller can report them. Falls back to
    /// defaults when no candidate loads.
    pub fn load_first<I>(candidates: I) -> (Self, Vec<JitterbugError>)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut skipped = Vec::new();
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => return (config, skipped),
                Err(e) => skipped.push(e),
            }
        }

        log::info!("No usable config file found, using defaults");
        (Self::default(), skipped)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| JitterbugError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| JitterbugError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.ticker.interval_ms == 0 {
            return Err(JitterbugError::InvalidConfig("ticker.interval_ms must be > 0".to_string()));
        }
        if self.ticker.count == Some(0) {
            return Err(JitterbugError::InvalidConfig("ticker.count must be > 0".to_string()));
        }
        if let JitterConfig::Uniform { min_ms, .. } = self.jitter {
            if min_ms > self.ticker.interval_ms {
                return Err(JitterbugError::InvalidConfig(format!(
                    "jitter.min_ms ({}) must not exceed ticker.interval_ms ({})",
                    min_ms, self.ticker.interval_ms
                )));
            }
        }
        Ok(())
    }

    /// Nominal tick interval
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.ticker.interval_ms)
    }
}
