use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use configparser::ini::Ini;

use crate::error::ConfigError;
use crate::store::DEFAULT_BUCKETS;

/// Log configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Log file path, if not set, logs are written to stderr
    pub file: Option<String>,
    /// Log level, default is "info"
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

/// Hash table configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixed bucket count, never resized
    pub buckets: NonZeroUsize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buckets: NonZeroUsize::new(DEFAULT_BUCKETS).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub engine: EngineConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from an INI file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_ini_str(&text).map_err(|e| match e {
            ConfigError::Load { reason, .. } => ConfigError::Load {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse configuration from INI text
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(|reason| ConfigError::Load {
            path: "<inline>".to_string(),
            reason,
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let buckets = ini
            .getuint("engine", "buckets")
            .map_err(|reason| ConfigError::InvalidValue {
                section: "engine",
                key: "buckets",
                reason,
            })?;
        if let Some(buckets) = buckets {
            config.engine.buckets = usize::try_from(buckets)
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or_else(|| ConfigError::InvalidValue {
                    section: "engine",
                    key: "buckets",
                    reason: format!("must be a positive integer, got {}", buckets),
                })?;
        }

        if let Some(level) = ini.get("log", "level") {
            config.log.level = level;
        }
        config.log.file = ini.get("log", "file").filter(|f| !f.is_empty());

        Ok(config)
    }
}

/// Whether `n` is prime; composite bucket counts spread DJB2 values poorly
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}
