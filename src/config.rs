//! Mapper configuration.
//!
//! Built from the string options a host passes to the processor:
//!
//! | key | value |
//! |---|---|
//! | `kewt.log.level` | `error`, `warn`, `info`, `debug` or `trace` |
//! | `kewt.whitelist` | space-separated namespace prefixes to process |
//! | `kewt.blacklist` | space-separated namespace prefixes to skip |
//! | `kewt.lift.max-depth` | longest property path a directive may name |
//!
//! # Example
//!
//! ```
//! use kewt::{LogLevel, MapperConfig};
//!
//! let config = MapperConfig::from_options([
//!     ("kewt.log.level", "debug"),
//!     ("kewt.blacklist", "com.acme.legacy com.acme.gen"),
//! ])
//! .unwrap();
//!
//! assert_eq!(config.log_level, LogLevel::Debug);
//! assert!(config.should_skip(&"com.acme.gen.PersonMapper".into()));
//! assert!(!config.should_skip(&"com.acme.PersonMapper".into()));
//! ```

use kewt_core::QualifiedName;
use kewt_mapper::DEFAULT_MAX_LIFT_DEPTH;
use tracing::debug;

use crate::KewtError;
use crate::logging::LogLevel;

pub const LOG_LEVEL_KEY: &str = "kewt.log.level";
pub const WHITELIST_KEY: &str = "kewt.whitelist";
pub const BLACKLIST_KEY: &str = "kewt.blacklist";
pub const MAX_LIFT_DEPTH_KEY: &str = "kewt.lift.max-depth";

/// Settings shared by every unit processed through a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    pub log_level: LogLevel,
    /// When non-empty, only units inside one of these namespaces are processed.
    pub whitelist: Vec<String>,
    /// Units inside one of these namespaces are skipped.
    pub blacklist: Vec<String>,
    pub max_lift_depth: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            max_lift_depth: DEFAULT_MAX_LIFT_DEPTH,
        }
    }
}

impl MapperConfig {
    /// Parse host options. Keys outside the `kewt.` namespace are ignored.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, KewtError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                LOG_LEVEL_KEY => {
                    config.log_level =
                        LogLevel::parse(value).ok_or_else(|| invalid(key, value, "unknown log level"))?;
                }
                WHITELIST_KEY => config.whitelist = prefixes(value),
                BLACKLIST_KEY => config.blacklist = prefixes(value),
                MAX_LIFT_DEPTH_KEY => {
                    config.max_lift_depth = value
                        .trim()
                        .parse()
                        .map_err(|_| invalid(key, value, "expected a non-negative integer"))?;
                }
                other if other.starts_with("kewt.") => {
                    return Err(invalid(other, value, "unknown option"));
                }
                other => debug!(key = other, "ignoring option"),
            }
        }
        Ok(config)
    }

    /// Whether a unit declared under `name` is excluded by the lists.
    pub fn should_skip(&self, name: &QualifiedName) -> bool {
        (!self.whitelist.is_empty() && !self.whitelist.iter().any(|p| name.is_within(p)))
            || self.blacklist.iter().any(|p| name.is_within(p))
    }
}

fn prefixes(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn invalid(key: &str, value: &str, reason: &str) -> KewtError {
    KewtError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
