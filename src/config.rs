//! Configuration Module
//!
//! Cycle timing for the eviction scheduler, loaded from defaults, environment
//! variables or a JSON document.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::Instant;

use crate::error::{CacheError, Result};

/// Default maximum interval between idle sweeps, in seconds.
pub const DEFAULT_CYCLE_TIME_SECS: f64 = 1800.0;

/// Default eviction tolerance window, in seconds.
pub const DEFAULT_CYCLE_ACCURACY_SECS: f64 = 1.0;

/// Eviction scheduler configuration.
///
/// Both values are expressed in seconds (fractions allowed) and must be
/// positive. They are converted to [`Duration`]s when the cache is built.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheConfig {
    /// Maximum interval between sweeps when no expiry is pending sooner
    pub cycle_time: f64,
    /// Entries may be evicted this early; also the minimum sweep resolution
    pub cycle_accuracy: f64,
}

impl CacheConfig {
    /// Creates a config from explicit second values.
    pub fn new(cycle_time: f64, cycle_accuracy: f64) -> Self {
        Self {
            cycle_time,
            cycle_accuracy,
        }
    }

    /// Loads values from environment variables, falling back to defaults.
    ///
    /// # Environment Variables
    /// - `CACHE_CYCLE_TIME` - Idle sweep interval in seconds (default: 1800)
    /// - `CACHE_CYCLE_ACCURACY` - Tolerance window in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            cycle_time: env::var("CACHE_CYCLE_TIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CYCLE_TIME_SECS),
            cycle_accuracy: env::var("CACHE_CYCLE_ACCURACY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CYCLE_ACCURACY_SECS),
        }
    }

    /// Parses `{"cycleTime": .., "cycleAccuracy": ..}`; missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CacheError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects non-positive or non-finite timings.
    pub fn validate(&self) -> Result<()> {
        check_positive("cycleTime", self.cycle_time)?;
        check_positive("cycleAccuracy", self.cycle_accuracy)?;
        Ok(())
    }

    /// Idle sweep interval.
    pub fn cycle_time(&self) -> Result<Duration> {
        to_duration("cycleTime", self.cycle_time)
    }

    /// Early-eviction tolerance window.
    pub fn cycle_accuracy(&self) -> Result<Duration> {
        to_duration("cycleAccuracy", self.cycle_accuracy)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cycle_time: DEFAULT_CYCLE_TIME_SECS,
            cycle_accuracy: DEFAULT_CYCLE_ACCURACY_SECS,
        }
    }
}

fn check_positive(name: &str, secs: f64) -> Result<()> {
    if secs.is_finite() && secs > 0.0 {
        Ok(())
    } else {
        Err(CacheError::InvalidConfig(format!(
            "{} must be a positive number of seconds, got {}",
            name, secs
        )))
    }
}

fn to_duration(name: &str, secs: f64) -> Result<Duration> {
    check_positive(name, secs)?;
    let duration = Duration::try_from_secs_f64(secs)
        .map_err(|e| CacheError::InvalidConfig(format!("{}: {}", name, e)))?;
    // Sub-millisecond values would arm a zero-length timer
    if duration < Duration::from_millis(1) {
        return Err(CacheError::InvalidConfig(format!(
            "{} must be at least one millisecond, got {}s",
            name, secs
        )));
    }
    if Instant::now().checked_add(duration).is_none() {
        return Err(CacheError::InvalidConfig(format!(
            "{} of {}s overflows the clock",
            name, secs
        )));
    }
    Ok(duration)
}
