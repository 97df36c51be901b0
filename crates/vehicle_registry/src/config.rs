//! Registry configuration.
//!
//! Values come from the environment, falling back to defaults:
//!
//! | variable                      | default | meaning                                   |
//! |-------------------------------|---------|-------------------------------------------|
//! | `VEHICLES_TIME_WINDOW`        | `5s`    | staleness window for proximity queries    |
//! | `VEHICLES_PARALLEL_THRESHOLD` | `1024`  | snapshot size that triggers rayon fan-out |
//! | `VEHICLES_EVICTION_HORIZON`   | unset   | idle time after which vehicles are evicted |
//!
//! Durations accept a unit suffix (`ms`, `s`, `m`, `h`); a bare number is
//! seconds.

use std::time::Duration;

use crate::error::RegistryError;
use crate::proximity::DEFAULT_PARALLEL_THRESHOLD;

/// Environment variable holding the staleness window.
pub const TIME_WINDOW_ENV: &str = "VEHICLES_TIME_WINDOW";
/// Environment variable holding the parallel filtering threshold.
pub const PARALLEL_THRESHOLD_ENV: &str = "VEHICLES_PARALLEL_THRESHOLD";
/// Environment variable holding the eviction horizon.
pub const EVICTION_HORIZON_ENV: &str = "VEHICLES_EVICTION_HORIZON";

/// Default staleness window.
pub const DEFAULT_TIME_WINDOW: Duration = Duration::from_secs(5);

/// Configuration for a [`VehicleRegistry`](crate::VehicleRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Positions older than this are ignored by proximity queries.
    pub time_window: Duration,
    /// Snapshots with at least this many vehicles are filtered in parallel.
    pub parallel_threshold: usize,
    /// Vehicles idle for longer than this may be evicted. `None` disables
    /// eviction.
    pub eviction_horizon: Option<Duration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            time_window: DEFAULT_TIME_WINDOW,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            eviction_horizon: None,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if a variable is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, RegistryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIME_WINDOW_ENV) {
            config.time_window = parse_duration(TIME_WINDOW_ENV, &raw)?;
        }
        if let Some(raw) = lookup(PARALLEL_THRESHOLD_ENV) {
            config.parallel_threshold = raw.trim().parse().map_err(|_| RegistryError::InvalidConfig {
                key: PARALLEL_THRESHOLD_ENV,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(EVICTION_HORIZON_ENV) {
            config.eviction_horizon = Some(parse_duration(EVICTION_HORIZON_ENV, &raw)?);
        }

        Ok(config)
    }

    /// Override the staleness window.
    #[must_use]
    pub fn with_time_window(mut self, window: Duration) -> Self {
        self.time_window = window;
        self
    }

    /// Override the parallel filtering threshold.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enable eviction of vehicles idle for longer than `horizon`.
    #[must_use]
    pub fn with_eviction_horizon(mut self, horizon: Duration) -> Self {
        self.eviction_horizon = Some(horizon);
        self
    }
}

/// Parse a strictly positive duration such as `5s`, `250ms`, `2m` or `1.5`.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidConfig`] naming `key` if `raw` is not a
/// positive duration.
pub fn parse_duration(key: &'static str, raw: &str) -> Result<Duration, RegistryError> {
    let invalid = || RegistryError::InvalidConfig {
        key,
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    let value: f64 = number.parse().map_err(|_| invalid())?;
    let secs = match unit.trim() {
        "ms" => value / 1000.0,
        "" | "s" => value,
        "m" => value * 60.0,
        "h" => value * 3600.0,
        _ => return Err(invalid()),
    };

    let duration = Duration::try_from_secs_f64(secs).map_err(|_| invalid())?;
    if duration.is_zero() {
        return Err(invalid());
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.time_window, Duration::from_secs(5));
        assert!(config.eviction_horizon.is_none());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = RegistryConfig::from_lookup(lookup(&[
            (TIME_WINDOW_ENV, "250ms"),
            (PARALLEL_THRESHOLD_ENV, "64"),
            (EVICTION_HORIZON_ENV, "10m"),
        ]))
        .unwrap();
        assert_eq!(config.time_window, Duration::from_millis(250));
        assert_eq!(config.parallel_threshold, 64);
        assert_eq!(config.eviction_horizon, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_invalid_threshold() {
        let err = RegistryConfig::from_lookup(lookup(&[(PARALLEL_THRESHOLD_ENV, "many")]))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidConfig {
                key: PARALLEL_THRESHOLD_ENV,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_time_window_names_key_and_value() {
        let err = RegistryConfig::from_lookup(lookup(&[(TIME_WINDOW_ENV, "soon")])).unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidConfig {
                key: TIME_WINDOW_ENV,
                value: "soon".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid configuration value for VEHICLES_TIME_WINDOW: \"soon\""
        );
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("k", "5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("k", "5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("k", " 1.5 s ").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("k", "2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("k", "1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("k", "100ms").unwrap(), Duration::from_millis(100));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("k", "").is_err());
        assert!(parse_duration("k", "0s").is_err());
        assert!(parse_duration("k", "-5s").is_err());
        assert!(parse_duration("k", "5 days").is_err());
        assert!(parse_duration("k", "s").is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = RegistryConfig::default()
            .with_time_window(Duration::from_secs(30))
            .with_parallel_threshold(8)
            .with_eviction_horizon(Duration::from_secs(60));
        assert_eq!(config.time_window, Duration::from_secs(30));
        assert_eq!(config.parallel_threshold, 8);
        assert_eq!(config.eviction_horizon, Some(Duration::from_secs(60)));
    }
}
