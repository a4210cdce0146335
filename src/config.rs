//! Dashboard configuration and environment variable handling.

use std::env;
use std::path::PathBuf;

/// Dataset read at startup when `LAUNCH_DASH_DATA` is not set.
pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";

/// Dashboard configuration, resolved once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Launch table loaded at startup.
    pub data_path: PathBuf,
    /// Lower bound of the payload range control (kg).
    pub payload_min: f64,
    /// Upper bound of the payload range control (kg).
    pub payload_max: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            payload_min: 0.0,
            payload_max: 10_000.0,
        }
    }
}

impl DashboardConfig {
    /// Build the configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `LAUNCH_DASH_DATA` (optional, default: `spacex_launch_dash.csv`): dataset path
    /// - `LAUNCH_DASH_PAYLOAD_MIN` (optional, default: 0): payload control lower bound
    /// - `LAUNCH_DASH_PAYLOAD_MAX` (optional, default: 10000): payload control upper bound
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, default: f64| -> f64 {
            match lookup(key) {
                None => default,
                Some(raw) => match raw.trim().parse::<f64>() {
                    Ok(v) if v.is_finite() => v,
                    _ => {
                        log::warn!("{key}={raw:?} is not a number, using {default}");
                        default
                    }
                },
            }
        };

        let payload_min = number("LAUNCH_DASH_PAYLOAD_MIN", defaults.payload_min);
        let payload_max = number("LAUNCH_DASH_PAYLOAD_MAX", defaults.payload_max);
        let (payload_min, payload_max) = if payload_min <= payload_max {
            (payload_min, payload_max)
        } else {
            log::warn!(
                "payload bounds {payload_min}..{payload_max} are inverted, using defaults"
            );
            (defaults.payload_min, defaults.payload_max)
        };

        Self {
            data_path: lookup("LAUNCH_DASH_DATA")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            payload_min,
            payload_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> DashboardConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]), DashboardConfig::default());
        assert_eq!(
            DashboardConfig::default().data_path,
            PathBuf::from("spacex_launch_dash.csv")
        );
    }

    #[test]
    fn test_overrides() {
        let cfg = config_from(&[
            ("LAUNCH_DASH_DATA", "data/launches.parquet"),
            ("LAUNCH_DASH_PAYLOAD_MAX", "16000"),
        ]);
        assert_eq!(cfg.data_path, PathBuf::from("data/launches.parquet"));
        assert_eq!(cfg.payload_min, 0.0);
        assert_eq!(cfg.payload_max, 16_000.0);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = config_from(&[
            ("LAUNCH_DASH_PAYLOAD_MIN", "lots"),
            ("LAUNCH_DASH_DATA", "  "),
        ]);
        assert_eq!(cfg, DashboardConfig::default());

        let inverted = config_from(&[
            ("LAUNCH_DASH_PAYLOAD_MIN", "9000"),
            ("LAUNCH_DASH_PAYLOAD_MAX", "100"),
        ]);
        assert_eq!(inverted.payload_min, 0.0);
        assert_eq!(inverted.payload_max, 10_000.0);
    }
}
