//! # Scan Settings
//!
//! Runtime knobs for the scan session.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GASTRACK_*`)
//! 2. Defaults (this file)

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::DEFAULT_REARM_WINDOW_MS;

/// Settings for a [`ScanSession`](crate::session::ScanSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSettings {
    /// Minimum delay between two accepted reads for the same target.
    /// Default: 1500 ms
    pub rearm_window_ms: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            rearm_window_ms: DEFAULT_REARM_WINDOW_MS,
        }
    }
}

impl ScanSettings {
    /// Creates settings with a custom re-arm window.
    pub fn with_rearm_window_ms(rearm_window_ms: u64) -> Self {
        ScanSettings { rearm_window_ms }
    }

    /// Loads settings from the environment, falling back to defaults.
    ///
    /// ## Environment Variables
    /// - `GASTRACK_SCAN_REARM_MS`: re-arm window in milliseconds
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = ScanSettings::default();

        if let Some(raw) = lookup("GASTRACK_SCAN_REARM_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => settings.rearm_window_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid GASTRACK_SCAN_REARM_MS"),
            }
        }

        settings
    }

    /// The re-arm window as a chrono duration.
    pub fn rearm_window(&self) -> TimeDelta {
        let ms = i64::try_from(self.rearm_window_ms).unwrap_or(i64::MAX);
        TimeDelta::try_milliseconds(ms).unwrap_or(TimeDelta::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let settings = ScanSettings::default();
        assert_eq!(settings.rearm_window_ms, 1500);
        assert_eq!(settings.rearm_window(), TimeDelta::milliseconds(1500));
    }

    #[test]
    fn test_lookup_overrides() {
        let settings = ScanSettings::from_lookup(|key| {
            (key == "GASTRACK_SCAN_REARM_MS").then(|| " 800 ".to_string())
        });
        assert_eq!(settings.rearm_window_ms, 800);

        let settings = ScanSettings::from_lookup(|_| Some("soon".to_string()));
        assert_eq!(settings, ScanSettings::default());
    }

    #[test]
    fn test_huge_window_saturates() {
        let settings = ScanSettings::with_rearm_window_ms(u64::MAX);
        assert_eq!(settings.rearm_window(), TimeDelta::MAX);
    }
}
