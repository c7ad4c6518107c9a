//! Run configuration.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File name looked up by [`RunConfig::load`].
pub const CONFIG_FILE_NAME: &str = "stfu.toml";

/// Settings that control how a suite runs its tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Record panics in test bodies as failures (default: true).
    /// When false, a panicking test unwinds out of `run`.
    pub catch_panics: bool,

    /// Tests slower than this many milliseconds are logged at warn level.
    pub slow_test_threshold_ms: Option<u64>,

    /// Log a pass/fail summary at info level after each run (default: true).
    pub log_results: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            catch_panics: true,
            slow_test_threshold_ms: None,
            log_results: true,
        }
    }
}

impl RunConfig {
    /// Load configuration from `stfu.toml` in `dir`, or defaults if absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| HarnessError::ConfigError(format!("failed to read config: {}", e)))?;
            Self::from_toml(&content)
        } else {
            Ok(RunConfig::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| HarnessError::ConfigError(format!("failed to parse config: {}", e)))
    }

    /// Save configuration to `stfu.toml` in `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| HarnessError::ConfigError(format!("failed to serialize config: {}", e)))?;
        fs::write(&path, content)
            .map_err(|e| HarnessError::ConfigError(format!("failed to write config: {}", e)))?;
        Ok(())
    }

    /// Returns the slow-test threshold as a Duration.
    pub fn slow_test_threshold(&self) -> Option<Duration> {
        self.slow_test_threshold_ms.map(Duration::from_millis)
    }

    /// Returns true if a test that took `duration_ms` counts as slow.
    pub fn is_slow(&self, duration_ms: u64) -> bool {
        self.slow_test_threshold_ms
            .is_some_and(|threshold| duration_ms > threshold)
    }
}
