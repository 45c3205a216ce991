//! Application configuration.
//!
//! This module provides [`AppConfig`], the single configuration struct the
//! frontends build at startup and pass into the pipeline. Nothing in the
//! pipeline reads ambient process state, so tests can fabricate any
//! configuration they need.
//!
//! # Example
//!
//! ```rust
//! use channelpress::config::AppConfig;
//!
//! let config = AppConfig::default()
//!     .with_output_dir("generated")
//!     .with_force_demo(true);
//!
//! assert!(config.demo_mode());
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment name that disables the admin analytics page.
pub const PRODUCTION_ENV: &str = "production";

/// Runtime configuration for report generation and the frontends.
///
/// Built once at startup — usually via [`AppConfig::from_env`] — and passed
/// by reference afterwards. The demo/live decision is a pure function of
/// this struct, evaluated once per report.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Telegram API id, if configured.
    pub api_id: Option<i32>,

    /// Telegram API hash, if configured.
    pub api_hash: Option<String>,

    /// Path to the MTProto session file used by the live adapter.
    pub session_file: PathBuf,

    /// Force demo data even when credentials are present.
    pub force_demo: bool,

    /// Deployment environment name (`development`, `staging`, `production`).
    pub env: String,

    /// Directory generated reports are written to.
    pub output_dir: PathBuf,

    /// Path of the append-only analytics event log.
    pub analytics_log: PathBuf,

    /// Deadline for one fetch from the message source.
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_id: None,
            api_hash: None,
            session_file: PathBuf::from("channelpress.session"),
            force_demo: false,
            env: "development".to_string(),
            output_dir: PathBuf::from("generated"),
            analytics_log: PathBuf::from("server.log"),
            fetch_timeout: Duration::from_secs(60),
        }
    }
}

impl AppConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from process environment variables.
    ///
    /// | Variable | Meaning | Default |
    /// |----------|---------|---------|
    /// | `API_ID` | Telegram API id | unset |
    /// | `API_HASH` | Telegram API hash | unset |
    /// | `SESSION_FILE` | MTProto session path | `channelpress.session` |
    /// | `DEMO_MODE` | `1`/`true` forces demo data | off |
    /// | `APP_ENV` | deployment environment | `development` |
    /// | `OUTPUT_DIR` | report output directory | `generated` |
    /// | `ANALYTICS_LOG` | event log path | `server.log` |
    /// | `FETCH_TIMEOUT_SECS` | source deadline in seconds | `60` |
    ///
    /// Unparseable numeric values are treated as unset rather than
    /// aborting startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("API_ID") {
            config.api_id = raw.trim().parse::<i32>().ok();
        }
        if let Ok(raw) = env::var("API_HASH") {
            config.api_hash = Some(raw);
        }
        if let Ok(raw) = env::var("SESSION_FILE") {
            config.session_file = PathBuf::from(raw);
        }
        if let Ok(raw) = env::var("DEMO_MODE") {
            config.force_demo = matches!(raw.trim(), "1" | "true" | "yes" | "on");
        }
        if let Ok(raw) = env::var("APP_ENV") {
            config.env = raw;
        }
        if let Ok(raw) = env::var("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(raw);
        }
        if let Ok(raw) = env::var("ANALYTICS_LOG") {
            config.analytics_log = PathBuf::from(raw);
        }
        if let Ok(raw) = env::var("FETCH_TIMEOUT_SECS") {
            if let Ok(secs) = raw.trim().parse::<u64>() {
                config.fetch_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Sets the Telegram API credentials.
    #[must_use]
    pub fn with_credentials(mut self, api_id: i32, api_hash: impl Into<String>) -> Self {
        self.api_id = Some(api_id);
        self.api_hash = Some(api_hash.into());
        self
    }

    /// Forces or clears demo mode.
    #[must_use]
    pub fn with_force_demo(mut self, force: bool) -> Self {
        self.force_demo = force;
        self
    }

    /// Sets the deployment environment name.
    #[must_use]
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = env.into();
        self
    }

    /// Sets the report output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the analytics event log path.
    #[must_use]
    pub fn with_analytics_log(mut self, path: impl AsRef<Path>) -> Self {
        self.analytics_log = path.as_ref().to_path_buf();
        self
    }

    /// Sets the fetch deadline.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Whether reports should be built from demo data.
    ///
    /// True when demo mode is forced, or when either credential is
    /// missing, zero, or empty. Evaluated once per report by the
    /// orchestrator.
    pub fn demo_mode(&self) -> bool {
        if self.force_demo {
            return true;
        }
        match (self.api_id, self.api_hash.as_deref()) {
            (Some(id), Some(hash)) => id == 0 || hash.is_empty(),
            _ => true,
        }
    }

    /// Whether this deployment should hide the admin analytics page.
    pub fn is_production(&self) -> bool {
        self.env == PRODUCTION_ENV
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_demo() {
        let config = AppConfig::default();
        assert!(config.demo_mode());
        assert!(!config.is_production());
    }

    #[test]
    fn test_credentials_disable_demo() {
        let config = AppConfig::default().with_credentials(12345, "abcdef");
        assert!(!config.demo_mode());
    }

    #[test]
    fn test_zero_or_empty_credentials_mean_demo() {
        let config = AppConfig::default().with_credentials(0, "abcdef");
        assert!(config.demo_mode());

        let config = AppConfig::default().with_credentials(12345, "");
        assert!(config.demo_mode());
    }

    #[test]
    fn test_force_demo_wins_over_credentials() {
        let config = AppConfig::default()
            .with_credentials(12345, "abcdef")
            .with_force_demo(true);
        assert!(config.demo_mode());
    }

    #[test]
    fn test_production_flag() {
        let config = AppConfig::default().with_env(PRODUCTION_ENV);
        assert!(config.is_production());
    }
}
