use crate::retry::{backoff, RetryPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry parameters as they appear in `config.toml`.
///
/// Every field is optional in the file; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
    /// Sleep between attempts. When false, attempts run back to back.
    pub backoff: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
            backoff: false,
        }
    }
}

impl RetryConfig {
    pub fn from_toml_str(data: &str) -> Result<Self> {
        let cfg: RetryConfig = toml::from_str(data).context("invalid retry config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.base_delay()?;
        Ok(())
    }

    pub fn base_delay(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.base_delay_secs).with_context(|| {
            format!(
                "base_delay_secs must be a non-negative number, got {}",
                self.base_delay_secs
            )
        })
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_secs(self.max_delay_secs)
    }

    /// Builds a policy with these limits. With `backoff = true` the failure hook
    /// sleeps exponentially between attempts (no sleep after the last one).
    pub fn to_policy<T: 'static>(&self) -> Result<RetryPolicy<T>> {
        let policy = RetryPolicy::new().with_max_attempts(self.max_attempts);
        if !self.backoff {
            return Ok(policy);
        }
        let hook = backoff::exponential_for(self.max_attempts, self.base_delay()?, self.max_delay());
        Ok(policy.with_on_failed_attempt(hook))
    }
}

/// `$XDG_CONFIG_HOME/http-retry/config.toml`.
pub fn default_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("http-retry")?;
    Ok(xdg_dirs.get_config_home().join("http-retry").join("config.toml"))
}

/// Load configuration from `path`.
pub fn load(path: &Path) -> Result<RetryConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    RetryConfig::from_toml_str(&data)
}

/// Load the XDG config file if one exists, otherwise built-in defaults.
pub fn load_or_default() -> Result<RetryConfig> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("http-retry")?;
    let Some(path) = xdg_dirs.find_config_file("config.toml") else {
        tracing::debug!("no config.toml found, using defaults");
        return Ok(RetryConfig::default());
    };
    let cfg = load(&path)?;
    tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);
    Ok(cfg)
}
