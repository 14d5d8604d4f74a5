use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WHEEL_SCROLL_LINES: i32 = 3;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub application: ApplicationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Scroll lines per wheel notch. Clamped to >= 1 on read.
    pub wheel_scroll_lines: i32,
    /// "auto" enumerates /dev/input; anything else is an explicit device path.
    pub device_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_scroll_lines: DEFAULT_WHEEL_SCROLL_LINES,
            device_path: "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatcherConfig {
    pub poll_interval_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApplicationConfig {
    /// Initial widget style name. Free-form, no validation.
    #[serde(default)]
    pub style: String,
    /// Window icon of the hosting application, if it has one.
    #[serde(default)]
    pub icon: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, or from the standard
    /// per-user location when none is given. A missing file is not an
    /// error: every probe-related setting has a default.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path(),
        };

        let figment = Figment::new()
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("SHELL_SETTINGS_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("failed to load configuration from {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/shell-settings/settings.toml` (or the platform
    /// equivalent). The file does not have to exist.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shell-settings")
            .join("settings.toml")
    }

    /// Configured scroll-line count, clamped to the minimum of 1.
    pub fn wheel_scroll_lines(&self) -> i32 {
        self.input.wheel_scroll_lines.max(1)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("invalid log format: {}", self.logging.format),
        }

        if self.watcher.poll_interval_ms < 100 {
            anyhow::bail!("poll_interval_ms must be at least 100");
        }

        if self.input.device_path.is_empty() {
            anyhow::bail!("input.device_path must be \"auto\" or a device path");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wheel_scroll_lines_default() {
        let config = Config::default();
        assert_eq!(config.wheel_scroll_lines(), 3);
    }

    #[test]
    fn test_wheel_scroll_lines_clamped_to_one() {
        let mut config = Config::default();

        config.input.wheel_scroll_lines = 0;
        assert_eq!(config.wheel_scroll_lines(), 1);

        config.input.wheel_scroll_lines = -5;
        assert_eq!(config.wheel_scroll_lines(), 1);

        config.input.wheel_scroll_lines = 7;
        assert_eq!(config.wheel_scroll_lines(), 7);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/settings.toml"))).unwrap();
        assert_eq!(config.wheel_scroll_lines(), 3);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.watcher.poll_interval_ms, 1000);
        assert!(config.application.icon.is_none());
    }

    #[test]
    fn test_log_formats_accepted() {
        for format in ["pretty", "compact", "json"] {
            let mut config = Config::default();
            config.logging.format = format.to_string();
            assert!(config.validate().is_ok(), "{} format rejected", format);
        }

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_poll_interval_rejected() {
        let mut config = Config::default();
        config.watcher.poll_interval_ms = 50;
        assert!(config.validate().is_err());
    }
}
