//! Compiler settings
//!
//! Settings are read once per process, the first time an operation set is
//! compiled. They come from, in increasing priority:
//!
//! 1. the built-in defaults,
//! 2. the TOML file named by `ENUMUTIL_CONFIG_PATH`,
//! 3. the `ENUMUTIL_VERIFY`, `ENUMUTIL_SELF_CHECK` and `ENUMUTIL_LOG_LISTINGS`
//!    environment variables.
//!
//! An application may install its own settings with [`configure`] before
//! the first compilation.
//!
//! ```toml
//! verify_programs = true
//! self_check = false
//! log_listings = true
//! ```
use std::path::Path;

use log::warn;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::{
    magic::{ENV_CONFIG_PATH, ENV_LOG_LISTINGS, ENV_SELF_CHECK, ENV_VERIFY},
    utils::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Verify every lowered program before binding.
    pub verify_programs: bool,
    /// Cross-check bound kernels against the interpreter.
    pub self_check: bool,
    /// Emit program listings at `trace` level.
    pub log_listings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verify_programs: true,
            self_check: cfg!(debug_assertions),
            log_listings: false,
        }
    }
}

fn parse_flag(origin: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config {
            origin: origin.to_string(),
            reason: format!("`{}` is not a boolean", other),
        }),
    }
}

impl Settings {
    /// Parses settings from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config {
            origin: "<string>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let toml_str = std::fs::read_to_string(path).map_err(|e| Error::Config {
            origin: origin.clone(),
            reason: e.to_string(),
        })?;

        toml::from_str(&toml_str).map_err(|e| Error::Config {
            origin,
            reason: e.to_string(),
        })
    }

    /// Applies the environment overrides found through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        for (key, field) in [
            (ENV_VERIFY, &mut self.verify_programs),
            (ENV_SELF_CHECK, &mut self.self_check),
            (ENV_LOG_LISTINGS, &mut self.log_listings),
        ] {
            if let Some(value) = lookup(key) {
                *field = parse_flag(key, &value)?;
            }
        }
        Ok(self)
    }

    /// Defaults with the environment overrides found through `lookup`.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::default().with_env_overrides(lookup)
    }

    /// Loads the settings file named by `ENUMUTIL_CONFIG_PATH`, if any, then
    /// applies the process environment overrides.
    pub fn load() -> Result<Self> {
        let base = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }
}

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Installs `settings` for the rest of the process.
///
/// Fails with [`Error::AlreadyConfigured`] once settings were installed or
/// already read.
pub fn configure(settings: Settings) -> Result<()> {
    SETTINGS.set(settings).map_err(|_| Error::AlreadyConfigured)
}

/// Settings in effect, loading them on first call.
pub fn current() -> Settings {
    *SETTINGS.get_or_init(|| match Settings::load() {
        Ok(settings) => settings,
        Err(error) => {
            warn!("{}; falling back to default settings.", error);
            Settings::default()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let settings = Settings::from_toml_str("log_listings = true").unwrap();
        assert_eq!(
            settings,
            Settings {
                log_listings: true,
                ..Settings::default()
            }
        );
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn malformed_toml_is_reported() {
        let error = Settings::from_toml_str("verify_programs = 3").unwrap_err();
        assert!(error.is_config());
    }

    #[test]
    fn environment_overrides() {
        let settings = Settings::from_env_with(|key| match key {
            ENV_VERIFY => Some("off".to_string()),
            ENV_SELF_CHECK => Some(" TRUE ".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(!settings.verify_programs);
        assert!(settings.self_check);
        assert!(!settings.log_listings);

        let error = Settings::from_env_with(|key| (key == ENV_LOG_LISTINGS).then(|| "maybe".to_string()))
            .unwrap_err();
        assert_eq!(
            error,
            Error::Config {
                origin: ENV_LOG_LISTINGS.to_string(),
                reason: "`maybe` is not a boolean".to_string()
            }
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let error = Settings::from_toml_file(Path::new("/nonexistent/enumutil.toml")).unwrap_err();
        assert!(error.is_config());
    }
}
