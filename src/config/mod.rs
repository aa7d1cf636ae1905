// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! User configuration.
//!
//! Stored by `confy` in the platform's configuration directory under the name
//! `handykit`. A missing or unreadable file falls back to the defaults.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "handykit";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,

    /// `env_logger` filter, e.g. `"handykit=debug"`. Overrides `RUST_LOG`.
    pub log_filter: Option<String>,

    /// Directory the picker opens in. Defaults to the working directory.
    pub start_dir: Option<String>,

    /// List dot-files in the picker.
    pub show_hidden: bool,

    /// Paint the terminal background with the picker theme while it runs.
    pub themed_background: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            log_filter: None,
            start_dir: None,
            show_hidden: false,
            themed_background: true,
        }
    }
}

/// Loads the configuration, falling back to the defaults with a warning.
///
/// The warning goes through `log`, so it is lost if logging has not been
/// initialised yet. Start-up code uses [`try_load_config`] instead.
pub fn load_config() -> AppConfig {
    or_default(try_load_config())
}

pub fn try_load_config() -> Result<AppConfig, confy::ConfyError> {
    confy::load(CONFIG_NAME, None)
}

/// The loaded configuration, or the defaults after logging why it could not
/// be read.
pub fn or_default(loaded: Result<AppConfig, confy::ConfyError>) -> AppConfig {
    loaded.unwrap_or_else(|e| {
        log::warn!("using default configuration: {}", e);
        AppConfig::default()
    })
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.version, 1);
        assert!(cfg.log_filter.is_none());
        assert!(!cfg.show_hidden);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let loaded = Err(confy::ConfyError::BadConfigDirectory("gone".into()));
        assert_eq!(or_default(loaded), AppConfig::default());

        let custom = AppConfig {
            show_hidden: true,
            ..AppConfig::default()
        };
        assert_eq!(or_default(Ok(custom.clone())), custom);
    }
}
