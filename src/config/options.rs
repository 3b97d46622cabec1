// src/config/options.rs
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::ConfigError;

/// Runtime settings. Defaults come from `consts`; a `family_sheet.toml` next to
/// the working directory and `FAMILY_SHEET_*` env vars override them, in that order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Published CSV export of the sheet.
    pub sheet_url: String,
    /// Directory holding the cache slots (and the debug log, if enabled).
    pub store_dir: PathBuf,
    /// Cache time-to-live in milliseconds.
    pub cache_duration_ms: i64,
    /// Append logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sheet_url: s!(SHEET_URL),
            store_dir: PathBuf::from(STORE_DIR),
            cache_duration_ms: CACHE_DURATION_MS,
            log_file: None,
        }
    }
}

impl Settings {
    /// Defaults → `family_sheet.toml` → `FAMILY_SHEET_*` environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::figment(path.as_ref()).extract().map_err(ConfigError::from)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Debug log location when logging to file was requested without a path.
    pub fn default_log_path(&self) -> PathBuf {
        self.store_dir.join(DEBUG_LOG_FILE)
    }
}
