use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_ENV: &str = "STANDINGS_DATA";
pub const LOG_ENV: &str = "STANDINGS_LOG";

const FALLBACK_FILE: &str = "standings.json";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Error;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub data_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            data_path: PathBuf::from(FALLBACK_FILE),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = if let Some(explicit) = var(DATA_ENV) {
            PathBuf::from(explicit)
        } else if let Some(xdg) = var("XDG_DATA_HOME") {
            PathBuf::from(xdg).join("standings").join("state.json")
        } else if let Some(home) = var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("standings")
                .join("state.json")
        } else {
            PathBuf::from(FALLBACK_FILE)
        };

        let log_level = var(LOG_ENV).and_then(|raw| LevelFilter::from_str(raw.trim()).ok());

        Self {
            full_screen: false,
            log_level,
            data_path,
        }
    }

    /// Level the logger starts at, before any state is loaded.
    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
