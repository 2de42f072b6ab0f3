//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use std::env;
use std::path::PathBuf;

use crate::db::DEFAULT_SAVE_FILE;

/// Default length of the "recent activities" window, in days before today.
pub const DEFAULT_RECENT_DAYS: u32 = 6;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Save file, relative to the working directory unless absolute
    pub save_path: PathBuf,
    /// Recent window covers `[today - recent_days, today]`
    pub recent_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            recent_days: DEFAULT_RECENT_DAYS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `RUNNING_DIARY_FILE`: save file path (default `runningdiary.dat`)
    /// - `RUNNING_DIARY_RECENT_DAYS`: recent window length (default 6)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let save_path = env::var("RUNNING_DIARY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SAVE_FILE));

        let recent_days = match env::var("RUNNING_DIARY_RECENT_DAYS") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "RUNNING_DIARY_RECENT_DAYS",
                value: raw,
            })?,
            Err(_) => DEFAULT_RECENT_DAYS,
        };

        Ok(Self {
            save_path,
            recent_days,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}
