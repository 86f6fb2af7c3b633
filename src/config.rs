use std::env;
use std::path::PathBuf;

use crate::data::player::DEFAULT_PLAYER_PATH;

pub const BIND_ENV: &str = "BRAWLVIEW_BIND";
pub const PLAYER_ENV: &str = "BRAWLVIEW_PLAYER";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub player_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            player_path: PathBuf::from(DEFAULT_PLAYER_PATH),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            bind_addr: non_blank(BIND_ENV).unwrap_or(defaults.bind_addr),
            player_path: non_blank(PLAYER_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.player_path),
        }
    }

    pub fn with_player_path(mut self, path: Option<&str>) -> Self {
        if let Some(path) = path {
            self.player_path = PathBuf::from(path);
        }
        self
    }
}
