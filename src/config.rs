//! Runtime settings, read from the environment.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog base URL, without a trailing slash.
    pub api_url: String,
    pub log_dir: PathBuf,
}

impl Config {
    /// `POKEDEX_API_URL` overrides the catalog (handy for a local mirror),
    /// `POKEDEX_LOG_DIR` overrides where log files go.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("POKEDEX_API_URL").ok(),
            std::env::var("POKEDEX_LOG_DIR").ok(),
        )
    }

    fn from_vars(api_url: Option<String>, log_dir: Option<String>) -> Self {
        let api_url = api_url
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            log_dir: log_dir.map(PathBuf::from).unwrap_or_else(default_log_dir),
        }
    }
}

/// Platform data dir, e.g. `~/.local/share/pokedex/logs` on Linux.
fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("pokedex").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
