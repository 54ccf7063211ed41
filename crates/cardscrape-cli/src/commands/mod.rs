pub mod config;
pub mod scrape;

use std::path::{Path, PathBuf};

use cardscrape_core::ScrapeConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardscrape")
        .join("config.json")
}

/// Load the configuration from `path`.
///
/// Without a path, the default config file is used if it exists and
/// built-in defaults otherwise.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ScrapeConfig> {
    if let Some(path) = path {
        return Ok(ScrapeConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(ScrapeConfig::from_file(&default_path)?)
    } else {
        Ok(ScrapeConfig::default())
    }
}
