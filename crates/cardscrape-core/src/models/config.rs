//! Configuration structures for the scraper.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

/// Main configuration for a cardscrape run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Where the catalog lives and how its URLs are shaped.
    pub source: SourceConfig,

    /// HTTP client configuration.
    pub http: HttpConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Default traversal bounds.
    pub crawl: CrawlConfig,
}

/// Catalog location and URL parameter names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Card listing endpoint, without query string.
    pub base_url: String,

    /// Search query parameter, sent empty to list the whole catalog.
    pub query_parameter: String,

    /// Parameter carrying the cursor position.
    pub cursor_parameter: String,

    /// Parameter of the final card URL that carries the card id.
    pub card_id_parameter: String,

    /// Query parameter holding the owner id in owner links.
    pub owner_id_parameter: String,

    /// Query parameter holding the collection id in collection links.
    pub collection_id_parameter: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://errproject.org/jeudepaume/card_show.php".to_string(),
            query_parameter: "Query".to_string(),
            cursor_parameter: "StartDoc".to_string(),
            card_id_parameter: "CardId".to_string(),
            owner_id_parameter: "Owner__ownerid".to_string(),
            collection_id_parameter: "Collection__collectionid".to_string(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum redirects followed for one page.
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("cardscrape/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            max_redirects: 10,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Resolve owner and collection links against the page URL instead of
    /// keeping them as written in the page.
    pub absolute_links: bool,
}

/// Default traversal bounds, overridable from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// First cursor position.
    pub offset: u64,

    /// Last cursor position, inclusive.
    pub limit: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            offset: 1,
            limit: 100_000,
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| config_error(path, e))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| config_error(path, e))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn config_error(path: &Path, error: serde_json::Error) -> ScrapeError {
    ScrapeError::Config {
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ScrapeConfig =
            serde_json::from_str(r#"{"http": {"timeout_secs": 5}, "crawl": {"limit": 10}}"#)
                .unwrap();

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.max_redirects, 10);
        assert_eq!(config.crawl.offset, 1);
        assert_eq!(config.crawl.limit, 10);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ScrapeConfig::default();
        config.extraction.absolute_links = true;
        config.save(&path).unwrap();

        assert_eq!(ScrapeConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"crawl": {"limit": "many"}}"#).unwrap();

        match ScrapeConfig::from_file(&path) {
            Err(ScrapeError::Config { path: reported, .. }) => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            ScrapeConfig::from_file(&dir.path().join("absent.json")),
            Err(ScrapeError::Io(_))
        ));
    }
}
