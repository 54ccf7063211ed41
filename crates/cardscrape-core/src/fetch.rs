//! Page fetching.
//!
//! The crawler only needs `url -> (status, final URL, body)`; anything that
//! can answer that implements [`Fetcher`]. [`HttpFetcher`] is the
//! `reqwest`-backed implementation used against the live catalog.

use crate::error::FetchError;

/// A fetched page, after any redirects the transport followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status of the final response.
    pub status: u16,
    /// URL of the final response.
    pub final_url: String,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl FetchedPage {
    pub fn new(status: u16, final_url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            final_url: final_url.into(),
            body: body.into(),
        }
    }

    /// A 3xx status the transport did not follow.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for page fetchers.
pub trait Fetcher {
    /// Fetch `url`, following redirects that carry a location.
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url)
    }
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::redirect::Policy;
    use tracing::debug;

    use super::{FetchedPage, Fetcher};
    use crate::error::FetchError;
    use crate::models::config::HttpConfig;

    /// Blocking HTTP fetcher.
    ///
    /// Redirects with a `Location` header are followed; a redirect without
    /// one comes back as-is, which is how the catalog says it has run out
    /// of cards.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
    }

    impl HttpFetcher {
        pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
            let client = Client::builder()
                .user_agent(config.user_agent.clone())
                .timeout(Duration::from_secs(config.timeout_secs))
                .redirect(Policy::limited(config.max_redirects))
                .build()
                .map_err(|e| FetchError::Client(e.to_string()))?;

            Ok(Self { client })
        }
    }

    impl Fetcher for HttpFetcher {
        fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            let transport = |e: reqwest::Error| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            };

            let response = self.client.get(url).send().map_err(transport)?;
            let status = response.status().as_u16();
            let final_url = response.url().to_string();
            let body = response.bytes().map_err(transport)?;

            debug!("GET {} -> {} {} ({} bytes)", url, status, final_url, body.len());

            Ok(FetchedPage {
                status,
                final_url,
                body: body.to_vec(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        let ok = FetchedPage::new(200, "u", "");
        let end = FetchedPage::new(302, "u", "");
        let missing = FetchedPage::new(404, "u", "");

        assert!(ok.is_success() && !ok.is_redirect());
        assert!(end.is_redirect() && !end.is_success());
        assert!(!missing.is_redirect() && !missing.is_success());
    }
}
