//! Sequential traversal of the card catalog.
//!
//! The catalog is walked one cursor position at a time. Each position is a
//! listing URL that redirects to a card page; once the cursor runs past the
//! last card the server answers with a bare redirect instead, which ends the
//! traversal.

use std::iter::FusedIterator;

use tracing::{debug, info};
use url::Url;

use crate::card::{CardAssembler, CardExtractor};
use crate::error::{FetchError, Result, ScrapeError};
use crate::fetch::Fetcher;
use crate::models::card::Card;
use crate::models::config::{ScrapeConfig, SourceConfig};

/// Outcome of visiting one cursor position.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A card was scraped.
    Card(Card),
    /// The catalog has no card at this position or beyond.
    End,
}

/// Walks the catalog and turns every page into a card.
#[derive(Debug, Clone)]
pub struct CardCrawler<F, E = CardAssembler> {
    fetcher: F,
    extractor: E,
    source: SourceConfig,
}

impl<F: Fetcher> CardCrawler<F> {
    /// Create a crawler using the default card assembler for `config`.
    pub fn new(fetcher: F, config: &ScrapeConfig) -> Self {
        Self::with_extractor(fetcher, CardAssembler::from_config(config), config)
    }
}

impl<F: Fetcher, E: CardExtractor> CardCrawler<F, E> {
    pub fn with_extractor(fetcher: F, extractor: E, config: &ScrapeConfig) -> Self {
        Self {
            fetcher,
            extractor,
            source: config.source.clone(),
        }
    }

    /// Listing URL for a cursor position.
    pub fn page_url(&self, cursor: u64) -> Result<String> {
        let url = Url::parse_with_params(
            &self.source.base_url,
            [
                (self.source.query_parameter.as_str(), String::new()),
                (self.source.cursor_parameter.as_str(), cursor.to_string()),
            ],
        )
        .map_err(|source| ScrapeError::Url {
            url: self.source.base_url.clone(),
            source,
        })?;

        Ok(url.into())
    }

    /// Fetch and extract the card at one cursor position.
    ///
    /// Extraction failures come back as [`ScrapeError::Card`]; they concern
    /// this card only.
    pub fn step(&self, cursor: u64) -> Result<Step> {
        let url = self.page_url(cursor)?;
        debug!("Fetching cursor {}: {}", cursor, url);

        let page = self.fetcher.fetch(&url)?;

        if page.is_redirect() {
            info!("Reached end of results at cursor {}", cursor);
            return Ok(Step::End);
        }

        if !page.is_success() {
            return Err(FetchError::Status {
                status: page.status,
                url: page.final_url,
            }
            .into());
        }

        let card = self
            .extractor
            .extract_from_bytes(&page.final_url, &page.body)
            .map_err(|source| ScrapeError::Card {
                cursor,
                url: page.final_url.clone(),
                source,
            })?;

        info!("Scraped card no {} - id {}", cursor, card.id);
        Ok(Step::Card(card))
    }

    /// Lazily scrape cards from `offset` up to `limit`, inclusive.
    ///
    /// Nothing is fetched until the iterator is polled, and dropping it
    /// stops the traversal.
    pub fn cards(&self, offset: u64, limit: u64) -> Cards<'_, F, E> {
        Cards {
            crawler: self,
            cursor: offset,
            limit,
            done: false,
        }
    }
}

/// Iterator over the cards of a catalog traversal.
///
/// Yields `Err(ScrapeError::Card { .. })` for a card that failed extraction
/// and then moves on. Any other error is yielded once and ends the
/// iteration, since it leaves no way to tell where the catalog ends.
#[derive(Debug)]
pub struct Cards<'c, F, E> {
    crawler: &'c CardCrawler<F, E>,
    cursor: u64,
    limit: u64,
    done: bool,
}

impl<F, E> Cards<'_, F, E> {
    /// Move past the current cursor; the last representable cursor ends
    /// the iteration.
    fn advance(&mut self) {
        match self.cursor.checked_add(1) {
            Some(next) => self.cursor = next,
            None => self.done = true,
        }
    }

    /// Next cursor position to be fetched.
    ///
    /// A later run started at this offset resumes where this one stopped.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }
}

impl<F: Fetcher, E: CardExtractor> Iterator for Cards<'_, F, E> {
    type Item = Result<Card>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor > self.limit {
            return None;
        }

        let cursor = self.cursor;

        match self.crawler.step(cursor) {
            Ok(Step::Card(card)) => {
                self.advance();
                Some(Ok(card))
            }
            Ok(Step::End) => {
                self.done = true;
                None
            }
            Err(e @ ScrapeError::Card { .. }) => {
                self.advance();
                Some(Err(e))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<F: Fetcher, E: CardExtractor> FusedIterator for Cards<'_, F, E> {}
