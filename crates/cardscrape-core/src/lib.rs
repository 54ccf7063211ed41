//! Core library for scraping the ERR Jeu de Paume card catalog.
//!
//! This crate provides:
//! - A label-indexed view over the `<th>`/`<td>` rows of a card page
//! - Typed field accessors (text, Yes/No flags, links, link ids, galleries)
//! - Card assembly, including transfer groups and `(CODE) Name` collections
//! - Sequential catalog traversal that stops at the end-of-results redirect

pub mod card;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod fields;
pub mod html;
pub mod models;
pub mod table;

pub use card::{CardAssembler, CardExtractor};
pub use crawler::{CardCrawler, Cards, Step};
pub use error::{ExtractionError, FetchError, Result, ScrapeError};
pub use fetch::{FetchedPage, Fetcher};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fields::FieldInterpreter;
pub use html::Page;
pub use models::card::{Card, Collection, Owner, Transfer, UnstructuredRow};
pub use models::config::ScrapeConfig;
pub use table::{Labels, TableExtractor, TableRow};
