//! Card field interpretation.

mod assembler;
pub mod collection;
pub mod schema;
pub mod transfers;

pub use assembler::CardAssembler;
pub use collection::{parse_collection_string, CollectionName};
pub use transfers::{parse_transfers, TransferRow, TransferState};

use crate::error::ExtractionError;
use crate::html::Page;
use crate::models::card::Card;

/// Result type for card extraction.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for turning a card page into a [`Card`].
pub trait CardExtractor {
    /// Extract a card from a parsed page.
    fn extract(&self, page_url: &str, page: &Page) -> Result<Card>;

    /// Extract a card from raw page bytes.
    fn extract_from_bytes(&self, page_url: &str, body: &[u8]) -> Result<Card> {
        self.extract(page_url, &Page::parse(body))
    }
}
