//! Building a [`Card`] from one card page.

use std::time::Instant;

use tracing::{debug, warn};
use url::Url;

use crate::error::ExtractionError;
use crate::fields::{query_parameter, FieldInterpreter};
use crate::html::Page;
use crate::models::card::{Card, Collection, Owner};
use crate::models::config::{ScrapeConfig, SourceConfig};
use crate::table::{Labels, TableExtractor};

use super::collection::parse_collection_string;
use super::schema::*;
use super::transfers::{parse_transfer_rows, TRANSFER_DATE, TRANSFER_PLACE};
use super::{CardExtractor, Result};

/// Reads every known field of a card page into a [`Card`].
///
/// Fields are always read in the same order (the order of
/// [`CARD_FIELDS`]), so rows sharing a label are attributed the same way on
/// every run.
#[derive(Debug, Clone)]
pub struct CardAssembler {
    source: SourceConfig,
    absolute_links: bool,
}

impl CardAssembler {
    /// Create an assembler with default settings.
    pub fn new() -> Self {
        Self::from_config(&ScrapeConfig::default())
    }

    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            source: config.source.clone(),
            absolute_links: config.extraction.absolute_links,
        }
    }

    /// Resolve owner and collection links against the page URL.
    pub fn with_absolute_links(mut self, absolute_links: bool) -> Self {
        self.absolute_links = absolute_links;
        self
    }

    fn link_base(&self, page_url: &str) -> Option<Url> {
        if !self.absolute_links {
            return None;
        }

        match Url::parse(page_url) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Page URL {} is not absolute, keeping relative links: {}", page_url, e);
                None
            }
        }
    }

    /// Card identifier from the page URL.
    pub fn card_id(&self, page_url: &str) -> Result<i64> {
        let parameter = &self.source.card_id_parameter;
        let value = query_parameter(page_url, parameter).ok_or_else(|| {
            ExtractionError::MissingCardId {
                url: page_url.to_string(),
                parameter: parameter.clone(),
            }
        })?;

        value
            .trim()
            .parse()
            .map_err(|_| ExtractionError::InvalidIdentifier {
                field: parameter.clone(),
                value,
            })
    }

    fn assemble(&self, page_url: &str, mut fields: FieldInterpreter<'_>) -> Result<Card> {
        let id = self.card_id(page_url)?;
        let base = self.link_base(page_url);

        let (collection_code, collection_name) = match fields.text(COLLECTION) {
            Some(text) => {
                let parsed = parse_collection_string(&text)?;
                (Some(parsed.code), Some(parsed.name))
            }
            None => (None, None),
        };

        let owner = Owner {
            id: fields.id(OWNER, &self.source.owner_id_parameter)?,
            name: fields.text(OWNER),
            url: fields.link(OWNER, base.as_ref()),
        };

        let collection = Collection {
            id: fields.id(COLLECTION, &self.source.collection_id_parameter)?,
            code: collection_code,
            name: collection_name,
            url: fields.link(COLLECTION, base.as_ref()),
        };

        let inventory_number = fields.text(INVENTORY_NUMBER);
        let artist = fields.text(ARTIST);
        let medium = fields.text(MEDIUM);
        let title = fields.text(TITLE);
        let description = fields.text(DESCRIPTION);
        let literature = fields.text(LITERATURE);
        let provenance_and_comments = fields.text(PROVENANCE_AND_COMMENTS);
        let archival_sources = fields.text(ARCHIVAL_SOURCES);
        let measurements = fields.text(MEASUREMENTS);
        let signed = fields.bool(SIGNED)?;
        let framed = fields.bool(FRAMED)?;
        let munich_number = fields.text(MUNICH_NUMBER);
        let intake_place = fields.text(INTAKE_PLACE);
        let intake_date = fields.text(INTAKE_DATE);

        let transfer_rows = fields
            .table_mut()
            .get_all(&Labels::one(TRANSFER_PLACE).or(TRANSFER_DATE));
        let transfers = parse_transfer_rows(&transfer_rows)?;

        let restituted = fields.bool(RESTITUTED)?;
        let restitution_date = fields.text(RESTITUTION_DATE);
        let repatriated_to_france = fields.bool(REPATRIATED_TO_FRANCE)?;
        let repatriation_date = fields.text(REPATRIATION_DATE);
        let image_urls = fields.image_urls(IMAGES);

        let table = fields.into_table();
        debug_assert_eq!(
            &crate::table::partition_rows(table.rows(), CARD_FIELDS).consumed,
            table.visited(),
            "card reads and CARD_FIELDS disagree"
        );
        let unstructured_data = table.serializable_unvisited_rows();

        Ok(Card {
            id,
            url: page_url.to_string(),
            owner,
            collection,
            inventory_number,
            artist,
            medium,
            title,
            description,
            literature,
            provenance_and_comments,
            archival_sources,
            measurements,
            signed,
            framed,
            munich_number,
            intake_place,
            intake_date,
            transfers,
            restituted,
            restitution_date,
            repatriated_to_france,
            repatriation_date,
            image_urls,
            unstructured_data,
        })
    }
}

impl Default for CardAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl CardExtractor for CardAssembler {
    fn extract(&self, page_url: &str, page: &Page) -> Result<Card> {
        let start = Instant::now();
        let fields = FieldInterpreter::new(TableExtractor::from_page(page));
        let card = self.assemble(page_url, fields)?;

        debug!(
            "Assembled card {} ({} transfers, {} images, {} unstructured rows) in {:?}",
            card.id,
            card.transfers.len(),
            card.image_urls.len(),
            card.unstructured_data.len(),
            start.elapsed()
        );

        Ok(card)
    }
}
