//! Card data model, serialized exactly in the layout below.

use serde::{Deserialize, Serialize};

/// One normalized catalog card.
///
/// Absent values serialize as `null` rather than being skipped, so every
/// card has the same set of keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card identifier, taken from the page URL.
    pub id: i64,

    /// Final URL of the card page.
    pub url: String,

    /// Owner the item was seized from.
    pub owner: Owner,

    /// Collection the item was filed under.
    pub collection: Collection,

    pub inventory_number: Option<String>,
    pub artist: Option<String>,
    pub medium: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub literature: Option<String>,
    pub provenance_and_comments: Option<String>,
    pub archival_sources: Option<String>,
    pub measurements: Option<String>,
    pub signed: Option<bool>,
    pub framed: Option<bool>,
    pub munich_number: Option<String>,
    pub intake_place: Option<String>,
    pub intake_date: Option<String>,

    /// Custody transfers, in page order.
    pub transfers: Vec<Transfer>,

    pub restituted: Option<bool>,
    pub restitution_date: Option<String>,
    pub repatriated_to_france: Option<bool>,
    pub repatriation_date: Option<String>,

    /// Full-size image links from the card gallery.
    pub image_urls: Vec<String>,

    /// Rows no known field claimed.
    pub unstructured_data: Vec<UnstructuredRow>,
}

/// Owner reference of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Collection reference of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: Option<i64>,
    /// Short code, e.g. `ERR`.
    pub code: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// A single custody transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub place: Option<String>,
    pub date: Option<String>,
}

impl Transfer {
    pub fn new(place: Option<String>, date: Option<String>) -> Self {
        Self { place, date }
    }
}

/// A table row that no known field claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnstructuredRow {
    pub title: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn empty_card() -> Card {
        Card {
            id: 7,
            url: "https://example.org/card_show.php?CardId=7".to_string(),
            owner: Owner::default(),
            collection: Collection::default(),
            inventory_number: None,
            artist: None,
            medium: None,
            title: None,
            description: None,
            literature: None,
            provenance_and_comments: None,
            archival_sources: None,
            measurements: None,
            signed: None,
            framed: None,
            munich_number: None,
            intake_place: None,
            intake_date: None,
            transfers: Vec::new(),
            restituted: None,
            restitution_date: None,
            repatriated_to_france: None,
            repatriation_date: None,
            image_urls: Vec::new(),
            unstructured_data: Vec::new(),
        }
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let value = serde_json::to_value(empty_card()).unwrap();

        assert_eq!(value["owner"], json!({"id": null, "name": null, "url": null}));
        assert_eq!(value["signed"], json!(null));
        assert_eq!(value["transfers"], json!([]));
        assert_eq!(value["image_urls"], json!([]));
    }

    #[test]
    fn test_key_order() {
        let text = serde_json::to_string(&empty_card()).unwrap();

        let keys = [
            "\"id\"",
            "\"url\"",
            "\"owner\"",
            "\"collection\"",
            "\"inventory_number\"",
            "\"intake_date\"",
            "\"transfers\"",
            "\"restituted\"",
            "\"repatriation_date\"",
            "\"image_urls\"",
            "\"unstructured_data\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|key| text.find(key).unwrap()).collect();

        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}
