//! Labels of the card table and the rows a card claims.

use crate::table::FieldClaim;

use super::transfers::{TRANSFER_DATE, TRANSFER_PLACE};

pub const OWNER: &str = "Owner:";
pub const COLLECTION: &str = "Collection:";
pub const INVENTORY_NUMBER: &str = "Inventory No.:";
pub const ARTIST: &str = "Artist:";
pub const MEDIUM: &str = "Medium:";
pub const TITLE: &str = "Title:";
pub const DESCRIPTION: &str = "Description:";
pub const LITERATURE: &str = "Literature:";
pub const PROVENANCE_AND_COMMENTS: &str = "Provenance and Comments:";
pub const ARCHIVAL_SOURCES: &str = "Archival Sources:";
pub const MEASUREMENTS: &str = "Measurements:";
pub const SIGNED: &str = "Signed?";
pub const FRAMED: &str = "Framed?";
pub const MUNICH_NUMBER: &str = "Munich No.:";
pub const INTAKE_PLACE: &str = "Intake place:";
pub const INTAKE_DATE: &str = "Intake date:";
pub const RESTITUTED: &str = "Restituted?";
pub const RESTITUTION_DATE: &str = "Restitution date:";
pub const REPATRIATED_TO_FRANCE: &str = "Repatriated to France?";
pub const REPATRIATION_DATE: &str = "Repatriation date:";
pub const IMAGES: &str = "Images:";

/// Every label a card reads, in read order.
///
/// Rows outside these claims end up in `unstructured_data`.
pub const CARD_FIELDS: &[FieldClaim] = &[
    FieldClaim::first(COLLECTION),
    FieldClaim::first(OWNER),
    FieldClaim::first(INVENTORY_NUMBER),
    FieldClaim::first(ARTIST),
    FieldClaim::first(MEDIUM),
    FieldClaim::first(TITLE),
    FieldClaim::first(DESCRIPTION),
    FieldClaim::first(LITERATURE),
    FieldClaim::first(PROVENANCE_AND_COMMENTS),
    FieldClaim::first(ARCHIVAL_SOURCES),
    FieldClaim::first(MEASUREMENTS),
    FieldClaim::first(SIGNED),
    FieldClaim::first(FRAMED),
    FieldClaim::first(MUNICH_NUMBER),
    FieldClaim::first(INTAKE_PLACE),
    FieldClaim::first(INTAKE_DATE),
    FieldClaim::all(TRANSFER_PLACE),
    FieldClaim::all(TRANSFER_DATE),
    FieldClaim::first(RESTITUTED),
    FieldClaim::first(RESTITUTION_DATE),
    FieldClaim::first(REPATRIATED_TO_FRANCE),
    FieldClaim::first(REPATRIATION_DATE),
    FieldClaim::first(IMAGES),
];
