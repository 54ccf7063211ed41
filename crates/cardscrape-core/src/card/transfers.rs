//! Reducing transfer rows into transfer events.
//!
//! A card lists transfers as a flat run of `Transfer place:` and
//! `Transfer date:` rows. A place may or may not be followed by its date
//! before the next place starts, so the rows are folded through a small
//! state machine holding at most one place that still waits for a date.

use crate::error::ExtractionError;
use crate::models::card::Transfer;
use crate::table::TableRow;

/// Label of a transfer place row.
pub const TRANSFER_PLACE: &str = "Transfer place:";

/// Label of a transfer date row.
pub const TRANSFER_DATE: &str = "Transfer date:";

/// One input of the transfer state machine.
///
/// A place is always present, possibly as an empty string. An empty date
/// is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferRow {
    Place(String),
    Date(Option<String>),
}

impl TransferRow {
    /// Classify a table row by its label; `Ok(None)` for unrelated rows.
    ///
    /// A place row without a value cell is an error, since the transfer it
    /// opens would have neither place nor date.
    pub fn from_table_row(row: &TableRow<'_>) -> Result<Option<Self>, ExtractionError> {
        match row.label.as_str() {
            TRANSFER_PLACE => match row.value {
                Some(_) => Ok(Some(Self::Place(row.value_text()))),
                None => Err(ExtractionError::MissingTransferPlace),
            },
            TRANSFER_DATE => {
                let text = row.value_text();
                Ok(Some(Self::Date((!text.is_empty()).then_some(text))))
            }
            _ => Ok(None),
        }
    }
}

/// State of the transfer state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransferState {
    /// No place is pending.
    #[default]
    Idle,
    /// A place was read and may still receive a date.
    AwaitingDate(String),
}

impl TransferState {
    /// Feed one row, returning the next state and any completed transfer.
    pub fn step(self, row: TransferRow) -> Result<(Self, Option<Transfer>), ExtractionError> {
        match (self, row) {
            (Self::Idle, TransferRow::Place(place)) => Ok((Self::AwaitingDate(place), None)),
            (Self::AwaitingDate(pending), TransferRow::Place(place)) => Ok((
                Self::AwaitingDate(place),
                Some(Transfer::new(Some(pending), None)),
            )),
            (Self::AwaitingDate(pending), TransferRow::Date(date)) => {
                Ok((Self::Idle, Some(Transfer::new(Some(pending), date))))
            }
            (Self::Idle, TransferRow::Date(date)) => Err(ExtractionError::OrphanTransferDate(
                date.unwrap_or_default(),
            )),
        }
    }

    /// Flush at end of input.
    pub fn finish(self) -> Option<Transfer> {
        match self {
            Self::Idle => None,
            Self::AwaitingDate(pending) => Some(Transfer::new(Some(pending), None)),
        }
    }
}

/// Fold transfer rows, in page order, into transfers.
pub fn parse_transfers(
    rows: impl IntoIterator<Item = TransferRow>,
) -> Result<Vec<Transfer>, ExtractionError> {
    let mut transfers = Vec::new();
    let mut state = TransferState::Idle;

    for row in rows {
        let (next, completed) = state.step(row)?;
        transfers.extend(completed);
        state = next;
    }

    transfers.extend(state.finish());
    Ok(transfers)
}

/// Fold the transfer rows of a table into transfers.
///
/// Rows with other labels are ignored.
pub fn parse_transfer_rows(rows: &[TableRow<'_>]) -> Result<Vec<Transfer>, ExtractionError> {
    let rows = rows
        .iter()
        .filter_map(|row| TransferRow::from_table_row(row).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    parse_transfers(rows)
}
