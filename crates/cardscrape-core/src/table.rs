//! Label-indexed view over the rows of a card table.
//!
//! Card pages lay out every field as a `<th>label</th><td>value</td>` pair.
//! Rows come in no fixed order, may be missing, and labels may repeat, so the
//! extractor is a plain ordered list plus a record of which rows some field
//! has already claimed. Whatever is never claimed ends up as leftover data.
//!
//! Label collisions are resolved by position: [`TableExtractor::get_first`]
//! returns the first matching row even if an earlier call already claimed
//! it. Callers that want deterministic leftovers must read fields in the
//! same order on every page.

use std::collections::BTreeSet;

use scraper::ElementRef;

use crate::html::{self, Page};
use crate::models::card::UnstructuredRow;

/// One `label -> value` pair of a card table.
#[derive(Debug, Clone)]
pub struct TableRow<'a> {
    /// Header text, trimmed.
    pub label: String,
    /// The data cell next to the header, if there is one.
    pub value: Option<ElementRef<'a>>,
}

impl<'a> TableRow<'a> {
    /// Build a row from a header cell and its next `<td>` sibling.
    pub fn from_header(header: ElementRef<'a>) -> Self {
        Self {
            label: html::visible_text(header, None).trim().to_string(),
            value: html::next_sibling_element(header, "td"),
        }
    }

    /// Trimmed visible text of the value cell, empty when there is none.
    pub fn value_text(&self) -> String {
        self.value
            .map(|value| html::visible_text(value, None).trim().to_string())
            .unwrap_or_default()
    }
}

/// A non-empty set of labels to match rows against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    labels: BTreeSet<String>,
}

impl Labels {
    /// A set holding a single label.
    pub fn one(label: impl Into<String>) -> Self {
        Self {
            labels: BTreeSet::from([label.into()]),
        }
    }

    /// Add another label to the set.
    pub fn or(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Whether `label` is one of the set.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

impl From<&str> for Labels {
    fn from(label: &str) -> Self {
        Self::one(label)
    }
}

/// The rows of one card page and the set of rows claimed so far.
#[derive(Debug, Clone)]
pub struct TableExtractor<'a> {
    rows: Vec<TableRow<'a>>,
    visited: BTreeSet<usize>,
}

impl<'a> TableExtractor<'a> {
    /// Wrap an ordered list of rows.
    pub fn new(rows: Vec<TableRow<'a>>) -> Self {
        Self {
            rows,
            visited: BTreeSet::new(),
        }
    }

    /// Build rows from header cells, in the order given.
    pub fn from_headers(headers: impl IntoIterator<Item = ElementRef<'a>>) -> Self {
        Self::new(headers.into_iter().map(TableRow::from_header).collect())
    }

    /// Build rows from every `table tr th` cell of a page.
    pub fn from_page(page: &'a Page) -> Self {
        Self::from_headers(page.table_headers())
    }

    /// All rows, in page order.
    pub fn rows(&self) -> &[TableRow<'a>] {
        &self.rows
    }

    /// Indices of the rows claimed so far.
    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    /// Value of the first row whose label is in `labels`, claiming that row.
    ///
    /// Returns `None` both when nothing matches and when the matching row
    /// has no value cell.
    pub fn get_first(&mut self, labels: &Labels) -> Option<ElementRef<'a>> {
        let index = self
            .rows
            .iter()
            .position(|row| labels.contains(&row.label))?;

        self.visited.insert(index);
        self.rows[index].value
    }

    /// Every row whose label is in `labels`, in page order, claiming each.
    pub fn get_all(&mut self, labels: &Labels) -> Vec<TableRow<'a>> {
        let mut matched = Vec::new();

        for (index, row) in self.rows.iter().enumerate() {
            if labels.contains(&row.label) {
                self.visited.insert(index);
                matched.push(row.clone());
            }
        }

        matched
    }

    /// Rows no accessor has claimed, in page order.
    pub fn unvisited_rows(&self) -> Vec<&TableRow<'a>> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.visited.contains(index))
            .map(|(_, row)| row)
            .collect()
    }

    /// Unclaimed rows as `{title, value}` pairs.
    pub fn serializable_unvisited_rows(&self) -> Vec<UnstructuredRow> {
        self.unvisited_rows()
            .into_iter()
            .map(|row| UnstructuredRow {
                title: row.label.clone(),
                value: row.value_text(),
            })
            .collect()
    }
}

/// How many rows a field takes for its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// Only the first row carrying the label.
    First,
    /// Every row carrying the label.
    All,
}

/// A label a record reads and how many rows it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldClaim {
    pub label: &'static str,
    pub claim: Claim,
}

impl FieldClaim {
    pub const fn first(label: &'static str) -> Self {
        Self {
            label,
            claim: Claim::First,
        }
    }

    pub const fn all(label: &'static str) -> Self {
        Self {
            label,
            claim: Claim::All,
        }
    }
}

/// Consumed and leftover row indices of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPartition {
    pub consumed: BTreeSet<usize>,
    pub leftover: Vec<usize>,
}

/// Split rows into consumed and leftover given the claims of a record.
///
/// Depends only on the row labels and the claims, never on read order, so
/// it gives the same answer a [`TableExtractor`] reaches after all fields
/// declared in `claims` were read.
pub fn partition_rows(rows: &[TableRow<'_>], claims: &[FieldClaim]) -> RowPartition {
    let mut consumed = BTreeSet::new();

    for claim in claims {
        let mut matching = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.label == claim.label)
            .map(|(index, _)| index);

        match claim.claim {
            Claim::First => consumed.extend(matching.next()),
            Claim::All => consumed.extend(matching),
        }
    }

    let leftover = (0..rows.len())
        .filter(|index| !consumed.contains(index))
        .collect();

    RowPartition { consumed, leftover }
}
