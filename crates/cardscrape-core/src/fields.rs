//! Typed accessors over a card table.
//!
//! Every accessor claims the row it reads (see [`TableExtractor`]), and
//! every accessor agrees on what an absent field looks like: `None` for
//! scalar values and an empty vector for lists. Values that break the
//! source's own conventions are errors, never defaults.

use tracing::warn;
use url::Url;

use crate::error::ExtractionError;
use crate::html::{self, ANCHOR, GALLERY_LINKS};
use crate::table::{Labels, TableExtractor};

/// Result type for field accessors.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Typed field reads over one page's [`TableExtractor`].
#[derive(Debug, Clone)]
pub struct FieldInterpreter<'a> {
    table: TableExtractor<'a>,
}

impl<'a> FieldInterpreter<'a> {
    pub fn new(table: TableExtractor<'a>) -> Self {
        Self { table }
    }

    /// The underlying table, with the rows claimed so far.
    pub fn table(&self) -> &TableExtractor<'a> {
        &self.table
    }

    /// Mutable access for reads that need raw rows, e.g. repeated groups.
    pub fn table_mut(&mut self) -> &mut TableExtractor<'a> {
        &mut self.table
    }

    pub fn into_table(self) -> TableExtractor<'a> {
        self.table
    }

    /// Visible text of a field, line breaks between text fragments, trimmed.
    ///
    /// An empty value reads as `None`.
    pub fn text(&mut self, label: &str) -> Option<String> {
        let element = self.table.get_first(&Labels::one(label))?;
        let text = html::visible_text(element, Some("\n"));
        let text = text.trim();

        (!text.is_empty()).then(|| text.to_string())
    }

    /// A `Yes`/`No` field.
    pub fn bool(&mut self, label: &str) -> Result<Option<bool>> {
        match self.text(label).as_deref() {
            Some("Yes") => Ok(Some(true)),
            Some("No") => Ok(Some(false)),
            None => Ok(None),
            Some(other) => Err(ExtractionError::MalformedBoolean {
                field: label.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// `href` of the first link in a field.
    ///
    /// With a `base`, the link is resolved to an absolute URL.
    pub fn link(&mut self, label: &str, base: Option<&Url>) -> Option<String> {
        let element = self.table.get_first(&Labels::one(label))?;
        let anchor = html::select_within(element, &ANCHOR).into_iter().next()?;
        let href = html::attr(anchor, "href")?;

        let Some(base) = base else {
            return Some(href.to_string());
        };

        match base.join(href) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                warn!("Keeping unresolvable link {:?} of {}: {}", href, label, e);
                Some(href.to_string())
            }
        }
    }

    /// Integer identifier carried in the query string of a field's link.
    pub fn id(&mut self, label: &str, parameter: &str) -> Result<Option<i64>> {
        let Some(link) = self.link(label, None) else {
            return Ok(None);
        };

        let value = query_parameter(&link, parameter).ok_or_else(|| {
            ExtractionError::MissingQueryParameter {
                field: label.to_string(),
                parameter: parameter.to_string(),
                link: link.clone(),
            }
        })?;

        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ExtractionError::InvalidIdentifier {
                field: label.to_string(),
                value,
            })
    }

    /// Image links from the gallery of a field, in page order.
    pub fn image_urls(&mut self, label: &str) -> Vec<String> {
        let Some(container) = self.table.get_first(&Labels::one(label)) else {
            return Vec::new();
        };

        html::select_within(container, &GALLERY_LINKS)
            .into_iter()
            .filter_map(|anchor| html::attr(anchor, "href"))
            .map(str::to_string)
            .collect()
    }
}

/// First value of `parameter` in the query string of `link`.
///
/// Works on relative links too, which is how the catalog writes them.
pub fn query_parameter(link: &str, parameter: &str) -> Option<String> {
    let without_fragment = link.split('#').next().unwrap_or(link);
    let (_, query) = without_fragment.split_once('?')?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == parameter)
        .map(|(_, value)| value.into_owned())
}
