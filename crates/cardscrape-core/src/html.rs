//! Thin layer over the `scraper` HTML tree.
//!
//! Everything the extraction code needs from a parsed page goes through
//! here: selecting elements, walking to a sibling cell, reading attributes
//! and flattening visible text.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    /// Header cells of every table row on a card page.
    pub static ref TABLE_HEADERS: Selector = Selector::parse("table tr th").unwrap();

    /// First anchor inside a value cell.
    pub static ref ANCHOR: Selector = Selector::parse("a").unwrap();

    /// Image links in the first row of a highslide gallery.
    pub static ref GALLERY_LINKS: Selector =
        Selector::parse("div.highslide-gallery table tr:first-child td a").unwrap();
}

/// A parsed HTML page.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parse a page from raw response bytes.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse(bytes: &[u8]) -> Self {
        let source = String::from_utf8_lossy(bytes);
        Self {
            document: Html::parse_document(&source),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.document.select(selector).collect()
    }

    /// The header cells that label the card table.
    pub fn table_headers(&self) -> Vec<ElementRef<'_>> {
        self.select(&TABLE_HEADERS)
    }
}

/// Descendants of `element` matching `selector`, in document order.
pub fn select_within<'a>(element: ElementRef<'a>, selector: &Selector) -> Vec<ElementRef<'a>> {
    element.select(selector).collect()
}

/// The next sibling element of `element` with the given tag name.
///
/// Text nodes and elements with other names are skipped.
pub fn next_sibling_element<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == tag)
}

/// Read an attribute of `element`.
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Visible text of `element`.
///
/// With a separator, it is inserted between every pair of text fragments,
/// so `<td>a<br>b</td>` reads as `"a\nb"` for a `"\n"` separator.
/// Nothing is trimmed.
pub fn visible_text(element: ElementRef<'_>, separator: Option<&str>) -> String {
    match separator {
        Some(separator) => element.text().collect::<Vec<_>>().join(separator),
        None => element.text().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(page: &Page) -> ElementRef<'_> {
        page.table_headers()[0]
    }

    #[test]
    fn test_table_headers_in_order() {
        let page = Page::parse(
            b"<table><tr><th>A:</th><td>1</td></tr><tr><th>B:</th><td>2</td></tr></table>",
        );

        let labels: Vec<String> = page
            .table_headers()
            .into_iter()
            .map(|th| visible_text(th, None))
            .collect();

        assert_eq!(labels, vec!["A:", "B:"]);
    }

    #[test]
    fn test_next_sibling_skips_other_tags() {
        let page = Page::parse(
            b"<table><tr><th>A:</th><th>extra</th><td>value</td></tr></table>",
        );

        let td = next_sibling_element(cell(&page), "td").unwrap();
        assert_eq!(visible_text(td, None), "value");
    }

    #[test]
    fn test_next_sibling_missing() {
        let page = Page::parse(b"<table><tr><th>A:</th></tr></table>");

        assert!(next_sibling_element(cell(&page), "td").is_none());
    }

    #[test]
    fn test_visible_text_separator() {
        let page = Page::parse(
            b"<table><tr><th>A:</th><td>first<br>second <b>bold</b></td></tr></table>",
        );
        let td = next_sibling_element(cell(&page), "td").unwrap();

        assert_eq!(visible_text(td, Some("\n")), "first\nsecond \nbold");
        assert_eq!(visible_text(td, None), "firstsecond bold");
    }

    #[test]
    fn test_attr() {
        let page = Page::parse(
            b"<table><tr><th>A:</th><td><a href=\"x.php?id=3\">x</a></td></tr></table>",
        );
        let td = next_sibling_element(cell(&page), "td").unwrap();
        let anchor = select_within(td, &ANCHOR)[0];

        assert_eq!(attr(anchor, "href"), Some("x.php?id=3"));
        assert_eq!(attr(anchor, "title"), None);
    }
}
