//! Catalog traversal tests against an in-memory catalog.

use std::cell::RefCell;

use cardscrape_core::{
    Card, CardCrawler, ExtractionError, FetchError, FetchedPage, Fetcher, ScrapeConfig,
    ScrapeError,
};
use pretty_assertions::assert_eq;

const BASE: &str = "https://errproject.org/jeudepaume/card_show.php";

/// Serves one card per cursor up to `cards`, then the end-of-results redirect.
struct FakeCatalog {
    cards: u64,
    broken: Vec<u64>,
    failing_status: Option<(u64, u16)>,
    requested: RefCell<Vec<String>>,
}

impl FakeCatalog {
    fn new(cards: u64) -> Self {
        Self {
            cards,
            broken: Vec::new(),
            failing_status: None,
            requested: RefCell::new(Vec::new()),
        }
    }

    fn requests(&self) -> usize {
        self.requested.borrow().len()
    }

    fn cursor_of(url: &str) -> u64 {
        url.rsplit("StartDoc=").next().unwrap().parse().unwrap()
    }

    fn card_page(cursor: u64, broken: bool) -> Vec<u8> {
        let signed = if broken { "Unknown" } else { "Yes" };
        format!(
            r#"<html><body><table>
                <tr><th>Title:</th><td>Painting {cursor}</td></tr>
                <tr><th>Signed?</th><td>{signed}</td></tr>
                <tr><th>Transfer place:</th><td>Paris</td></tr>
                <tr><th>Transfer date:</th><td>194{cursor}</td></tr>
            </table></body></html>"#
        )
        .into_bytes()
    }
}

impl Fetcher for FakeCatalog {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        let cursor = Self::cursor_of(url);

        if let Some((at, status)) = self.failing_status {
            if at == cursor {
                return Ok(FetchedPage::new(status, url, "server error"));
            }
        }

        if cursor > self.cards {
            return Ok(FetchedPage::new(302, url, ""));
        }

        Ok(FetchedPage::new(
            200,
            format!("{BASE}?CardId={cursor}"),
            Self::card_page(cursor, self.broken.contains(&cursor)),
        ))
    }
}

fn ids(cards: &[Card]) -> Vec<i64> {
    cards.iter().map(|card| card.id).collect()
}

#[test]
fn test_stops_at_end_of_results_redirect() {
    let catalog = FakeCatalog::new(5);
    let crawler = CardCrawler::new(&catalog, &ScrapeConfig::default());

    let cards: Vec<Card> = crawler.cards(1, 100).collect::<Result<_, _>>().unwrap();

    assert_eq!(ids(&cards), vec![1, 2, 3, 4, 5]);
    assert_eq!(catalog.requests(), 6);
    assert_eq!(
        catalog.requested.borrow()[0],
        format!("{BASE}?Query=&StartDoc=1")
    );
}

#[test]
fn test_limit_is_inclusive() {
    let catalog = FakeCatalog::new(50);
    let crawler = CardCrawler::new(&catalog, &ScrapeConfig::default());

    let cards: Vec<Card> = crawler.cards(3, 6).collect::<Result<_, _>>().unwrap();

    assert_eq!(ids(&cards), vec![3, 4, 5, 6]);
    assert_eq!(catalog.requests(), 4);
}

#[test]
fn test_is_lazy() {
    let catalog = FakeCatalog::new(50);
    let crawler = CardCrawler::new(&catalog, &ScrapeConfig::default());

    let mut cards = crawler.cards(1, 100);
    assert_eq!(catalog.requests(), 0);

    let first: Vec<Card> = cards.by_ref().take(2).collect::<Result<_, _>>().unwrap();
    assert_eq!(ids(&first), vec![1, 2]);
    assert_eq!(catalog.requests(), 2);
    assert_eq!(cards.cursor(), 3);

    drop(cards);
    assert_eq!(catalog.requests(), 2);
}

#[test]
fn test_card_contents() {
    let catalog = FakeCatalog::new(2);
    let crawler = CardCrawler::new(&catalog, &ScrapeConfig::default());

    let card = crawler.cards(2, 2).next().unwrap().unwrap();

    assert_eq!(card.url, format!("{BASE}?CardId=2"));
    assert_eq!(card.title.as_deref(), Some("Painting 2"));
    assert_eq!(card.signed, Some(true));
    assert_eq!(card.transfers.len(), 1);
    assert_eq!(card.transfers[0].date.as_deref(), Some("1942"));
    assert!(card.unstructured_data.is_empty());
}

#[test]
fn test_broken_card_does_not_stop_the_crawl() {
    let mut catalog = FakeCatalog::new(3);
    catalog.broken.push(2);
    let crawler = CardCrawler::new(&catalog, &ScrapeConfig::default());

    let results: Vec<_> = crawler.cards(1, 100).collect();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().id, 1);
    match &results[1] {
        Err(ScrapeError::Card { cursor, source, .. }) => {
            assert_eq!(*cursor, 2);
            assert_eq!(
                source,
                &ExtractionError::MalformedBoolean {
                    field: "Signed?".to_string(),
                    value: "Unknown".to_string(),
                }
            );
        }
        other => panic!("expected card error, got {other:?}"),
    }
    assert_eq!(results[2].as_ref().unwrap().id, 3);
}

#[test]
fn test_error_status_ends_the_crawl() {
    let mut catalog = FakeCatalog::new(10);
    catalog.failing_status = Some((3, 500));
    let crawler = CardCrawler::new(&catalog, &ScrapeConfig::default());

    let results: Vec<_> = crawler.cards(1, 100).collect();

    assert_eq!(results.len(), 3);
    assert!(matches!(
        results[2],
        Err(ScrapeError::Fetch(FetchError::Status { status: 500, .. }))
    ));
    assert_eq!(catalog.requests(), 3);
}

#[test]
fn test_resume_from_offset() {
    let catalog = FakeCatalog::new(4);
    let crawler = CardCrawler::new(&catalog, &ScrapeConfig::default());

    let mut first_run = crawler.cards(1, 100);
    first_run.next();
    let resume_at = first_run.cursor();
    drop(first_run);

    let rest: Vec<Card> = crawler.cards(resume_at, 100).collect::<Result<_, _>>().unwrap();
    assert_eq!(ids(&rest), vec![2, 3, 4]);
}
