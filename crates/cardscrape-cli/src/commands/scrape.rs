//! Scrape command - walk the catalog and write the cards out.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use cardscrape_core::{Card, CardCrawler, HttpFetcher, ScrapeError};

use crate::output::{self, OutputFormat};

/// Arguments for the scrape command.
#[derive(Args)]
pub struct ScrapeArgs {
    /// First cursor position to fetch (1-based)
    #[arg(long)]
    offset: Option<u64>,

    /// Last cursor position to fetch, inclusive
    #[arg(long)]
    limit: Option<u64>,

    /// Output file (defaults to a timestamped file in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Hide the progress display
    #[arg(short, long)]
    quiet: bool,

    /// Skip cards that fail extraction instead of aborting
    #[arg(long)]
    continue_on_error: bool,

    /// Resolve links against the card page URL
    #[arg(long)]
    absolute_links: bool,
}

/// A card that could not be extracted.
struct Skipped {
    cursor: u64,
    url: String,
    reason: String,
}

pub fn run(args: ScrapeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if args.absolute_links {
        config.extraction.absolute_links = true;
    }

    let offset = args.offset.unwrap_or(config.crawl.offset);
    let limit = args.limit.unwrap_or(config.crawl.limit);
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| output::default_output_path(chrono::Local::now(), args.format));

    info!(
        "Scraping {} from cursor {} to {}",
        config.source.base_url, offset, limit
    );

    let fetcher = HttpFetcher::new(&config.http)?;
    let crawler = CardCrawler::new(fetcher, &config);

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    };

    let mut cards: Vec<Card> = Vec::new();
    let mut skipped: Vec<Skipped> = Vec::new();
    let mut fatal: Option<(ScrapeError, u64)> = None;

    let mut traversal = crawler.cards(offset, limit);
    while let Some(result) = traversal.next() {
        match result {
            Ok(card) => {
                progress.set_message(progress_message(cards.len() + 1, card.id));
                cards.push(card);
            }
            Err(ScrapeError::Card {
                cursor,
                url,
                source,
            }) if args.continue_on_error => {
                warn!("Skipping card at cursor {} ({}): {}", cursor, url, source);
                skipped.push(Skipped {
                    cursor,
                    url,
                    reason: source.to_string(),
                });
            }
            Err(e) => {
                let at = resume_offset(&e, traversal.cursor());
                error!("Scrape stopped at cursor {}: {}", at, e);
                fatal = Some((e, at));
                break;
            }
        }
    }
    drop(traversal);

    progress.finish_and_clear();

    // Whatever was scraped before a failure is still written out.
    output::write_cards_to_file(&output_path, &cards, args.format)?;

    if let Some((e, resume_at)) = fatal {
        eprintln!(
            "{} Wrote {} cards to {} before failing; resume with --offset {}",
            style("✗").red(),
            cards.len(),
            output_path.display(),
            resume_at
        );
        return Err(e.into());
    }

    if !args.quiet {
        print_summary(&cards, &skipped, &output_path, start.elapsed());
    }

    Ok(())
}

/// Spinner text for the `number`-th card of this run.
fn progress_message(number: usize, card_id: i64) -> String {
    format!("Scraped card no {} - id {}", number, card_id)
}

/// Offset at which a later run picks up after `error`.
///
/// A card that failed extraction has already been stepped over, so the
/// run resumes at that card rather than after it.
fn resume_offset(error: &ScrapeError, next_cursor: u64) -> u64 {
    match error {
        ScrapeError::Card { cursor, .. } => *cursor,
        _ => next_cursor,
    }
}

fn print_summary(cards: &[Card], skipped: &[Skipped], output_path: &Path, elapsed: Duration) {
    println!(
        "{} Scraped {} cards in {:?}",
        style("✓").green(),
        cards.len(),
        elapsed
    );
    println!("   Output: {}", output_path.display());

    let with_leftovers = cards
        .iter()
        .filter(|card| !card.unstructured_data.is_empty())
        .count();
    if with_leftovers > 0 {
        println!(
            "   {} cards carry unstructured rows",
            style(with_leftovers).yellow()
        );
    }

    if !skipped.is_empty() {
        println!();
        println!("{}", style("Skipped cards:").red());
        for card in skipped {
            println!("  - cursor {} ({}): {}", card.cursor, card.url, card.reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardscrape_core::{ExtractionError, FetchError};

    #[test]
    fn test_progress_counts_cards_of_this_run() {
        assert_eq!(progress_message(1, 18421), "Scraped card no 1 - id 18421");
    }

    #[test]
    fn test_resume_at_failed_card() {
        let error = ScrapeError::Card {
            cursor: 7,
            url: "card_show.php?CardId=70".to_string(),
            source: ExtractionError::OrphanTransferDate("1942".to_string()),
        };

        assert_eq!(resume_offset(&error, 8), 7);
    }

    #[test]
    fn test_resume_at_unfetched_cursor() {
        let error = ScrapeError::Fetch(FetchError::Status {
            status: 503,
            url: "card_show.php?Query=&StartDoc=8".to_string(),
        });

        assert_eq!(resume_offset(&error, 8), 8);
    }
}
