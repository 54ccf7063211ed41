//! Writing scraped cards to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cardscrape_core::Card;
use chrono::{DateTime, Local};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

/// Timestamped default output file name, e.g.
/// `2024_03_01_12_00_00_errproject.org.json`.
pub fn default_output_path(now: DateTime<Local>, format: OutputFormat) -> PathBuf {
    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Jsonl => "jsonl",
    };

    PathBuf::from(format!(
        "{}_errproject.org.{}",
        now.format("%Y_%m_%d_%H_%M_%S"),
        extension
    ))
}

/// Serialize `cards` in the given format.
pub fn write_cards<W: Write>(mut writer: W, cards: &[Card], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, cards)?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for card in cards {
                serde_json::to_writer(&mut writer, card)?;
                writeln!(writer)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write `cards` to a file at `path`, replacing it.
pub fn write_cards_to_file(path: &Path, cards: &[Card], format: OutputFormat) -> anyhow::Result<()> {
    let file = File::create(path)?;
    write_cards(BufWriter::new(file), cards, format)
}
