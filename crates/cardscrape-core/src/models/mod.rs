//! Data models: the card record and the scraper configuration.

pub mod card;
pub mod config;
