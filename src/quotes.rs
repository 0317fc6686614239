//! quotes.toscrape.com listing

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractors::{extract, ExtractionJob, FieldDescriptor, Record};
use crate::fetcher::{fetch, FetchConfig};

pub const QUOTES_URL: &str = "https://quotes.toscrape.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

impl Quote {
    pub fn from_record(record: &Record) -> Self {
        Self {
            text: record.text("text").map(str::to_owned),
            author: record.text("author").map(str::to_owned),
            tags: record.list("tags").to_vec(),
        }
    }
}

pub fn quotes_job() -> ExtractionJob {
    ExtractionJob::new(".quote")
        .field(FieldDescriptor::text("text", ".text"))
        .field(FieldDescriptor::text("author", ".author"))
        .field(FieldDescriptor::all_text("tags", ".tags a.tag"))
}

pub fn parse_quotes(html: &str) -> Result<Vec<Quote>> {
    Ok(extract(html, &quotes_job())?
        .iter()
        .map(Quote::from_record)
        .collect())
}

pub fn scrape_quotes(url: &str, config: &FetchConfig) -> Result<Vec<Quote>> {
    let html = fetch(url, config)?;
    parse_quotes(&html)
}
