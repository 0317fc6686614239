//! Selector-driven HTML extraction
//!
//! Fetches pages over HTTP and turns them into structured records:
//! - Fetcher: one blocking GET with explicit headers and deadline
//! - Extractors: container selector + declarative field descriptors
//! - Jobs: arXiv search results, quotes.toscrape.com
//! - Output: pretty JSON files and console summaries

pub mod arxiv;
pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod output;
pub mod quotes;

pub use error::{Error, Result};
pub use extractors::*;
pub use fetcher::{fetch, FetchConfig};
