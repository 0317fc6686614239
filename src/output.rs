//! JSON files and console summaries

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::arxiv::ArxivPaper;
use crate::error::Result;
use crate::quotes::Quote;

/// Authors listed per paper before eliding the rest
const SUMMARY_AUTHORS: usize = 5;

/// Pretty JSON with 2-space indentation; non-ASCII stays literal
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize `value` completely, then write it to `path` in one call
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let json = to_json_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

/// Numbered summary of the first `limit` papers
pub fn arxiv_summary(papers: &[ArxivPaper], limit: usize) -> String {
    let mut out = String::new();
    for (i, paper) in papers.iter().take(limit).enumerate() {
        let shown = paper.authors.len().min(SUMMARY_AUTHORS);
        let ellipsis = if paper.authors.len() > SUMMARY_AUTHORS {
            "..."
        } else {
            ""
        };

        // Writing to a String cannot fail
        let _ = writeln!(out, "{}. {}", i + 1, or_none(&paper.title));
        let _ = writeln!(
            out,
            "   Authors: {}{}",
            paper.authors[..shown].join(", "),
            ellipsis
        );
        let _ = writeln!(out, "   Submitted: {}", or_none(&paper.submitted));
        let _ = writeln!(out, "   URL: {}", or_none(&paper.url));
        let _ = writeln!(out, "   PDF: {}", or_none(&paper.pdf_url));
        out.push('\n');
    }
    out
}

pub fn quotes_summary(quotes: &[Quote], limit: usize) -> String {
    quotes
        .iter()
        .take(limit)
        .map(|q| format!("- {}\n", or_none(&q.text)))
        .collect()
}
