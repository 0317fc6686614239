//! arXiv search results
//!
//! Scrapes the HTML listing at `arxiv.org/search` into [`ArxivPaper`]s.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::{Error, Result};
use crate::extractors::{extract, DerivedField, ExtractionJob, FieldDescriptor, Record};
use crate::fetcher::{fetch, FetchConfig};

/// Page sizes the search endpoint accepts; anything else is answered with 400
pub const ALLOWED_SIZES: [u32; 4] = [25, 50, 100, 200];

pub const SEARCH_ENDPOINT: &str = "https://arxiv.org/search/";

/// One search hit, in the shape written to `arxiv_results.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivPaper {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub submitted: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub url: Option<String>,
    pub pdf_url: Option<String>,
}

impl ArxivPaper {
    pub fn from_record(record: &Record) -> Self {
        let text = |name: &str| record.text(name).map(str::to_owned);
        Self {
            title: text("title"),
            authors: record.list("authors").to_vec(),
            submitted: text("submitted"),
            abstract_text: text("abstract"),
            url: text("url"),
            pdf_url: text("pdf_url"),
        }
    }
}

/// Reject page sizes the endpoint would refuse
pub fn check_size(size: u32) -> Result<()> {
    if ALLOWED_SIZES.contains(&size) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "invalid page size {}: use one of {:?}",
            size, ALLOWED_SIZES
        )))
    }
}

/// Search URL for `query`, newest announcements first, abstracts shown
pub fn search_url(query: &str, size: u32) -> Result<String> {
    check_size(size)?;
    let q: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    Ok(format!(
        "{}?query={}&searchtype=all&abstracts=show&order=-announced_date_first&size={}",
        SEARCH_ENDPOINT, q, size
    ))
}

/// `.../abs/<id>` -> `.../pdf/<id>.pdf`
pub fn pdf_url_from_abs(url: &str) -> Option<String> {
    url.contains("/abs/")
        .then(|| format!("{}.pdf", url.replace("/abs/", "/pdf/")))
}

/// Drop the "△ Less" toggle that closes an expanded abstract
fn strip_less_toggle(text: String) -> String {
    match text.strip_suffix("△ Less") {
        Some(rest) => rest.trim_end().to_string(),
        None => text,
    }
}

/// Field layout of one `li.arxiv-result`
pub fn search_job() -> ExtractionJob {
    ExtractionJob::new("li.arxiv-result")
        .field(FieldDescriptor::text("title", "p.title.is-5.mathjax"))
        .field(FieldDescriptor::all_text("authors", "p.authors a"))
        .field(FieldDescriptor::text("submitted", "p.is-size-7"))
        .field(
            FieldDescriptor::text("abstract", "span.abstract-full.has-text-grey-dark.mathjax")
                .with_normalize(strip_less_toggle),
        )
        .field(FieldDescriptor::attr("url", "p.list-title a", "href"))
        .derive(DerivedField::new("pdf_url", "url", pdf_url_from_abs))
}

/// Extract papers from an already fetched results page
pub fn parse_search_results(html: &str) -> Result<Vec<ArxivPaper>> {
    Ok(extract(html, &search_job())?
        .iter()
        .map(ArxivPaper::from_record)
        .collect())
}

/// Fetch one page of results for `query`.
///
/// `size` is checked before any request is made.
pub fn scrape_arxiv_search(
    query: &str,
    size: u32,
    config: &FetchConfig,
) -> Result<Vec<ArxivPaper>> {
    let url = search_url(query, size)?;
    let html = fetch(&url, config)?;
    parse_search_results(&html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
    <ol class="breathe-horizontal">
      <li class="arxiv-result">
        <div class="is-marginless">
          <p class="list-title is-inline-block">
            <a href="https://arxiv.org/abs/1234.5678">arXiv:1234.5678</a>
          </p>
        </div>
        <p class="title is-5 mathjax">
          Foo
          Bar
        </p>
        <p class="authors">
          <span class="has-text-black-bis has-text-weight-semibold">Authors:</span>
          <a href="/a/one_a_1">A. One</a>,
          <a href="/a/two_b_1">B.   Two</a>
        </p>
        <p class="abstract mathjax">
          <span class="abstract-full has-text-grey-dark mathjax" style="display: none;">
            We study   things.
            <a class="is-size-7" href="javascript:void(0)">&#9651; Less</a>
          </span>
        </p>
        <p class="is-size-7">
          <span class="has-text-black-bis has-text-weight-semibold">Submitted</span>
          3 October, 2024;
        </p>
      </li>
      <li class="arxiv-result">
        <p class="title is-5 mathjax">No links here</p>
      </li>
    </ol>
    "#;

    #[test]
    fn test_sizes_outside_allowed_set_are_rejected() {
        for size in [0, 10, 24, 26, 75, 201, 1000] {
            assert!(matches!(search_url("rag", size), Err(Error::InvalidArgument(_))));
        }
        for size in ALLOWED_SIZES {
            assert!(search_url("rag", size).is_ok());
        }
    }

    #[test]
    fn test_invalid_size_fails_before_fetching() {
        // A 1ms deadline turns any request that does go out into Timeout
        let config = FetchConfig::default()
            .with_timeout(std::time::Duration::from_millis(1));
        assert!(matches!(
            scrape_arxiv_search("rag", 30, &config),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url("retrieval augmented generation", 25).unwrap();
        assert_eq!(
            url,
            "https://arxiv.org/search/?query=retrieval+augmented+generation\
             &searchtype=all&abstracts=show&order=-announced_date_first&size=25"
        );
        assert!(search_url("a&b=c", 50).unwrap().contains("query=a%26b%3Dc&"));
    }

    #[test]
    fn test_pdf_url_from_abs() {
        assert_eq!(
            pdf_url_from_abs("https://arxiv.org/abs/1234.5678").as_deref(),
            Some("https://arxiv.org/pdf/1234.5678.pdf")
        );
        assert_eq!(pdf_url_from_abs("https://arxiv.org/list/cs"), None);
    }

    #[test]
    fn test_parse_fixture() {
        let papers = parse_search_results(FIXTURE).unwrap();
        assert_eq!(papers.len(), 2);

        let first = &papers[0];
        assert_eq!(first.title.as_deref(), Some("Foo Bar"));
        assert_eq!(first.authors, vec!["A. One", "B. Two"]);
        assert!(first.url.as_deref().unwrap().ends_with("/abs/1234.5678"));
        assert_eq!(
            first.pdf_url.as_deref(),
            Some("https://arxiv.org/pdf/1234.5678.pdf")
        );
        assert_eq!(first.abstract_text.as_deref(), Some("We study things."));
        assert_eq!(first.submitted.as_deref(), Some("Submitted 3 October, 2024;"));

        let second = &papers[1];
        assert_eq!(second.title.as_deref(), Some("No links here"));
        assert!(second.authors.is_empty());
        assert_eq!(second.url, None);
        assert_eq!(second.pdf_url, None);
        assert_eq!(second.submitted, None);
    }

    #[test]
    fn test_record_keeps_every_key() {
        let records = extract(FIXTURE, &search_job()).unwrap();
        let keys: Vec<&str> = records[1].keys().collect();
        assert_eq!(
            keys,
            vec!["title", "authors", "submitted", "abstract", "url", "pdf_url"]
        );
    }

    #[test]
    fn test_json_shape() {
        let papers = parse_search_results(FIXTURE).unwrap();
        let value = serde_json::to_value(&papers[1]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "No links here",
                "authors": [],
                "submitted": null,
                "abstract": null,
                "url": null,
                "pdf_url": null
            })
        );
    }

    #[test]
    fn test_empty_page() {
        let html = "<html><body><p>Sorry, your query returned no results</p></body></html>";
        assert!(parse_search_results(html).unwrap().is_empty());
    }
}
