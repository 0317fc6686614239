//! CSS selector-based extraction
//!
//! Runs an [`ExtractionJob`] over a page. Uses the scraper crate by default;
//! [`extract_with`] accepts any [`HtmlEngine`].

use std::collections::HashSet;

use tracing::debug;

use super::{
    DerivedField, ExtractionJob, FieldDescriptor, FieldValue, HtmlDocument, HtmlEngine, Mode,
    Record, ResultSet, ScraperEngine,
};
use crate::error::{Error, Result};

/// Collapse runs of whitespace to a single space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Run `job` over `html` with the scraper engine
pub fn extract(html: &str, job: &ExtractionJob) -> Result<ResultSet> {
    extract_with(&ScraperEngine, html, job)
}

/// Run `job` over `html` with an injected engine.
///
/// Every selector is compiled and every field name checked before the
/// page is parsed, so a bad job fails even when nothing would match.
pub fn extract_with<E: HtmlEngine>(
    engine: &E,
    html: &str,
    job: &ExtractionJob,
) -> Result<ResultSet> {
    let container = engine.compile(&job.container_selector)?;
    let fields = job
        .fields
        .iter()
        .map(|field| engine.compile(&field.selector).map(|selector| (field, selector)))
        .collect::<Result<Vec<_>>>()?;
    check_field_names(job)?;

    let document = engine.parse(html);
    let containers = document.select_all(&container);
    debug!(
        container = %job.container_selector,
        matched = containers.len(),
        fields = job.fields.len(),
        "extracting"
    );

    Ok(containers
        .into_iter()
        .map(|node| {
            let mut record = Record::new();
            for (field, selector) in &fields {
                let value = evaluate(&document, node, field, selector);
                record.insert(field.name.as_str(), value);
            }
            apply_derived(&mut record, &job.derived);
            record
        })
        .collect())
}

/// Evaluate one field against one container
fn evaluate<'d, D: HtmlDocument>(
    document: &'d D,
    container: D::Node<'d>,
    field: &FieldDescriptor,
    selector: &D::Selector,
) -> FieldValue {
    let finish = |raw: String| match field.normalize {
        Some(normalize) => normalize(raw),
        None => raw,
    };

    match &field.mode {
        Mode::SingleText => document
            .select_first(container, selector)
            .map(|el| finish(collapse_whitespace(&document.text(el))))
            .into(),
        Mode::AllText => FieldValue::List(
            document
                .select(container, selector)
                .into_iter()
                .map(|el| collapse_whitespace(&document.text(el)))
                .filter(|text| !text.is_empty())
                .map(finish)
                .collect(),
        ),
        Mode::Attribute(attr_name) => document
            .select_first(container, selector)
            .and_then(|el| document.attr(el, attr_name))
            .map(|value| finish(value.trim().to_string()))
            .into(),
    }
}

/// Fill derived fields in declared order, after all selector fields
fn apply_derived(record: &mut Record, derived: &[DerivedField]) {
    for field in derived {
        let value: FieldValue = record
            .text(&field.source)
            .and_then(|source| (field.derive)(source))
            .into();
        record.insert(field.name.as_str(), value);
    }
}

/// Field names are unique across the job, and a derived field may only read
/// a selector field or an earlier derived field
fn check_field_names(job: &ExtractionJob) -> Result<()> {
    let mut known: HashSet<&str> = HashSet::new();
    for name in job.fields.iter().map(|f| f.name.as_str()) {
        if !known.insert(name) {
            return Err(duplicate_field(name));
        }
    }
    for field in &job.derived {
        if !known.contains(field.source.as_str()) {
            return Err(Error::InvalidArgument(format!(
                "derived field `{}` reads unknown field `{}`",
                field.name, field.source
            )));
        }
        if !known.insert(field.name.as_str()) {
            return Err(duplicate_field(&field.name));
        }
    }
    Ok(())
}

fn duplicate_field(name: &str) -> Error {
    Error::InvalidArgument(format!("field `{}` is declared more than once", name))
}
