//! HTML engine seam
//!
//! The extractor never touches a DOM library directly; it goes through
//! [`HtmlEngine`] and [`HtmlDocument`] so field evaluation can run against
//! any tree implementation.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

/// Compiles selectors and parses pages
pub trait HtmlEngine {
    type Selector;
    type Document: HtmlDocument<Selector = Self::Selector>;

    /// Compile a CSS selector, failing with [`Error::SelectorSyntax`]
    fn compile(&self, css: &str) -> Result<Self::Selector>;

    fn parse(&self, html: &str) -> Self::Document;
}

/// A parsed page that can be queried with compiled selectors
pub trait HtmlDocument {
    type Selector;
    type Node<'d>: Copy
    where
        Self: 'd;

    /// All matches in the document, in document order
    fn select_all<'d>(&'d self, selector: &Self::Selector) -> Vec<Self::Node<'d>>;

    /// Matching descendants of `scope` (never `scope` itself), in document order
    fn select<'d>(
        &'d self,
        scope: Self::Node<'d>,
        selector: &Self::Selector,
    ) -> Vec<Self::Node<'d>>;

    fn select_first<'d>(
        &'d self,
        scope: Self::Node<'d>,
        selector: &Self::Selector,
    ) -> Option<Self::Node<'d>> {
        self.select(scope, selector).into_iter().next()
    }

    /// Concatenated text of the node and all its descendants, unmodified
    fn text<'d>(&'d self, node: Self::Node<'d>) -> String;

    fn attr<'d>(&'d self, node: Self::Node<'d>, name: &str) -> Option<String>;
}

/// [`HtmlEngine`] backed by the scraper crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperEngine;

impl HtmlEngine for ScraperEngine {
    type Selector = Selector;
    type Document = Html;

    fn compile(&self, css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| Error::SelectorSyntax {
            selector: css.to_string(),
            message: e.to_string(),
        })
    }

    fn parse(&self, html: &str) -> Html {
        Html::parse_document(html)
    }
}

impl HtmlDocument for Html {
    type Selector = Selector;
    type Node<'d> = ElementRef<'d>;

    fn select_all<'d>(&'d self, selector: &Selector) -> Vec<ElementRef<'d>> {
        self.select(selector).collect()
    }

    fn select<'d>(&'d self, scope: ElementRef<'d>, selector: &Selector) -> Vec<ElementRef<'d>> {
        scope.select(selector).collect()
    }

    fn select_first<'d>(
        &'d self,
        scope: ElementRef<'d>,
        selector: &Selector,
    ) -> Option<ElementRef<'d>> {
        scope.select(selector).next()
    }

    fn text<'d>(&'d self, node: ElementRef<'d>) -> String {
        node.text().collect()
    }

    fn attr<'d>(&'d self, node: ElementRef<'d>, name: &str) -> Option<String> {
        node.value().attr(name).map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_engine_scopes_to_descendants() {
        let html = r#"
        <ul>
            <li class="item"><span class="name">A</span></li>
            <li class="item"><span class="name">B</span><span class="name">C</span></li>
        </ul>
        "#;

        let engine = ScraperEngine;
        let doc = engine.parse(html);
        let items = doc.select_all(&engine.compile("li.item").unwrap());
        assert_eq!(items.len(), 2);

        let name = engine.compile("span.name").unwrap();
        let second: Vec<String> = HtmlDocument::select(&doc, items[1], &name)
            .into_iter()
            .map(|n| doc.text(n))
            .collect();
        assert_eq!(second, vec!["B", "C"]);

        // A container never matches itself
        let li = engine.compile("li").unwrap();
        assert!(doc.select_first(items[0], &li).is_none());
    }

    #[test]
    fn test_scraper_engine_rejects_bad_selector() {
        match ScraperEngine.compile("p.title[") {
            Err(Error::SelectorSyntax { selector, .. }) => assert_eq!(selector, "p.title["),
            other => panic!("expected SelectorSyntax, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_scraper_engine_attr() {
        let engine = ScraperEngine;
        let doc = engine.parse(r#"<p class="list-title"><a href=" /abs/1 ">x</a></p>"#);
        let links = doc.select_all(&engine.compile("p.list-title a").unwrap());
        assert_eq!(doc.attr(links[0], "href").as_deref(), Some(" /abs/1 "));
        assert_eq!(doc.attr(links[0], "title"), None);
    }
}
