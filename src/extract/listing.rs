//! Listing page extraction
//!
//! A listing page carries a table of product rows linking to detail pages,
//! plus a "page X of Y" navigation widget on which the pagination plan is
//! based. Selectors are compiled once at construction.

use crate::ExtractionError;
use scraper::{Html, Selector};
use url::Url;

/// Compiles a CSS selector, mapping the error into the crate's taxonomy
pub(crate) fn compile(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::Selector(format!("{selector}: {e}")))
}

/// Parser for catalog listing pages
pub struct ListingExtractor {
    page_nav: Selector,
    product_table: Selector,
    product_link: Selector,
}

impl ListingExtractor {
    /// Creates an extractor with the catalog's listing selectors
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            page_nav: compile("div.pagenavbox")?,
            product_table: compile("table.prodtable")?,
            product_link: compile("tr > td.borderbtmfine > div > a")?,
        })
    }

    /// Reads the total listing page count from the navigation widget
    ///
    /// The widget renders a literal "page X of Y" indicator; this returns Y.
    ///
    /// # Errors
    ///
    /// `ExtractionError::MissingStructure` when the widget is absent,
    /// `ExtractionError::Malformed` when its text does not parse. Both are
    /// fatal for the whole harvest because no page range can be derived.
    pub fn total_pages(&self, html: &str) -> Result<u32, ExtractionError> {
        let document = Html::parse_document(html);
        let node = document
            .select(&self.page_nav)
            .next()
            .ok_or(ExtractionError::MissingStructure("div.pagenavbox"))?;

        let text = node.text().collect::<String>();
        let (_, total) =
            text.trim()
                .split_once("of ")
                .ok_or_else(|| ExtractionError::Malformed {
                    context: "page navigation widget",
                    message: format!("no 'of' marker in {:?}", text.trim()),
                })?;

        total
            .trim()
            .parse::<u32>()
            .map_err(|e| ExtractionError::Malformed {
                context: "page navigation widget",
                message: format!("total page count {:?}: {e}", total.trim()),
            })
    }

    /// Extracts the ordered detail page URLs from one listing page
    ///
    /// Relative hrefs are resolved against `base`. A product table with zero
    /// rows yields an empty vector, which the catalog legitimately produces
    /// near the end of a page range; a missing table is an error.
    pub fn product_links(&self, html: &str, base: &Url) -> Result<Vec<Url>, ExtractionError> {
        let document = Html::parse_document(html);
        let table = document
            .select(&self.product_table)
            .next()
            .ok_or(ExtractionError::MissingStructure("table.prodtable"))?;

        let mut links = Vec::new();
        for anchor in table.select(&self.product_link) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            match base.join(href) {
                Ok(url) => links.push(url),
                Err(e) => {
                    tracing::debug!("skipping unresolvable product link {href:?}: {e}");
                }
            }
        }
        Ok(links)
    }
}
