//! Detail page extraction
//!
//! Turns the markup of one product detail page into a [`ProductRecord`]
//! using a tolerant, field-independent policy: a missing or malformed field
//! is skipped without aborting extraction of the rest of the record. Only
//! the two main data tables are required structure.

use crate::extract::formula::convert_formula;
use crate::extract::listing::compile;
use crate::record::ProductRecord;
use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Placeholder the catalog renders for fields it has no data for
const NOT_APPLICABLE: &str = "-";

/// Parser for product detail pages
///
/// Selectors are compiled once at construction. The `include_media` flag
/// selects whether the optional safety-data-sheet and image links are
/// extracted; with it disabled the extractor behaves like the catalog's
/// reduced record shape while sharing one code path.
pub struct DetailExtractor {
    data_table: Selector,
    data_row: Selector,
    label_cell: Selector,
    value_cell: Selector,
    price_table: Selector,
    offer_row: Selector,
    size_cell: Selector,
    price_value: Selector,
    synonyms_node: Selector,
    msds_link: Selector,
    image_node: Selector,
    include_media: bool,
}

impl DetailExtractor {
    /// Creates an extractor with the catalog's detail page selectors
    pub fn new(include_media: bool) -> Result<Self, ExtractionError> {
        Ok(Self {
            data_table: compile("table.ptable")?,
            data_row: compile("tr")?,
            label_cell: compile("td.ptdataleft")?,
            value_cell: compile("td.ptdataright")?,
            price_table: compile("table.pricetable")?,
            offer_row: compile(r#"tr[itemprop="offers"]"#)?,
            size_cell: compile("td.pricetdmid")?,
            price_value: compile(r#"td.pricetdmid b span[itemprop="price"]"#)?,
            synonyms_node: compile(r#"p[itemprop="isRelatedTo"] i"#)?,
            msds_link: compile(r#"a[title="Download MSDS"]"#)?,
            image_node: compile("a.fancybox img")?,
            include_media,
        })
    }

    /// Extracts a [`ProductRecord`] from one detail page
    ///
    /// `url` is always set on the returned record; every other field is set
    /// only when its source row or node is present and its value is not the
    /// catalog's "not applicable" placeholder.
    ///
    /// # Errors
    ///
    /// `ExtractionError::MissingStructure` when either of the two main data
    /// tables (detail and specification) is absent. This is fatal for the
    /// one record but is reported per item by the orchestrator, never
    /// aborting the batch.
    pub fn extract(&self, html: &str, url: &Url) -> Result<ProductRecord, ExtractionError> {
        let document = Html::parse_document(html);

        let mut tables = document.select(&self.data_table);
        let detail_table = tables
            .next()
            .ok_or(ExtractionError::MissingStructure("product detail table"))?;
        let spec_table = tables.next().ok_or(ExtractionError::MissingStructure(
            "product specification table",
        ))?;

        let mut record = ProductRecord::new(url);

        // "Product Detail" table: identifiers, formula, weight.
        for (label, value) in self.labeled_rows(detail_table) {
            match label.as_str() {
                "Glentham Code" => record.pid = Some(value),
                "Product Name" => record.name = Some(value),
                "CAS" => record.cas = Some(value),
                "Molecular Formula" if value != NOT_APPLICABLE => {
                    record.structure = Some(convert_formula(&value));
                }
                "Molecular Weight" if value != NOT_APPLICABLE => {
                    record.properties_mut().weight = Some(value);
                }
                _ => {}
            }
        }

        // "Product Specification" table: purity and melting point.
        for (label, value) in self.labeled_rows(spec_table) {
            match label.as_str() {
                "Purity" => record.properties_mut().purity = Some(value),
                "Melting Point" => record.properties_mut().melting_point = Some(value),
                _ => {}
            }
        }

        self.extract_packaging(&document, &mut record);

        if let Some(node) = document.select(&self.synonyms_node).next() {
            let text = text_of(node);
            record.synonyms = Some(text.split("; ").map(str::to_string).collect());
        }

        if self.include_media {
            if let Some(anchor) = document.select(&self.msds_link).next() {
                record.pdf_msds = anchor.value().attr("href").map(str::to_string);
            }
            if let Some(image) = document.select(&self.image_node).next() {
                record.img = image.value().attr("src").map(str::to_string);
            }
        }

        record.seal_packaging();
        Ok(record)
    }

    /// Collects (label, value) pairs from a data table's usable rows
    ///
    /// Rows missing either cell, or with an empty label or value, carry no
    /// data and are skipped.
    fn labeled_rows(&self, table: ElementRef<'_>) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        for row in table.select(&self.data_row) {
            let Some(label_cell) = row.select(&self.label_cell).next() else {
                continue;
            };
            let Some(value_cell) = row.select(&self.value_cell).next() else {
                continue;
            };
            let label = text_of(label_cell);
            let value = text_of(value_cell);
            if label.is_empty() || value.is_empty() {
                continue;
            }
            rows.push((label, value));
        }
        rows
    }

    /// Fills the packaging map from the pricing table's offer rows
    ///
    /// The pricing table is optional structure; offer rows whose price does
    /// not parse are skipped. The non-empty invariant is enforced later by
    /// `seal_packaging`.
    fn extract_packaging(&self, document: &Html, record: &mut ProductRecord) {
        let Some(pricing) = document.select(&self.price_table).next() else {
            debug!("no pricing table on {}", record.url);
            return;
        };

        for row in pricing.select(&self.offer_row) {
            // The size cell also nests the price markup, so only its own
            // text nodes name the pack size.
            let Some(size) = row.select(&self.size_cell).next().map(own_text) else {
                continue;
            };
            if size.is_empty() {
                continue;
            }
            let Some(price_text) = row.select(&self.price_value).next().map(text_of) else {
                debug!("offer row without a price value on {}", record.url);
                continue;
            };
            match price_text.parse::<f64>() {
                Ok(price) => {
                    record.packaging.insert(size, price);
                }
                Err(e) => {
                    warn!(
                        "skipping offer {size:?} on {}: unparsable price {price_text:?}: {e}",
                        record.url
                    );
                }
            }
        }
    }
}

/// Concatenated, trimmed text content of an element
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of an element's direct text-node children only
fn own_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}
