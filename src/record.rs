//! Record types produced by a harvest
//!
//! All entities here are created fresh per harvest invocation and are
//! immutable once the run completes. Every field of [`ProductRecord`] except
//! `url` is independently optional: absent fields are skipped during
//! serialization rather than emitted as `null`, mirroring the catalog's habit
//! of omitting rows unpredictably.

use crate::HarvestError;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Label used for the fallback packaging entry when a product page lists no
/// priced tiers.
pub const SENTINEL_PACKAGING_LABEL: &str = "ne";

/// Structured data extracted from one product detail page
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    /// Catalog identifier ("Glentham Code" row)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,

    /// Product name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Detail page this record was extracted from
    pub url: String,

    /// CAS registry number
    #[serde(rename = "CAS", skip_serializing_if = "Option::is_none")]
    pub cas: Option<String>,

    /// Molecular formula with numeric runs wrapped in `<sub>` markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,

    /// Chemical properties, present only when at least one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    /// Pack-size label to price. Never empty: pages without priced tiers get
    /// the single sentinel entry `{"ne": 0.0}`.
    pub packaging: BTreeMap<String, f64>,

    /// Ordered synonyms. `None` means the synonyms node was absent, which is
    /// distinct from an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,

    /// Link to the material safety data sheet PDF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_msds: Option<String>,

    /// Link to the product image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl ProductRecord {
    /// Creates an empty record for the given detail page URL
    pub fn new(url: &Url) -> Self {
        Self {
            pid: None,
            name: None,
            url: url.to_string(),
            cas: None,
            structure: None,
            properties: None,
            packaging: BTreeMap::new(),
            synonyms: None,
            pdf_msds: None,
            img: None,
        }
    }

    /// Returns the property bag, creating it on first use
    ///
    /// Keeps `properties` absent from the serialized record unless at least
    /// one property row was actually present on the page.
    pub fn properties_mut(&mut self) -> &mut Properties {
        self.properties.get_or_insert_with(Properties::default)
    }

    /// Enforces the non-empty packaging invariant
    pub fn seal_packaging(&mut self) {
        if self.packaging.is_empty() {
            self.packaging
                .insert(SENTINEL_PACKAGING_LABEL.to_string(), 0.0);
        }
    }
}

/// Chemical property bag with fixed, independently optional keys
#[derive(Debug, Clone, Default, Serialize)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub melting_point: Option<String>,
}

/// One page of the paginated catalog and the detail links found on it
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// 1-based page number within the catalog
    pub number: u32,

    /// Detail page URLs in the order they appear on the page
    pub product_urls: Vec<Url>,
}

/// Input to a harvest run
#[derive(Debug, Clone)]
pub struct HarvestRequest {
    /// Catalog root URL (the unpaginated listing)
    pub root: Url,

    /// Optional maximum number of records to return
    pub cap: Option<usize>,
}

impl HarvestRequest {
    /// Builds a request, rejecting a cap of zero
    ///
    /// Validation happens here so that an invalid cap is refused before any
    /// network work starts.
    pub fn new(root: Url, cap: Option<usize>) -> crate::Result<Self> {
        if cap == Some(0) {
            return Err(HarvestError::InvalidCap);
        }
        Ok(Self { root, cap })
    }
}

/// Ordered outcome of a harvest run
///
/// Records appear in discovery order: page order first, in-page order second,
/// truncated to the requested cap.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestResult {
    pub records: Vec<ProductRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_url() -> Url {
        Url::parse("https://example.com/products/gx1234").unwrap()
    }

    #[test]
    fn test_new_record_has_only_url() {
        let record = ProductRecord::new(&detail_url());
        assert_eq!(record.url, "https://example.com/products/gx1234");
        assert!(record.pid.is_none());
        assert!(record.properties.is_none());
        assert!(record.packaging.is_empty());
    }

    #[test]
    fn test_seal_packaging_inserts_sentinel() {
        let mut record = ProductRecord::new(&detail_url());
        record.seal_packaging();
        assert_eq!(record.packaging.len(), 1);
        assert_eq!(record.packaging.get("ne"), Some(&0.0));
    }

    #[test]
    fn test_seal_packaging_keeps_existing_tiers() {
        let mut record = ProductRecord::new(&detail_url());
        record.packaging.insert("100g".to_string(), 24.5);
        record.seal_packaging();
        assert_eq!(record.packaging.len(), 1);
        assert_eq!(record.packaging.get("100g"), Some(&24.5));
        assert!(!record.packaging.contains_key("ne"));
    }

    #[test]
    fn test_properties_created_on_first_use() {
        let mut record = ProductRecord::new(&detail_url());
        record.properties_mut().purity = Some(">98%".to_string());
        let props = record.properties.as_ref().unwrap();
        assert_eq!(props.purity.as_deref(), Some(">98%"));
        assert!(props.weight.is_none());
    }

    #[test]
    fn test_absent_fields_are_absent_not_null() {
        let mut record = ProductRecord::new(&detail_url());
        record.seal_packaging();
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("url"));
        assert!(object.contains_key("packaging"));
        assert!(!object.contains_key("pid"));
        assert!(!object.contains_key("CAS"));
        assert!(!object.contains_key("properties"));
        assert!(!object.contains_key("synonyms"));
        assert!(!object.contains_key("pdf_msds"));
        assert!(!object.contains_key("img"));
    }

    #[test]
    fn test_cas_serializes_under_uppercase_key() {
        let mut record = ProductRecord::new(&detail_url());
        record.cas = Some("64-17-5".to_string());
        record.seal_packaging();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["CAS"], "64-17-5");
        assert!(json.get("cas").is_none());
    }

    #[test]
    fn test_empty_synonyms_distinct_from_absent() {
        let mut record = ProductRecord::new(&detail_url());
        record.synonyms = Some(Vec::new());
        record.seal_packaging();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["synonyms"], serde_json::json!([]));
    }

    #[test]
    fn test_request_rejects_zero_cap() {
        let root = Url::parse("https://example.com/catalogue").unwrap();
        let result = HarvestRequest::new(root, Some(0));
        assert!(matches!(result, Err(HarvestError::InvalidCap)));
    }

    #[test]
    fn test_request_accepts_unbounded_and_positive_caps() {
        let root = Url::parse("https://example.com/catalogue").unwrap();
        assert!(HarvestRequest::new(root.clone(), None).is_ok());
        assert!(HarvestRequest::new(root, Some(430)).is_ok());
    }
}
