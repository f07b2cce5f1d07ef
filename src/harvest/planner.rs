//! Pagination planning
//!
//! Decides how many listing pages a harvest must visit: the catalog's total
//! page count when uncapped, otherwise just enough pages to satisfy the cap,
//! never more pages than exist.

use crate::extract::ListingExtractor;
use crate::fetch::fetch_page;
use crate::{PlanningError, Result};
use reqwest::Client;
use url::Url;

/// Items per page on the catalog's default listing tier
const SMALL_PAGE_SIZE: u32 = 50;

/// Items per page on the catalog's large listing tier
const LARGE_PAGE_SIZE: u32 = 100;

/// Infers the catalog's page size from the root URL
///
/// The catalog exposes two listing tiers selected by a "100" marker in the
/// URL; everything else uses the 50-item tier.
pub fn page_size_for(root: &Url) -> u32 {
    if root.as_str().contains("100") {
        LARGE_PAGE_SIZE
    } else {
        SMALL_PAGE_SIZE
    }
}

/// Computes the last page index to visit
///
/// With no cap this is the catalog's total page count. With a cap it is
/// `ceil(cap / page_size)`, clamped to the total so no nonexistent page is
/// ever requested.
pub fn last_page(total: u32, cap: Option<usize>, page_size: u32) -> u32 {
    match cap {
        None => total,
        Some(cap) => {
            let needed = (cap as u64).div_ceil(u64::from(page_size));
            needed.min(u64::from(total)) as u32
        }
    }
}

/// Fetches the first listing page and derives the page range
///
/// # Errors
///
/// `PlanningError` when the first page cannot be fetched or its navigation
/// widget cannot be read. Planning failures are fatal for the whole harvest.
pub async fn plan(
    client: &Client,
    extractor: &ListingExtractor,
    root: &Url,
    cap: Option<usize>,
) -> Result<u32> {
    let html = fetch_page(client, root).await.map_err(PlanningError::Fetch)?;
    let total = extractor
        .total_pages(&html)
        .map_err(PlanningError::Navigation)?;
    tracing::debug!("catalog reports {total} listing pages");
    Ok(last_page(total, cap, page_size_for(root)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_tiers() {
        let small = Url::parse("https://example.com/catalogue").unwrap();
        let large = Url::parse("https://example.com/catalogue?show=100").unwrap();
        assert_eq!(page_size_for(&small), 50);
        assert_eq!(page_size_for(&large), 100);
    }

    #[test]
    fn test_uncapped_visits_every_page() {
        assert_eq!(last_page(12, None, 50), 12);
    }

    #[test]
    fn test_cap_rounds_up_to_page_boundary() {
        // ceil(430 / 50) = 9, below the 12 available pages.
        assert_eq!(last_page(12, Some(430), 50), 9);
    }

    #[test]
    fn test_cap_exactly_on_page_boundary() {
        assert_eq!(last_page(12, Some(100), 50), 2);
    }

    #[test]
    fn test_cap_smaller_than_one_page() {
        assert_eq!(last_page(12, Some(1), 50), 1);
    }

    #[test]
    fn test_cap_larger_than_catalog_is_clamped() {
        assert_eq!(last_page(12, Some(100_000), 50), 12);
    }

    #[test]
    fn test_large_tier_needs_fewer_pages() {
        assert_eq!(last_page(12, Some(430), 100), 5);
    }
}
