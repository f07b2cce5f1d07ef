//! Harvest orchestration
//!
//! Drives the full pipeline: plan the page range, fan listing pages out
//! under the concurrency bound, flatten and truncate the discovered URL
//! sequence, fan detail pages out, and return the ordered record set.
//!
//! Failure policy (uniform across both fan-out phases): a fetch or
//! extraction failure on a single page is logged and skipped, and every
//! surviving item keeps its discovery position. Only planning failures
//! abort the harvest.

use crate::config::HarvestConfig;
use crate::extract::{DetailExtractor, ListingExtractor};
use crate::fetch::fetch_page;
use crate::harvest::planner;
use crate::harvest::pool::{default_degree, map_bounded};
use crate::record::{HarvestRequest, HarvestResult, ListingPage, ProductRecord};
use crate::{PageError, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// URL of the catalog's Nth listing page
fn listing_page_url(root: &Url, page: u32) -> Url {
    let mut url = root.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    url
}

/// Runs a complete harvest
///
/// The request's cap was already validated at construction, so no network
/// work happens for an invalid cap. Records come back in discovery order:
/// page order first, in-page order second, truncated to the cap.
pub async fn harvest(
    client: &Client,
    request: &HarvestRequest,
    config: &HarvestConfig,
) -> Result<HarvestResult> {
    let listing = Arc::new(ListingExtractor::new()?);
    let detail = Arc::new(DetailExtractor::new(config.include_media)?);
    let degree = if config.concurrency == 0 {
        default_degree()
    } else {
        config.concurrency
    };

    let last = planner::plan(client, &listing, &request.root, request.cap).await?;
    info!("visiting {last} listing pages with concurrency {degree}");

    let page_urls: Vec<(u32, Url)> = (1..=last)
        .map(|number| (number, listing_page_url(&request.root, number)))
        .collect();

    let listing_client = client.clone();
    let listing_extractor = Arc::clone(&listing);
    let pages = map_bounded(page_urls, degree, move |(number, url): (u32, Url)| {
        let client = listing_client.clone();
        let extractor = Arc::clone(&listing_extractor);
        async move {
            let html = fetch_page(&client, &url).await?;
            let product_urls = extractor.product_links(&html, &url)?;
            Ok::<_, PageError>(ListingPage {
                number,
                product_urls,
            })
        }
    })
    .await;

    // Flatten in page order; failed pages leave a logged gap.
    let mut detail_urls: Vec<Url> = Vec::new();
    for (index, page) in pages.into_iter().enumerate() {
        match page {
            Ok(page) => {
                debug!(
                    "listing page {}: {} product links",
                    page.number,
                    page.product_urls.len()
                );
                detail_urls.extend(page.product_urls);
            }
            Err(e) => warn!("skipping listing page {}: {e}", index + 1),
        }
    }

    if let Some(cap) = request.cap {
        detail_urls.truncate(cap);
    }
    info!("harvesting {} product pages", detail_urls.len());

    let detail_client = client.clone();
    let detail_extractor = Arc::clone(&detail);
    let extracted = map_bounded(detail_urls, degree, move |url: Url| {
        let client = detail_client.clone();
        let extractor = Arc::clone(&detail_extractor);
        async move {
            let html = fetch_page(&client, &url).await?;
            Ok::<ProductRecord, PageError>(extractor.extract(&html, &url)?)
        }
    })
    .await;

    let mut records = Vec::with_capacity(extracted.len());
    let mut skipped = 0usize;
    for (index, result) in extracted.into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!("skipping product {}: {e}", index + 1);
            }
        }
    }
    if skipped > 0 {
        info!("harvest finished with {skipped} skipped products");
    }

    Ok(HarvestResult { records })
}
