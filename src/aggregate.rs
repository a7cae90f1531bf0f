// src/aggregate.rs

use crate::fetcher::{FetchError, ListingFetcher};
use crate::query;
use serde_json::Value;

/// Fetches the complete listing set live from upstream and returns it
/// unfiltered. The snapshot file is never consulted on this path; freshness is
/// traded for latency. The sort pass runs with no key, which keeps the
/// upstream order.
pub fn aggregate(fetcher: &ListingFetcher) -> Result<Vec<Value>, FetchError> {
    let listings = fetcher.fetch_all()?;

    query::sort_listings(listings, None)
        .map_err(|e| FetchError::UnexpectedShape(e.to_string()))
}
