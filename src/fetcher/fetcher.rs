// fetcher.rs
use crate::fetcher::models::{ApiEnvelope, ListingPage};
use crate::fetcher::FetchError;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = "listing-feed/0.1";

/// Upstream pages are fixed at 100 listings; the cursor advances by this much
/// after every successful page.
pub const PAGE_SIZE: u64 = 100;

/// Hard ceiling on the fetch loop. A healthy upstream reports `remaining == 0`
/// long before this; one that never does would otherwise keep us looping.
pub const MAX_PAGES: usize = 1000;

/// Client for the upstream listings API. Owns its transport client; nothing
/// here is a process-wide singleton.
#[derive(Clone)]
pub struct ListingFetcher {
    client: Client,
    base_url: String,
}

impl ListingFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        // The timeout bounds each page request independently; the loop makes
        // one call per page.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetches every listing the upstream has, one cursor-advanced page at a
    /// time, stopping when the upstream reports nothing remaining. The first
    /// failed page aborts the whole fetch; no partial result escapes.
    pub fn fetch_all(&self) -> Result<Vec<Value>, FetchError> {
        let mut listings = Vec::new();
        let mut cursor: u64 = 0;
        let mut pages = 0;

        loop {
            eprintln!("📄 Fetching listings page at cursor {cursor}");

            let page = self.fetch_page(cursor)?;
            pages += 1;

            listings.extend(page.results);

            if page.remaining == 0 {
                eprintln!(
                    "🏁 Upstream exhausted: {} listings over {pages} page(s)",
                    listings.len()
                );
                break;
            }

            if pages >= MAX_PAGES {
                return Err(FetchError::TooManyPages(pages));
            }

            cursor += PAGE_SIZE;
        }

        Ok(listings)
    }

    fn fetch_page(&self, cursor: u64) -> Result<ListingPage, FetchError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("cursor", cursor)])
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        // A page missing `response.results` or `response.remaining` is as
        // fatal as one that is not JSON at all.
        let envelope: ApiEnvelope =
            serde_json::from_str(&text).map_err(|e| FetchError::JsonParse(e.to_string()))?;

        Ok(envelope.response)
    }
}
