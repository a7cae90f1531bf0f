// src/config.rs

use crate::fetcher::{FetchError, ListingFetcher};
use std::env;
use std::path::PathBuf;

/// Upstream listings endpoint the production deployment aggregates.
/// Overridable through `LISTING_FEED_UPSTREAM`.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://login.streetwise24.com/api/1.1/obj/property?agency=1694504430615x780232707323405000";

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_SNAPSHOT: &str = "output.json";

/// Server settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub upstream_url: String,
    pub snapshot_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env::var("LISTING_FEED_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            upstream_url: env::var("LISTING_FEED_UPSTREAM")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            snapshot_path: env::var("LISTING_FEED_SNAPSHOT")
                .unwrap_or_else(|_| DEFAULT_SNAPSHOT.to_string())
                .into(),
        }
    }
}

/// Everything a request handler needs, shared read-only across the server's
/// worker threads.
#[derive(Clone)]
pub struct AppContext {
    pub fetcher: ListingFetcher,
    pub snapshot_path: PathBuf,
}

impl AppContext {
    pub fn new(config: &ServerConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: ListingFetcher::new(config.upstream_url.clone())?,
            snapshot_path: config.snapshot_path.clone(),
        })
    }
}
