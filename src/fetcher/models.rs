use serde::Deserialize;
use serde_json::Value;

// page response
//  └── response
//       ├── results    (raw listing objects, up to one page's worth)
//       └── remaining  (count of listings still unfetched upstream)

/// Top-level shape of one upstream page response.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub response: ListingPage,
}

/// One page of raw listings plus the upstream's count of what is left.
/// `remaining` is the authoritative stop signal for the fetch loop.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub results: Vec<Value>,
    pub remaining: u64,
}

/// Shape of this service's own `/get_all_data` payload, consumed by the
/// ingestion job.
#[derive(Debug, Deserialize)]
pub struct AggregateEnvelope {
    pub data: Vec<Value>,
}
