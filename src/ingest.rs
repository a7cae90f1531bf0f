// src/ingest.rs

use crate::fetcher::models::AggregateEnvelope;
use crate::fetcher::FetchError;
use crate::normalize::{self, NormalizeError, FACILITY_FIELDS, INFO_FIELDS};
use crate::snapshot::{self, SnapshotError};
use reqwest::blocking::Client;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One ingestion run: which service instance to drain, where the snapshot
/// goes, and which fields (if any) get the boolean-to-0/1 conversion pass.
#[derive(Debug)]
pub struct IngestOptions {
    pub host: String,
    pub output: PathBuf,
    pub boolean_fields: Vec<String>,
}

#[derive(Debug)]
pub struct IngestReport {
    pub count: usize,
}

#[derive(Debug)]
pub enum IngestError {
    Fetch(FetchError),
    Normalize(NormalizeError),
    Snapshot(SnapshotError),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Fetch(e) => write!(f, "Fetch failed: {e}"),
            IngestError::Normalize(e) => write!(f, "Normalization failed: {e}"),
            IngestError::Snapshot(e) => write!(f, "Snapshot write failed: {e}"),
        }
    }
}

impl Error for IngestError {}

impl From<FetchError> for IngestError {
    fn from(e: FetchError) -> Self {
        IngestError::Fetch(e)
    }
}

impl From<NormalizeError> for IngestError {
    fn from(e: NormalizeError) -> Self {
        IngestError::Normalize(e)
    }
}

impl From<SnapshotError> for IngestError {
    fn from(e: SnapshotError) -> Self {
        IngestError::Snapshot(e)
    }
}

/// Drains the aggregation endpoint of the given service instance. The target
/// host is a parameter; there is exactly one copy of this pipeline.
pub fn fetch_from_service(host: &str) -> Result<Vec<Value>, FetchError> {
    // The aggregation endpoint does a full upstream crawl before answering,
    // so this request gets a generous timeout.
    let client = Client::builder()
        .timeout(Duration::from_secs(360))
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let url = format!("http://{host}/get_all_data");
    let resp = client
        .get(&url)
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

    let envelope: AggregateEnvelope =
        serde_json::from_str(&text).map_err(|e| FetchError::JsonParse(e.to_string()))?;

    Ok(envelope.data)
}

/// Fetch, regroup into the nested schema, optionally convert boolean fields,
/// then write the snapshot. The write is the final step, so an interrupted
/// run leaves the previous snapshot untouched.
pub fn run(opts: &IngestOptions) -> Result<IngestReport, IngestError> {
    let mut listings = fetch_from_service(&opts.host)?;

    // Boolean conversion runs before grouping so fields destined for a
    // sub-object can still be named at the top level.
    if !opts.boolean_fields.is_empty() {
        let fields: Vec<&str> = opts.boolean_fields.iter().map(String::as_str).collect();
        normalize::convert_boolean_fields(&mut listings, &fields)?;
    }

    normalize::group_fields(&mut listings, &FACILITY_FIELDS, "facilities");
    normalize::group_fields(&mut listings, &INFO_FIELDS, "info");

    snapshot::save_snapshot(&listings, &opts.output)?;

    Ok(IngestReport {
        count: listings.len(),
    })
}
