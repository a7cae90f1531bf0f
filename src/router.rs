use crate::aggregate;
use crate::config::AppContext;
use crate::errors::ServerError;
use crate::query::{self, Filters, SortKey};
use crate::responses::{json_error_body, json_response, ResultResp};
use crate::snapshot;
use astra::Request;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Instant;

pub fn handle(req: Request, ctx: &AppContext) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/data") => data_route(&req, ctx),
        ("GET", "/get_all_data") => all_data_route(ctx),
        _ => Err(ServerError::NotFound),
    }
}

/// Snapshot-backed query endpoint: filter, optional city projection, optional
/// sort. Parameter type errors are the caller's fault (400); snapshot trouble
/// is reported in-band as `{"error": ...}` so the service keeps serving.
fn data_route(req: &Request, ctx: &AppContext) -> ResultResp {
    let params = parse_query(req);

    let filters = Filters {
        city: params.get("city").cloned(),
        min_price: float_param(&params, "min_price")?,
        max_price: float_param(&params, "max_price")?,
        bedrooms: int_param(&params, "bedrooms")?,
    };
    let sort = params.get("sort").and_then(|raw| SortKey::parse(raw));
    let city_only = bool_param(&params, "return_city_only")?;

    let listings = match snapshot::load_snapshot(&ctx.snapshot_path) {
        Ok(listings) => listings,
        Err(err) => return json_error_body(&err.user_message()),
    };

    match query::query(listings, &filters, sort, city_only) {
        Ok(result) => json_response(&Value::Array(result)),
        Err(err) => json_error_body(&err.to_string()),
    }
}

/// Live dump endpoint: re-fetches the whole upstream set, no filters, no
/// snapshot involved. An upstream failure faults this request only.
fn all_data_route(ctx: &AppContext) -> ResultResp {
    let start = Instant::now();

    let listings =
        aggregate::aggregate(&ctx.fetcher).map_err(|e| ServerError::Upstream(e.to_string()))?;

    eprintln!(
        "✅ get_all_data returned {} listings in {:.2?}",
        listings.len(),
        start.elapsed()
    );

    json_response(&json!({ "data": listings }))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(q) = req.uri().query() {
        for (k, v) in url::form_urlencoded::parse(q.as_bytes()) {
            map.insert(k.into_owned(), v.into_owned());
        }
    }

    map
}

fn float_param(params: &HashMap<String, String>, name: &str) -> Result<Option<f64>, ServerError> {
    match params.get(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("{name} must be a number"))),
    }
}

fn int_param(params: &HashMap<String, String>, name: &str) -> Result<Option<i64>, ServerError> {
    match params.get(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("{name} must be an integer"))),
    }
}

fn bool_param(params: &HashMap<String, String>, name: &str) -> Result<bool, ServerError> {
    match params.get(name).map(String::as_str) {
        None => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(_) => Err(ServerError::BadRequest(format!("{name} must be a boolean"))),
    }
}
