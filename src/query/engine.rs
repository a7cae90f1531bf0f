// src/query/engine.rs

use crate::query::QueryError;
use serde_json::Value;

/// Optional predicates, AND-combined. An unset field always passes.
#[derive(Debug, Default)]
pub struct Filters {
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    DateNew,
    DateOld,
}

impl SortKey {
    /// Unrecognized values are not an error; they mean "leave the order
    /// alone", same as no sort parameter at all.
    pub fn parse(raw: &str) -> Option<SortKey> {
        match raw {
            "price_asc" => Some(SortKey::PriceAsc),
            "price_desc" => Some(SortKey::PriceDesc),
            "date_new" => Some(SortKey::DateNew),
            "date_old" => Some(SortKey::DateOld),
            _ => None,
        }
    }
}

/// Filters, optionally projects down to the `City` value, then sorts. Price
/// and Bedrooms are coerced for every listing on the filter path, so a
/// malformed value surfaces even when no numeric filter was requested.
pub fn query(
    listings: Vec<Value>,
    filters: &Filters,
    sort: Option<SortKey>,
    city_only: bool,
) -> Result<Vec<Value>, QueryError> {
    let mut matched = Vec::new();

    for item in listings {
        let price = price_of(&item)?;
        let bedrooms = bedrooms_of(&item)?;

        if !matches(filters, &item, price, bedrooms) {
            continue;
        }

        if city_only {
            matched.push(item.get("City").cloned().unwrap_or(Value::Null));
        } else {
            matched.push(item);
        }
    }

    sort_listings(matched, sort)
}

fn matches(filters: &Filters, item: &Value, price: f64, bedrooms: i64) -> bool {
    if let Some(city) = &filters.city {
        if item.get("City").and_then(Value::as_str) != Some(city.as_str()) {
            return false;
        }
    }
    if let Some(min) = filters.min_price {
        if price < min {
            return false;
        }
    }
    if let Some(max) = filters.max_price {
        if price > max {
            return false;
        }
    }
    // Strictly more bedrooms than asked for, not "at least".
    if let Some(wanted) = filters.bedrooms {
        if bedrooms <= wanted {
            return false;
        }
    }

    true
}

/// Stable sort under the requested key; `None` keeps the input order. A
/// descending key reverses the comparison direction, never the tie order.
pub fn sort_listings(
    mut listings: Vec<Value>,
    key: Option<SortKey>,
) -> Result<Vec<Value>, QueryError> {
    let Some(key) = key else {
        return Ok(listings);
    };

    match key {
        SortKey::PriceAsc => sort_by_price(listings, false),
        SortKey::PriceDesc => sort_by_price(listings, true),
        SortKey::DateNew => {
            listings.sort_by(|a, b| created_date_of(b).cmp(created_date_of(a)));
            Ok(listings)
        }
        SortKey::DateOld => {
            listings.sort_by(|a, b| created_date_of(a).cmp(created_date_of(b)));
            Ok(listings)
        }
    }
}

fn sort_by_price(listings: Vec<Value>, descending: bool) -> Result<Vec<Value>, QueryError> {
    let mut keyed = Vec::with_capacity(listings.len());
    for item in listings {
        let price = price_of(&item)?;
        keyed.push((price, item));
    }

    if descending {
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    } else {
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

// Coerce-or-default table for the essential fields:
//
//   field           absent   number        numeric string   anything else
//   Price           0.0      as f64        parsed f64       BadPrice
//   Bedrooms        0        as i64*       parsed i64       BadBedrooms
//   Created Date    ""       ""            the string       ""
//
// * floats truncate toward zero, matching integer coercion elsewhere in the
//   pipeline.

fn price_of(item: &Value) -> Result<f64, QueryError> {
    match item.get("Price") {
        None => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| QueryError::BadPrice(n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| QueryError::BadPrice(format!("\"{s}\""))),
        Some(other) => Err(QueryError::BadPrice(other.to_string())),
    }
}

fn bedrooms_of(item: &Value) -> Result<i64, QueryError> {
    match item.get("Bedrooms") {
        None => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| QueryError::BadBedrooms(n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| QueryError::BadBedrooms(format!("\"{s}\""))),
        Some(other) => Err(QueryError::BadBedrooms(other.to_string())),
    }
}

fn created_date_of(item: &Value) -> &str {
    item.get("Created Date")
        .and_then(Value::as_str)
        .unwrap_or("")
}
