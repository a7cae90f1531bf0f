mod engine;
mod query_error;

pub use engine::{query, sort_listings, Filters, SortKey};
pub use query_error::QueryError;
