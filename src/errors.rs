// errors.rs
use std::fmt;

/// Errors originating from the routing layer (unknown paths, malformed query
/// parameters) or from the upstream listings API during a live aggregation.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Upstream(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Upstream(msg) => write!(f, "Upstream Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
