use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Status { code: u16, body: String },
    JsonParse(String),
    UnexpectedShape(String),
    TooManyPages(usize),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::Status { code, body } => write!(f, "Upstream HTTP {code}: {body}"),
            FetchError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            FetchError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
            FetchError::TooManyPages(pages) => {
                write!(f, "Upstream never reported completion after {pages} pages")
            }
        }
    }
}

impl Error for FetchError {}
