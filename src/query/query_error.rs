use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum QueryError {
    BadPrice(String),
    BadBedrooms(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::BadPrice(value) => write!(f, "Price value {value} is not numeric"),
            QueryError::BadBedrooms(value) => {
                write!(f, "Bedrooms value {value} is not an integer")
            }
        }
    }
}

impl Error for QueryError {}
