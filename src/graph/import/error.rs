use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ImportError {
    MissingFile(String),
    /// A record (counted from 1, header excluded) that could not be read or added.
    InvalidRecord { record: usize, reason: String },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile(file) => write!(f, "Missing file: {}", file),
            Self::InvalidRecord { record, reason } => {
                write!(f, "Invalid edge record {}: {}", record, reason)
            }
        }
    }
}

impl Error for ImportError {}
