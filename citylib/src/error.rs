//! Error types for citylib

use thiserror::Error;

/// Errors that can occur while building a dataset or running a query
#[derive(Error, Debug)]
pub enum CityError {
    /// A ratio was requested with a zero denominator
    #[error("division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// Sum of block areas does not fit in a finite float
    #[error("arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// A record breaks a field constraint
    #[error("invalid record '{code}': {reason}")]
    InvalidRecord { code: String, reason: &'static str },

    /// Two houses share the same code
    #[error("duplicate house code: {0}")]
    DuplicateHouse(String),

    /// Two blocks share the same code
    #[error("duplicate block code: {0}")]
    DuplicateBlock(String),

    /// A house is linked to more than one block
    #[error("house '{0}' is linked to more than one block")]
    DuplicateLink(String),

    /// Project type string not recognised
    #[error("unknown project type: {0}")]
    UnknownProjectType(String),

    /// Percent base string not recognised
    #[error("unknown percent base: {0}")]
    UnknownPercentBase(String),

    /// Failed to parse a dataset or options file
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CityError {
    fn from(err: toml::de::Error) -> Self {
        CityError::Config(err.to_string())
    }
}
