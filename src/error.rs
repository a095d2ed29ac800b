//! Error types.
//!
//! The computation itself fails in only two ways: the calendar table has no
//! row for the requested date ([`Error::DateNotCovered`]), or a table row
//! carries text that is not a stem/branch pair ([`Error::InvalidSymbol`]).
//! The remaining variants come from input validation and table loading.

use thiserror::Error;

use crate::date::Date;

/// Errors raised by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The calendar table has no row for this date. Not retryable.
    #[error("date not covered by the calendar table: {0}")]
    DateNotCovered(Date),

    /// Text that should name a stem, branch or pillar does not.
    #[error("invalid sexagenary symbol: {0:?}")]
    InvalidSymbol(String),

    /// Birth input rejected before computation.
    #[error("invalid birth input: {0}")]
    InvalidInput(String),

    /// A table file has a malformed record.
    #[error("error parsing {source_name} data at {location}: {reason}")]
    RawData {
        source_name: &'static str,
        location: String,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Creates a `RawData` error.
    pub(crate) fn raw_data(
        source_name: &'static str,
        location: impl ToString,
        reason: impl ToString,
    ) -> Self {
        Self::RawData {
            source_name,
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// `Result` with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
