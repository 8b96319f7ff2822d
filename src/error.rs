use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No price tier covers every night of the requested stay.
    #[error("No price available for {subject} from {from} to {to} for {guests} guest(s)")]
    NoPriceAvailable {
        subject: String,
        from: NaiveDate,
        to: NaiveDate,
        guests: u32,
    },

    /// The exchange rate is missing or unusable. Callers usually recover by
    /// showing the unconverted amount.
    #[error("Currency conversion unavailable: {0}")]
    ConversionUnavailable(String),
}

pub type Result<T> = std::result::Result<T, PricingError>;
