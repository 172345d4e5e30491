//! Error types for the currency conversion service.

use crate::domain::CurrencySide;

/// Rate provider errors (fetching a snapshot from the remote service).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("failed to fetch exchange rates: {0}")]
    Network(String),

    #[error("non-200 response ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse exchange rate response: {0}")]
    Decode(String),

    #[error("API error: {message}")]
    Api { message: String },
}

/// Conversion errors (reading rates and computing a converted amount).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Exchange rates unavailable: {0}")]
    RateUnavailable(#[from] FetchError),

    #[error("Invalid {side} currency: {code}")]
    UnknownCurrency { side: CurrencySide, code: String },

    #[error("From and target currencies must be different")]
    SameCurrency,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Message returned to clients when rates cannot be fetched. Provider
/// details stay in the server logs.
pub const RATES_UNAVAILABLE: &str = "Exchange rates unavailable";

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::RateUnavailable(_) => {
                AppError::ServiceUnavailable(RATES_UNAVAILABLE.into())
            }
            e @ ConversionError::UnknownCurrency { .. } => AppError::BadRequest(e.to_string()),
            e @ ConversionError::SameCurrency => AppError::BadRequest(e.to_string()),
        }
    }
}
