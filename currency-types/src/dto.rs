//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ConversionResult, RateSnapshot};

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters of `GET /convert`.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Amount to convert, in units of `from`
    #[param(example = 50.0)]
    pub value: f64,
    /// Currency code the amount is given in
    #[param(example = "USD")]
    pub from: String,
    /// Currency code to convert into
    #[param(example = "AUD")]
    pub to: String,
}

/// Response after a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    /// Converted amount, in units of `to`
    #[schema(example = 75.0)]
    pub value: f64,
    #[schema(example = "USD")]
    pub from: String,
    #[schema(example = "AUD")]
    pub to: String,
}

impl From<ConversionResult> for ConversionResponse {
    fn from(result: ConversionResult) -> Self {
        Self {
            value: result.converted_amount,
            from: result.from,
            to: result.to,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// The rate table currently served by the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatesResponse {
    /// Currency all rates are relative to
    #[schema(example = "USD")]
    pub base: String,
    /// Provider-reported date of the rates
    #[schema(example = "2024-05-01")]
    pub date: String,
    pub fetched_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    /// Currency code to rate
    #[schema(example = json!({"USD": 1.0, "AUD": 1.5}))]
    pub rates: BTreeMap<String, f64>,
}

impl From<&RateSnapshot> for RatesResponse {
    fn from(snapshot: &RateSnapshot) -> Self {
        Self {
            base: snapshot.base().to_string(),
            date: snapshot.date().to_string(),
            fetched_at: snapshot.fetched_at(),
            valid_until: snapshot.valid_until(),
            rates: snapshot.rates().clone(),
        }
    }
}
