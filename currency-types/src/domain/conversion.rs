//! Per-call conversion inputs and outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a conversion a currency code was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencySide {
    From,
    To,
}

impl fmt::Display for CurrencySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencySide::From => write!(f, "original"),
            CurrencySide::To => write!(f, "target"),
        }
    }
}

/// A request to convert `amount` units of `from` into `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            amount,
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Outcome of a successful conversion. The amount is not rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
    pub from: String,
    pub to: String,
}
