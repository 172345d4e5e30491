//! A complete, internally consistent set of exchange rates.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// How long a snapshot is served before it is considered stale.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Longest TTL a cache accepts; longer values are clamped to it.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Reasons a decoded rate table cannot become a snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSnapshot {
    #[error("rate table is empty")]
    Empty,

    #[error("rate for {code} must be positive and finite, got {rate}")]
    InvalidRate { code: String, rate: f64 },
}

/// Rates for every known currency, expressed relative to `base`.
///
/// A snapshot is immutable once built. The cache swaps whole snapshots and
/// never edits one in place, so a reader holding a snapshot always sees a
/// fully populated table.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    base: String,
    date: String,
    rates: BTreeMap<String, f64>,
    fetched_at: DateTime<Utc>,
    valid_until: DateTime<Utc>,
}

impl RateSnapshot {
    /// Builds a snapshot fetched now and valid for [`DEFAULT_TTL`].
    ///
    /// Every rate must be a positive finite number and the table must not be
    /// empty; the conversion ratio divides by these values.
    pub fn new(
        base: impl Into<String>,
        date: impl Into<String>,
        rates: impl IntoIterator<Item = (String, f64)>,
    ) -> Result<Self, InvalidSnapshot> {
        let rates: BTreeMap<String, f64> = rates.into_iter().collect();
        if rates.is_empty() {
            return Err(InvalidSnapshot::Empty);
        }
        if let Some((code, rate)) = rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(InvalidSnapshot::InvalidRate {
                code: code.clone(),
                rate: *rate,
            });
        }

        let fetched_at = Utc::now();
        Ok(Self {
            base: base.into(),
            date: date.into(),
            rates,
            fetched_at,
            valid_until: window_end(fetched_at, DEFAULT_TTL),
        })
    }

    /// Re-stamps the validity window to `ttl` after the fetch time.
    pub fn expiring_after(mut self, ttl: Duration) -> Self {
        self.valid_until = window_end(self.fetched_at, ttl);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    /// Returns the rate for `code`, matched exactly.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

// `valid_until` must lie after `fetched_at`: a zero TTL becomes one second,
// and a window past the representable range saturates.
fn window_end(fetched_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    let ttl = ttl.max(Duration::from_secs(1));
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| fetched_at.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
