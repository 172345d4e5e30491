//! Exchange Rate Providers
//!
//! Adapters implementing the [`RateProvider`] port:
//! - [`FxRatesApiProvider`] fetches the latest table from an FXRatesAPI-style
//!   HTTP endpoint (`GET <url>?api=<key>`).
//! - [`StaticRateProvider`] serves a fixed in-memory table, for development
//!   and testing. It can be switched "unavailable" at runtime and counts how
//!   often it was asked for rates.
//!
//! # Example
//! ```
//! use currency_types::RateProvider;
//! use exchange_rates::StaticRateProvider;
//!
//! let provider = StaticRateProvider::new("USD", [("USD", 1.0), ("AUD", 1.5)]);
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let snapshot = runtime.block_on(provider.fetch()).unwrap();
//! assert_eq!(snapshot.rate("AUD"), Some(1.5));
//! ```

mod http;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use currency_types::{FetchError, RateProvider, RateSnapshot};

pub use http::FxRatesApiProvider;

// ─────────────────────────────────────────────────────────────────────────────
// Static Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Provider backed by a fixed, editable rate table.
pub struct StaticRateProvider {
    base: String,
    date: String,
    rates: Mutex<BTreeMap<String, f64>>,
    available: AtomicBool,
    latency: Duration,
    fetches: AtomicUsize,
}

impl StaticRateProvider {
    /// Creates a provider serving `rates` relative to `base`.
    pub fn new<C: Into<String>>(
        base: impl Into<String>,
        rates: impl IntoIterator<Item = (C, f64)>,
    ) -> Self {
        Self {
            base: base.into(),
            date: "static".to_string(),
            rates: Mutex::new(rates.into_iter().map(|(c, r)| (c.into(), r)).collect()),
            available: AtomicBool::new(true),
            latency: Duration::ZERO,
            fetches: AtomicUsize::new(0),
        }
    }

    /// A small USD-based table with a handful of major currencies.
    pub fn demo() -> Self {
        Self::new(
            "USD",
            [
                ("USD", 1.0),
                ("EUR", 0.92),
                ("GBP", 0.79),
                ("INR", 83.12),
                ("AUD", 1.5),
                ("JPY", 155.4),
            ],
        )
    }

    /// Delays every fetch by `latency`, simulating a slow round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes subsequent fetches fail with a network error (`false`) or
    /// succeed again (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Sets or replaces the rate for `code` in subsequent fetches.
    pub fn set_rate(&self, code: impl Into<String>, rate: f64) {
        self.rates.lock().insert(code.into(), rate);
    }

    /// Number of times `fetch` has been called, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
        let attempt = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(attempt, "Serving static exchange rates");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !self.available.load(Ordering::SeqCst) {
            return Err(FetchError::Network(
                "static provider marked unavailable".into(),
            ));
        }

        let rates = self.rates.lock().clone();
        RateSnapshot::new(self.base.clone(), self.date.clone(), rates)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
