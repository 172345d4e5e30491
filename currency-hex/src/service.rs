//! Conversion Application Service
//!
//! Orchestrates the rate cache and the provider port.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use currency_types::{
    ConversionError, ConversionRequest, ConversionResult, CurrencySide, FetchError, RateProvider,
    RateSnapshot,
};

use crate::RateCache;

/// Application service for currency conversion.
///
/// Generic over `P: RateProvider` - the adapter is injected at compile time.
/// The cache is owned here rather than living in a global, so tests can pair
/// a fresh cache with a fake provider.
pub struct ConversionService<P: RateProvider> {
    provider: Arc<P>,
    cache: Arc<RateCache>,
}

impl<P: RateProvider + 'static> ConversionService<P> {
    /// Creates a service with an empty cache using the default TTL.
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, RateCache::new())
    }

    /// Creates a service around an existing cache.
    pub fn with_cache(provider: P, cache: RateCache) -> Self {
        Self {
            provider: Arc::new(provider),
            cache: Arc::new(cache),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// Populates the cache for the first time.
    ///
    /// Called once at boot; callers must treat an error as fatal.
    pub async fn prime(&self) -> Result<(), FetchError> {
        self.cache.ensure_fresh(self.provider.as_ref()).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `req.amount` from `req.from` into `req.to`.
    ///
    /// Both rates are relative to the provider's base currency, so their
    /// ratio is the cross rate. The result is not rounded.
    pub async fn convert(
        &self,
        req: ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        self.cache.ensure_fresh(self.provider.as_ref()).await?;

        // Read both rates from one snapshot so a concurrent refresh cannot
        // pair rates from different tables.
        let snapshot = self.cache.snapshot();
        let rate_of = |code: &str, side: CurrencySide| {
            snapshot
                .as_deref()
                .and_then(|s| s.rate(code))
                .ok_or_else(|| ConversionError::UnknownCurrency {
                    side,
                    code: code.to_string(),
                })
        };

        let from_rate = rate_of(&req.from, CurrencySide::From)?;
        let to_rate = rate_of(&req.to, CurrencySide::To)?;

        // Equal rates are treated as the same currency, even for distinct codes.
        if from_rate == to_rate {
            return Err(ConversionError::SameCurrency);
        }

        let converted_amount = req.amount * (to_rate / from_rate);

        tracing::info!(
            from = %req.from,
            to = %req.to,
            original_value = req.amount,
            converted_value = converted_amount,
            "Conversion result"
        );

        Ok(ConversionResult {
            converted_amount,
            from: req.from,
            to: req.to,
        })
    }

    /// Returns the current rate table after making sure it is fresh.
    ///
    /// `None` only if the cache has never been populated.
    pub async fn rates(&self) -> Result<Option<Arc<RateSnapshot>>, ConversionError> {
        self.cache.ensure_fresh(self.provider.as_ref()).await?;
        Ok(self.cache.snapshot())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Background Refresh
    // ─────────────────────────────────────────────────────────────────────────────

    /// Spawns a task that calls `ensure_fresh` every `period`.
    ///
    /// Refresh-on-access keeps working alongside it; the task only shortens
    /// the window in which a request pays for the fetch. Failures are logged
    /// and retried on the next tick.
    pub fn spawn_background_refresh(&self, period: Duration) -> JoinHandle<()> {
        let provider = self.provider.clone();
        let cache = self.cache.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = cache.ensure_fresh(provider.as_ref()).await {
                    tracing::warn!(error = %e, "Background rate refresh failed");
                }
            }
        })
    }
}
