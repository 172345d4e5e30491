//! Exchange rate cache with refresh-on-access.
//!
//! The cache holds at most one [`RateSnapshot`]. Every reader clones an
//! `Arc` to the current snapshot, and a refresh swaps in a brand new one, so
//! readers never observe a partially written table.
//!
//! Refreshes are single-flight: callers that find the cache expired queue on
//! `refresh`, and whoever gets there first performs the fetch. The rest
//! re-check the expiry once they hold the lock and return without fetching.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{info, warn};

use currency_types::{DEFAULT_TTL, FetchError, MAX_TTL, RateProvider, RateSnapshot};

struct CacheState {
    snapshot: Option<Arc<RateSnapshot>>,
    expires_at: Instant,
}

/// Process-wide store of the latest exchange rates.
pub struct RateCache {
    state: RwLock<CacheState>,
    refresh: Mutex<()>,
    ttl: Duration,
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RateCache {
    /// Creates an empty cache that is already expired, so the first
    /// [`ensure_fresh`](Self::ensure_fresh) always fetches.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates an empty cache whose snapshots live for `ttl`, capped at
    /// [`MAX_TTL`].
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState {
                snapshot: None,
                expires_at: Instant::now(),
            }),
            refresh: Mutex::new(()),
            ttl: ttl.min(MAX_TTL),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True once the TTL of the last successful fetch has elapsed, and
    /// always true before the first one.
    pub fn is_expired(&self) -> bool {
        self.state.read().expires_at <= Instant::now()
    }

    /// Refreshes the cache through `provider` if it has expired.
    ///
    /// On failure the previous snapshot (if any) and its expiry are left
    /// untouched, so the next call tries again.
    pub async fn ensure_fresh<P>(&self, provider: &P) -> Result<(), FetchError>
    where
        P: RateProvider + ?Sized,
    {
        if !self.is_expired() {
            return Ok(());
        }

        let _guard = self.refresh.lock().await;
        if !self.is_expired() {
            return Ok(());
        }

        info!(provider = provider.name(), "Updating exchange rate cache");
        let snapshot = match provider.fetch().await {
            Ok(snapshot) => Arc::new(snapshot.expiring_after(self.ttl)),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Exchange rate refresh failed");
                return Err(e);
            }
        };

        info!(
            base = snapshot.base(),
            currencies = snapshot.len(),
            valid_until = %snapshot.valid_until(),
            "Successfully fetched exchange rates"
        );

        let mut state = self.state.write();
        state.snapshot = Some(snapshot);
        state.expires_at = Instant::now() + self.ttl;
        Ok(())
    }

    /// Returns the rate for `code` from the current snapshot.
    pub fn lookup(&self, code: &str) -> Option<f64> {
        self.state.read().snapshot.as_ref()?.rate(code)
    }

    /// Returns the current snapshot, stale or not.
    pub fn snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.state.read().snapshot.clone()
    }
}
