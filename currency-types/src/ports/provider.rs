//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate sources.
//! Implementations can be HTTP clients, fixed tables, test fakes, etc.

use std::sync::Arc;

use crate::{FetchError, RateSnapshot};

/// Port trait for exchange rate providers.
///
/// A provider is configured with everything it needs to reach its source
/// (base URL, credential) when it is built. `fetch` is one-shot: no retries,
/// and it never touches shared state.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetches a complete snapshot of rates relative to the provider's base.
    async fn fetch(&self) -> Result<RateSnapshot, FetchError>;
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
        (**self).fetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneRate;

    #[async_trait::async_trait]
    impl RateProvider for OneRate {
        fn name(&self) -> &str {
            "one-rate"
        }

        async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
            RateSnapshot::new("USD", "2024-05-01", [("USD".to_string(), 1.0)])
                .map_err(|e| FetchError::Decode(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_shared_provider_delegates() {
        let shared: Arc<dyn RateProvider> = Arc::new(OneRate);
        assert_eq!(shared.name(), "one-rate");

        let snapshot = shared.fetch().await.unwrap();
        assert_eq!(snapshot.rate("USD"), Some(1.0));
    }
}
