//! ConversionService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use exchange_rates::StaticRateProvider;

    use currency_types::{ConversionError, ConversionRequest, CurrencySide, FetchError};

    use crate::{ConversionService, RateCache};

    fn service_with(rates: &[(&str, f64)]) -> ConversionService<StaticRateProvider> {
        ConversionService::new(StaticRateProvider::new("USD", rates.iter().copied()))
    }

    #[tokio::test]
    async fn test_convert_base_to_quote() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);

        let result = service
            .convert(ConversionRequest::new(50.0, "USD", "AUD"))
            .await
            .unwrap();

        assert_eq!(result.converted_amount, 75.0);
        assert_eq!(result.from, "USD");
        assert_eq!(result.to, "AUD");
    }

    #[tokio::test]
    async fn test_convert_quote_to_base() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);

        let result = service
            .convert(ConversionRequest::new(50.0, "AUD", "USD"))
            .await
            .unwrap();

        assert!((result.converted_amount - 33.333_333_333).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_cross_rate_without_base() {
        let service = service_with(&[("USD", 1.0), ("EUR", 0.8), ("GBP", 0.5)]);

        let result = service
            .convert(ConversionRequest::new(10.0, "EUR", "GBP"))
            .await
            .unwrap();

        assert!((result.converted_amount - 6.25).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_amount_not_rounded() {
        let service = service_with(&[("USD", 1.0), ("JPY", 155.123)]);

        let result = service
            .convert(ConversionRequest::new(0.01, "USD", "JPY"))
            .await
            .unwrap();

        assert_eq!(result.converted_amount, 0.01 * (155.123 / 1.0));
    }

    #[tokio::test]
    async fn test_equal_rates_rejected_as_same_currency() {
        let service = service_with(&[("USD", 1.0), ("EUR", 1.0)]);

        let result = service
            .convert(ConversionRequest::new(10.0, "USD", "EUR"))
            .await;

        assert_eq!(result, Err(ConversionError::SameCurrency));
    }

    #[tokio::test]
    async fn test_same_code_rejected() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);

        let result = service
            .convert(ConversionRequest::new(10.0, "AUD", "AUD"))
            .await;

        assert_eq!(result, Err(ConversionError::SameCurrency));
    }

    #[tokio::test]
    async fn test_unknown_target_currency() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);

        let result = service
            .convert(ConversionRequest::new(10.0, "USD", "XYZ"))
            .await;

        assert_eq!(
            result,
            Err(ConversionError::UnknownCurrency {
                side: CurrencySide::To,
                code: "XYZ".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_source_currency_checked_first() {
        let service = service_with(&[("USD", 1.0)]);

        let result = service
            .convert(ConversionRequest::new(10.0, "ABC", "XYZ"))
            .await;

        assert!(matches!(
            result,
            Err(ConversionError::UnknownCurrency {
                side: CurrencySide::From,
                ref code,
            }) if code == "ABC"
        ));
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);

        let result = service
            .convert(ConversionRequest::new(10.0, "usd", "AUD"))
            .await;

        assert!(matches!(
            result,
            Err(ConversionError::UnknownCurrency { side: CurrencySide::From, .. })
        ));
    }

    #[tokio::test]
    async fn test_convert_refreshes_empty_cache() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);
        assert!(service.cache().snapshot().is_none());

        service
            .convert(ConversionRequest::new(1.0, "USD", "AUD"))
            .await
            .unwrap();
        service
            .convert(ConversionRequest::new(2.0, "AUD", "USD"))
            .await
            .unwrap();

        assert_eq!(service.provider().fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_rate_unavailable() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);
        service.provider().set_available(false);

        let result = service
            .convert(ConversionRequest::new(10.0, "USD", "AUD"))
            .await;

        assert!(matches!(
            result,
            Err(ConversionError::RateUnavailable(FetchError::Network(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_rates_kept_after_failed_refresh() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);
        service.prime().await.unwrap();

        service.provider().set_available(false);
        tokio::time::advance(Duration::from_secs(2 * 60 * 60)).await;

        let result = service
            .convert(ConversionRequest::new(10.0, "USD", "AUD"))
            .await;
        assert!(matches!(result, Err(ConversionError::RateUnavailable(_))));
        assert_eq!(service.cache().lookup("AUD"), Some(1.5));

        service.provider().set_available(true);
        let result = service
            .convert(ConversionRequest::new(10.0, "USD", "AUD"))
            .await
            .unwrap();
        assert_eq!(result.converted_amount, 15.0);
    }

    #[tokio::test]
    async fn test_prime_failure_reported() {
        let service = service_with(&[("USD", 1.0)]);
        service.provider().set_available(false);

        assert!(service.prime().await.is_err());
        assert!(service.cache().snapshot().is_none());
    }

    #[tokio::test]
    async fn test_rates_returns_current_table() {
        let service = service_with(&[("USD", 1.0), ("AUD", 1.5)]);

        let snapshot = service.rates().await.unwrap().unwrap();

        assert_eq!(snapshot.base(), "USD");
        assert_eq!(snapshot.rate("AUD"), Some(1.5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_refresh_fetches_after_expiry() {
        let provider = StaticRateProvider::new("USD", [("USD", 1.0), ("AUD", 1.5)]);
        let service = ConversionService::with_cache(
            provider,
            RateCache::with_ttl(Duration::from_secs(60)),
        );
        service.prime().await.unwrap();

        let handle = service.spawn_background_refresh(Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(65)).await;

        assert_eq!(service.provider().fetch_count(), 2);
        assert!(!service.cache().is_expired());
        handle.abort();
    }
}
