//! # Currency Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the rate provider adapter
//! - Create the conversion service and populate its cache
//! - Start the HTTP server

mod config;

use anyhow::Context;
use opentelemetry::global;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use currency_hex::{ConversionService, RateCache, inbound::HttpServer};
use exchange_rates::FxRatesApiProvider;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to create OTLP span exporter")?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("currency-service"), provider))
}

/// Installs the global meter provider read by the router's HTTP metrics layer.
fn init_meter() -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .build()
        .context("failed to create OTLP metric exporter")?;

    let provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .build();

    global::set_meter_provider(provider.clone());
    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing and metrics
    let (otel_tracer, tracer_provider) = init_tracer()?;
    let meter_provider = init_meter()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,currency_app=debug,currency_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting currency server on port {}", config.port);
    tracing::info!("Using rate provider: {}", config.fx_api_url);

    let provider = FxRatesApiProvider::new(&config.fx_api_url, &config.fx_api_token);
    let service = ConversionService::with_cache(provider, RateCache::with_ttl(config.cache_ttl));

    // The first fetch must succeed before any traffic is accepted
    let server = HttpServer::bootstrap(service)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error fetching exchange rates"))
        .context("initial exchange rate fetch failed")?;

    let refresher = config.background_refresh.then(|| {
        let period = config.cache_ttl / 10;
        tracing::info!(?period, "Background rate refresh enabled");
        server.service().spawn_background_refresh(period)
    });

    let addr = format!("0.0.0.0:{}", config.port);
    server.run(&addr).await?;

    if let Some(handle) = refresher {
        handle.abort();
    }

    // Ensure traces and metrics are flushed before exit
    let _ = tracer_provider.shutdown();
    let _ = meter_provider.shutdown();
    Ok(())
}
