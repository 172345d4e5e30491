//! Client example demonstrating conversions against a running server.
//!
//! Run with: cargo run -p currency-app --example client_example
//!
//! The server is backed by the static demo rate table, so no provider
//! credentials are needed.

use currency_client::CurrencyClient;
use currency_hex::{ConversionService, inbound::HttpServer};
use exchange_rates::StaticRateProvider;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind to an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr}...");

    let service = ConversionService::new(StaticRateProvider::demo());
    let server = HttpServer::bootstrap(service).await?;
    let router = server.router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = CurrencyClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: conversions and error handling
    // ─────────────────────────────────────────────────────────────────────────

    println!("\n📋 Health: {}", client.health().await?);

    let rates = client.rates().await?;
    println!("\n💱 Rates relative to {}:", rates.base);
    for (code, rate) in &rates.rates {
        println!("   {code}: {rate}");
    }

    for (value, from, to) in [(50.0, "USD", "AUD"), (50.0, "AUD", "USD"), (1000.0, "INR", "EUR")] {
        let result = client.convert(value, from, to).await?;
        println!("\n✅ {value} {from} = {} {}", result.value, result.to);
    }

    match client.convert(10.0, "USD", "XYZ").await {
        Ok(_) => println!("\n❌ Unexpected success for unknown currency"),
        Err(e) => println!("\n✅ Unknown currency rejected: {e}"),
    }

    println!("\n🎉 Demo complete!");
    Ok(())
}
