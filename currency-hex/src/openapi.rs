//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use currency_types::dto::{ConversionResponse, ConvertQuery, RatesResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount between two currencies
#[utoipa::path(
    get,
    path = "/convert",
    tag = "conversion",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Converted amount", body = ConversionResponse),
        (status = 400, description = "Missing or invalid parameters, unknown currency, or same currency",
            example = json!({"error": "Invalid target currency: XYZ", "code": 400})),
        (status = 503, description = "Exchange rates could not be refreshed")
    )
)]
async fn convert() {}

/// Current exchange rate table
#[utoipa::path(
    get,
    path = "/rates",
    tag = "conversion",
    responses(
        (status = 200, description = "Rates currently served by the cache", body = RatesResponse),
        (status = 503, description = "Exchange rates could not be refreshed")
    )
)]
async fn rates() {}

/// OpenAPI documentation for the Currency API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Conversion Service API",
        version = "1.0.0",
        description = "Converts amounts between currencies using exchange rates cached from a remote provider for one hour.",
        license(name = "MIT"),
    ),
    paths(health, convert, rates),
    components(schemas(ConversionResponse, RatesResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "conversion", description = "Currency conversion and rate inspection"),
    )
)]
pub struct ApiDoc;
