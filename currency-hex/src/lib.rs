//! # Currency Hex
//!
//! Rate cache, application service and HTTP adapter for the currency
//! conversion service.
//!
//! ## Architecture
//!
//! - `cache` - TTL cache over the latest rate snapshot (refresh-on-access)
//! - `service` - Application service (conversion arithmetic over the cache)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `P: RateProvider`, allowing
//! different rate sources to be injected.

pub mod cache;
pub mod inbound;
mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use cache::RateCache;
pub use currency_types::MAX_TTL;
pub use openapi::ApiDoc;
pub use service::ConversionService;
