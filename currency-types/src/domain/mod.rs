//! Domain models for the currency conversion service.

pub mod conversion;
pub mod snapshot;

pub use conversion::{ConversionRequest, ConversionResult, CurrencySide};
pub use snapshot::{DEFAULT_TTL, InvalidSnapshot, MAX_TTL, RateSnapshot};
