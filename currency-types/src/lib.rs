//! # Currency Types
//!
//! Domain types and port traits for the currency conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (RateSnapshot, ConversionRequest, ConversionResult)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Provider, conversion and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ConversionRequest, ConversionResult, CurrencySide, DEFAULT_TTL, InvalidSnapshot, MAX_TTL,
    RateSnapshot,
};
pub use dto::*;
pub use error::{AppError, ConversionError, FetchError};
pub use ports::RateProvider;
