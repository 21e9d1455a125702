//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Provider capability descriptions
//! - The Yahoo Finance provider
//!
//! # Provider Contract
//!
//! Providers only ever see already-resolved symbols. Turning a free-form
//! company name into a symbol happens in the resolver module, and deciding
//! what a failed call means for a fixing happens in the core crate.

mod capabilities;
mod traits;

pub mod yahoo;

// Re-exports
pub use capabilities::ProviderCapabilities;
pub use traits::MarketDataProvider;
