//! Spotfix Core - Fixing retrieval, aggregation and reporting.
//!
//! This crate computes the weighted spot of a structured product from its
//! underlyings. Provider access and symbol resolution live in the
//! `spotfix-market-data` crate; this crate is a pure function of the
//! instrument list and policy plus those provider calls.

pub mod client;
pub mod constants;
pub mod errors;
pub mod fixings;
pub mod report;
pub mod settings;
pub mod spot;

#[cfg(test)]
pub(crate) mod testing;

pub use client::MarketDataClient;
pub use fixings::{FixingFetcher, PriceFixing};
pub use report::{
    InstrumentReference, InstrumentRequest, ReportRow, ReportWarning, SpotReport, SpotResult,
    SpotService, SpotServiceTrait,
};
pub use settings::{FetchMode, RetrySettings, SpotSettings};
pub use spot::SpotPolicy;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
