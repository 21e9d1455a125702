//! Spot report assembly.
//!
//! - [`model`] - Instrument requests, report rows and warnings
//! - [`service`] - The `SpotService` facade running a full calculation
//!
//! # Flow
//!
//! ```text
//! InstrumentRequest ─▶ SymbolResolver ─▶ InstrumentReference
//!                                              │
//!                                              ▼
//!                     FixingFetcher ─▶ PriceFixing per date
//!                                              │
//!                                              ▼
//!                 compute_spot ─▶ SpotResult ─▶ ReportRow
//!                                              │
//!                                              ▼
//!                 compute_global_spot ─▶ SpotReport
//! ```

pub mod model;
pub mod service;


pub use model::{
    display_spot, InstrumentReference, InstrumentRequest, ReportRow, ReportWarning, SpotReport,
    SpotResult,
};
pub use service::{SpotService, SpotServiceTrait};
