//! Aggregation engine.
//!
//! - [`policy`] - Spot policies (mean, max, min) and their labels
//! - [`aggregation`] - Per-instrument spot and weighted global spot

pub mod aggregation;
pub mod policy;

pub use aggregation::{compute_global_spot, compute_spot, effective_weight, round_for_display};
pub use policy::SpotPolicy;
