//! Price fixing retrieval.
//!
//! - [`date`] - Fixing date parsing (`DD/MM/YYYY`) and multi-line date input
//! - [`nearest`] - Nearest-bar selection in exchange-local time
//! - [`cache`] - Read-through (symbol, date) cache
//! - [`fetcher`] - Windowed provider requests with bounded retry
//! - [`model`] - The `PriceFixing` value

pub mod cache;
pub mod date;
pub mod fetcher;
pub mod model;
pub mod nearest;

pub use cache::FixingCache;
pub use date::{parse_fixing_date, split_date_lines};
pub use fetcher::{FixingFetcher, FixingRequest};
pub use model::PriceFixing;
pub use nearest::{select_nearest, select_nearest_close};
