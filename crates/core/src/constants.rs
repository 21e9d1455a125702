/// Calendar days fetched on each side of a fixing date
pub const DEFAULT_WINDOW_DAYS: u32 = 4;

/// Most underlyings a single report accepts
pub const MAX_INSTRUMENTS: usize = 10;

/// Largest weight an instrument may carry
pub const MAX_WEIGHT: u32 = 10;

/// Decimal places used when displaying spots
pub const DISPLAY_DECIMAL_PRECISION: u32 = 6;

/// Fixing date input format (DD/MM/YYYY)
pub const FIXING_DATE_FORMAT: &str = "%d/%m/%Y";

/// Rendered in place of an absent value
pub const MISSING_VALUE: &str = "N/A";

/// Default bound on in-flight provider requests in concurrent mode
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Default first backoff delay for transient provider errors
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 250;

/// Default number of fixings the cache holds before it is flushed
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
