/// Classification for retry policy.
///
/// Used by the fixing fetcher to decide whether a failed provider call is
/// worth repeating before the fixing is recorded as absent.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No |
/// | `WithBackoff` | Yes, up to the configured attempt budget |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, empty range, or terminal failure.
    Never,

    /// Transient failure (rate limit, timeout). Retry after an exponentially
    /// growing delay.
    WithBackoff,
}
