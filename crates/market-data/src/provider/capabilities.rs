//! Provider capability descriptions.

/// Describes the capabilities of a market data provider.
///
/// The resolver chain consults this before wiring up optional strategies
/// (e.g., free-text search).
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Whether the provider supports daily historical series.
    pub supports_historical: bool,

    /// Whether the provider supports symbol/asset search.
    pub supports_search: bool,

    /// Whether the provider returns descriptive profiles.
    pub supports_profile: bool,
}

impl Default for ProviderCapabilities {
    fn default() -> Self {
        Self {
            supports_historical: true,
            supports_search: false,
            supports_profile: true,
        }
    }
}
