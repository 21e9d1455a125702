use serde::{Deserialize, Serialize};

/// Asset profile data from market data providers
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssetProfile {
    /// Provider that supplied this profile (e.g., "YAHOO")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Descriptive name as reported by the provider (no symbol fallback)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Quote type (e.g., "EQUITY", "ETF")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_type: Option<String>,

    /// Trading currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Exchange name or code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl AssetProfile {
    /// Create a new empty asset profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile with basic info
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Set the quote type
    pub fn quote_type(mut self, quote_type: impl Into<String>) -> Self {
        self.quote_type = Some(quote_type.into());
        self
    }

    /// Set the currency
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Whether the provider returned a non-trivial descriptive name
    /// (more than two characters once trimmed).
    pub fn has_display_name(&self) -> bool {
        self.name
            .as_deref()
            .map(|n| n.trim().chars().count() > 2)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_profile_builder() {
        let profile = AssetProfile::with_name("Apple Inc.")
            .quote_type("EQUITY")
            .currency("USD");

        assert_eq!(profile.name, Some("Apple Inc.".to_string()));
        assert_eq!(profile.quote_type, Some("EQUITY".to_string()));
        assert_eq!(profile.currency, Some("USD".to_string()));
    }

    #[test]
    fn test_display_name_threshold() {
        assert!(AssetProfile::with_name("Apple Inc.").has_display_name());
        assert!(AssetProfile::with_name("BNP").has_display_name());
        assert!(!AssetProfile::with_name("AB").has_display_name());
        assert!(!AssetProfile::with_name("  X  ").has_display_name());
        assert!(!AssetProfile::new().has_display_name());
    }

    #[test]
    fn test_asset_profile_serialization() {
        let profile = AssetProfile {
            name: Some("Test Company".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("Test Company"));
        // Optional None fields should not be serialized
        assert!(!json.contains("currency"));
    }
}
