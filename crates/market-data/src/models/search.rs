//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "AAPL", "BNP.PA")
    pub symbol: String,

    /// Short display name (e.g., "Apple Inc")
    pub name: String,

    /// Exchange name or MIC (e.g., "NASDAQ", "XNAS")
    pub exchange: String,

    /// Asset type (e.g., "EQUITY", "ETF", "MUTUALFUND")
    pub asset_type: String,

    /// Currency for the symbol (e.g., "USD", "CAD")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Relevance score from provider (higher = better match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    /// Create a new search result with required fields.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        asset_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            asset_type: asset_type.into(),
            currency: None,
            score: None,
        }
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Whether the hit is an instrument with a daily close series usable as
    /// an underlying (equities, ETFs, indices, funds).
    pub fn is_underlying_candidate(&self) -> bool {
        matches!(
            self.asset_type.to_uppercase().as_str(),
            "EQUITY" | "ETF" | "INDEX" | "MUTUALFUND"
        ) && !self.symbol.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underlying_candidate_types() {
        assert!(SearchResult::new("AAPL", "Apple Inc.", "NMS", "EQUITY").is_underlying_candidate());
        assert!(SearchResult::new("^FCHI", "CAC 40", "PAR", "index").is_underlying_candidate());
        assert!(!SearchResult::new("AAPL240621C00150000", "AAPL Call", "OPR", "OPTION")
            .is_underlying_candidate());
        assert!(!SearchResult::new(" ", "Blank", "NMS", "EQUITY").is_underlying_candidate());
    }

    #[test]
    fn test_builder_sets_optional_fields() {
        let result = SearchResult::new("BNP.PA", "BNP Paribas", "PAR", "EQUITY")
            .with_currency("EUR")
            .with_score(12.5);
        assert_eq!(result.currency.as_deref(), Some("EUR"));
        assert_eq!(result.score, Some(12.5));
    }
}
