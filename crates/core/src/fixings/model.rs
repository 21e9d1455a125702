use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MISSING_VALUE;

/// Observed close for one requested date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFixing {
    /// The date exactly as entered.
    pub target_date: String,
    /// `None` when the date did not parse or the provider had nothing.
    pub observed_price: Option<Decimal>,
}

impl PriceFixing {
    pub fn observed(target_date: impl Into<String>, price: Decimal) -> Self {
        Self {
            target_date: target_date.into(),
            observed_price: Some(price),
        }
    }

    pub fn absent(target_date: impl Into<String>) -> Self {
        Self {
            target_date: target_date.into(),
            observed_price: None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.observed_price.is_none()
    }

    /// The price as text, or `N/A` when absent.
    pub fn display_value(&self) -> String {
        match self.observed_price {
            Some(price) => price.normalize().to_string(),
            None => MISSING_VALUE.to_string(),
        }
    }
}
