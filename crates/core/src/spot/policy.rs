use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the fixings of one instrument are combined into its spot.
///
/// Parsing is lenient: unknown labels fall back to [`SpotPolicy::Mean`]
/// instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SpotPolicy {
    /// Arithmetic mean of the observed fixings.
    #[default]
    Mean,
    /// Highest observed fixing.
    Max,
    /// Lowest observed fixing.
    Min,
}

impl SpotPolicy {
    pub const ALL: [SpotPolicy; 3] = [SpotPolicy::Mean, SpotPolicy::Max, SpotPolicy::Min];

    /// Stable identifier used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            SpotPolicy::Mean => "mean",
            SpotPolicy::Max => "max",
            SpotPolicy::Min => "min",
        }
    }

    /// Human-readable label shown next to the global spot.
    pub fn label(&self) -> &'static str {
        match self {
            SpotPolicy::Mean => "Moyenne simple",
            SpotPolicy::Max => "Cours le plus haut (max)",
            SpotPolicy::Min => "Cours le plus bas (min)",
        }
    }

    /// Parse an identifier or label; anything unrecognised is `Mean`.
    pub fn parse_lenient(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        match key.as_str() {
            "max" | "maximum" | "highest" | "cours le plus haut (max)" => SpotPolicy::Max,
            "min" | "minimum" | "lowest" | "cours le plus bas (min)" => SpotPolicy::Min,
            _ => SpotPolicy::Mean,
        }
    }
}

impl FromStr for SpotPolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SpotPolicy::parse_lenient(s))
    }
}

impl From<String> for SpotPolicy {
    fn from(raw: String) -> Self {
        SpotPolicy::parse_lenient(&raw)
    }
}

impl fmt::Display for SpotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
