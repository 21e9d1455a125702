//! JSON-driven alias table mapping company names to provider symbols.
//!
//! The bundled `aliases.json` is loaded at compile time via `include_str!`
//! and indexed once via `lazy_static`. Deployments can point at their own
//! file with [`AliasTable::from_path`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::traits::normalize_query;

// ── JSON schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AliasCatalog {
    aliases: Vec<AliasEntry>,
}

/// One listed instrument and the names it is commonly entered under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AliasEntry {
    pub symbol: String,
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl AliasEntry {
    pub fn new(symbol: &str, names: &[&str]) -> Self {
        Self {
            symbol: symbol.to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
            exchange: None,
            currency: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AliasTableError {
    #[error("Failed to read alias table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid alias table: {0}")]
    Parse(#[from] serde_json::Error),
}

// ── Table with pre-built index ───────────────────────────────────────────────

/// Read-only lookup from normalised names to provider symbols.
///
/// Keys are stored trimmed and uppercased so lookups are case-insensitive.
/// When two entries claim the same name the first one wins.
#[derive(Debug, Default)]
pub struct AliasTable {
    by_name: HashMap<String, Arc<str>>,
}

lazy_static! {
    static ref EMBEDDED: Arc<AliasTable> = {
        let json = include_str!("aliases.json");
        Arc::new(AliasTable::from_json(json).expect("aliases.json must be valid"))
    };
}

impl AliasTable {
    /// Build a table from in-memory entries.
    pub fn new(entries: &[AliasEntry]) -> Self {
        let mut by_name = HashMap::new();
        for entry in entries {
            let symbol: Arc<str> = Arc::from(entry.symbol.trim().to_uppercase());
            if symbol.is_empty() {
                continue;
            }
            for name in &entry.names {
                let key = normalize_query(name);
                if key.is_empty() {
                    continue;
                }
                match by_name.get(&key) {
                    Some(existing) if *existing != symbol => {
                        warn!(
                            "Alias '{}' already maps to {}, ignoring {}",
                            key, existing, symbol
                        );
                    }
                    Some(_) => {}
                    None => {
                        by_name.insert(key, symbol.clone());
                    }
                }
            }
        }
        Self { by_name }
    }

    /// The table bundled with the crate.
    pub fn embedded() -> Arc<AliasTable> {
        EMBEDDED.clone()
    }

    /// Parse a table from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, AliasTableError> {
        let catalog: AliasCatalog = serde_json::from_str(json)?;
        Ok(Self::new(&catalog.aliases))
    }

    /// Load a table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AliasTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AliasTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up a name. The input is normalised before lookup.
    pub fn lookup(&self, name: &str) -> Option<Arc<str>> {
        self.by_name.get(&normalize_query(name)).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
