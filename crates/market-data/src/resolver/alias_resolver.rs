//! Alias resolver - exact lookup of well-known company names.

use std::sync::Arc;

use async_trait::async_trait;

use super::alias_table::AliasTable;
use super::traits::{ResolutionSource, ResolvedSymbol, Resolver};

/// Resolves names found in the alias table. Never touches the network.
pub struct AliasResolver {
    table: Arc<AliasTable>,
}

impl AliasResolver {
    pub fn new(table: Arc<AliasTable>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Resolver for AliasResolver {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Alias
    }

    async fn try_resolve(&self, query: &str) -> Option<ResolvedSymbol> {
        self.table.lookup(query).map(|symbol| ResolvedSymbol {
            symbol,
            source: ResolutionSource::Alias,
        })
    }
}
