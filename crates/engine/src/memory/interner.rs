use std::collections::HashMap;

use crate::error::EngineError;
use crate::record::Domain;
use crate::traits::SymbolTable;

/// Bidirectional symbol table. Ids are dense and assigned in order of first
/// appearance, starting at zero.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    ids: HashMap<String, Domain>,
    symbols: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `symbol`, interning it if it has not been seen.
    ///
    /// Fails once every non-negative `Domain` value is taken.
    pub fn intern(&mut self, symbol: &str) -> Result<Domain, EngineError> {
        if let Some(&id) = self.ids.get(symbol) {
            return Ok(id);
        }
        let id = next_id(self.symbols.len())?;
        self.symbols.push(symbol.to_string());
        self.ids.insert(symbol.to_string(), id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolTable for Interner {
    fn resolve(&self, id: Domain) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.symbols.get(i))
            .map(String::as_str)
    }

    fn lookup_existing(&self, symbol: &str) -> Option<Domain> {
        self.ids.get(symbol).copied()
    }
}

fn next_id(len: usize) -> Result<Domain, EngineError> {
    Domain::try_from(len)
        .map_err(|_| EngineError::Backend(format!("symbol table full at {} entries", len)))
}
