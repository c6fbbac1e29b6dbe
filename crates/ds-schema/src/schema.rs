//! The schema registry.

use std::collections::HashMap;

use crate::error::{SchemaError, SchemaResult};
use crate::matching_rule::{core_rules, MatchingRule};

/// A registry of schema elements.
///
/// Matching rules are looked up by numeric OID or by name,
/// case-insensitively. The registry is immutable once built; lookups
/// take `&self`, so a schema handle may be shared freely across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<MatchingRule>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema pre-populated with the core matching rules.
    #[must_use]
    pub fn core() -> Self {
        let mut schema = Self::new();
        for rule in core_rules() {
            schema.register(rule);
        }
        schema
    }

    /// Registers a matching rule, indexing it by OID and by name.
    ///
    /// A later registration under an already-indexed identifier wins.
    pub fn register(&mut self, rule: MatchingRule) {
        let slot = self.rules.len();
        self.index.insert(rule.oid().to_ascii_lowercase(), slot);
        self.index.insert(rule.name().to_ascii_lowercase(), slot);
        self.rules.push(rule);
    }

    /// Resolves a matching rule by OID or name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownMatchingRule`] when no rule is
    /// registered under the identifier.
    pub fn matching_rule(&self, id: &str) -> SchemaResult<&MatchingRule> {
        self.index
            .get(&id.to_ascii_lowercase())
            .and_then(|&slot| self.rules.get(slot))
            .ok_or_else(|| SchemaError::unknown_rule(id))
    }

    /// Checks whether a matching rule is registered under the identifier.
    #[must_use]
    pub fn has_matching_rule(&self, id: &str) -> bool {
        self.index.contains_key(&id.to_ascii_lowercase())
    }

    /// Returns every registered matching rule, in registration order.
    #[must_use]
    pub fn matching_rules(&self) -> &[MatchingRule] {
        &self.rules
    }
}
