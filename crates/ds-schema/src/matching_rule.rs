//! Matching rule definitions.
//!
//! A matching rule names a comparison procedure for assertion values
//! (RFC 4517 §4). The core schema ships the standard equality,
//! ordering and substring rules; deployments may register more.

use serde::{Deserialize, Serialize};

/// A matching rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingRule {
    oid: String,
    name: String,
    syntax_oid: String,
}

impl MatchingRule {
    /// Creates a new matching rule definition.
    #[must_use]
    pub fn new(
        oid: impl Into<String>,
        name: impl Into<String>,
        syntax_oid: impl Into<String>,
    ) -> Self {
        Self {
            oid: oid.into(),
            name: name.into(),
            syntax_oid: syntax_oid.into(),
        }
    }

    /// Returns the numeric OID of this rule.
    #[must_use]
    pub fn oid(&self) -> &str {
        &self.oid
    }

    /// Returns the descriptive name of this rule.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the OID of the assertion syntax this rule compares.
    #[must_use]
    pub fn syntax_oid(&self) -> &str {
        &self.syntax_oid
    }
}

/// The RFC 4517 matching rules the core schema ships, as
/// (rule OID, name, assertion syntax OID).
const CORE_RULES: &[(&str, &str, &str)] = &[
    ("2.5.13.0", "objectIdentifierMatch", "1.3.6.1.4.1.1466.115.121.1.38"),
    ("2.5.13.1", "distinguishedNameMatch", "1.3.6.1.4.1.1466.115.121.1.12"),
    ("2.5.13.2", "caseIgnoreMatch", "1.3.6.1.4.1.1466.115.121.1.15"),
    ("2.5.13.3", "caseIgnoreOrderingMatch", "1.3.6.1.4.1.1466.115.121.1.15"),
    ("2.5.13.4", "caseIgnoreSubstringsMatch", "1.3.6.1.4.1.1466.115.121.1.58"),
    ("2.5.13.5", "caseExactMatch", "1.3.6.1.4.1.1466.115.121.1.15"),
    ("2.5.13.6", "caseExactOrderingMatch", "1.3.6.1.4.1.1466.115.121.1.15"),
    ("2.5.13.7", "caseExactSubstringsMatch", "1.3.6.1.4.1.1466.115.121.1.58"),
    ("2.5.13.8", "numericStringMatch", "1.3.6.1.4.1.1466.115.121.1.36"),
    ("2.5.13.10", "numericStringSubstringsMatch", "1.3.6.1.4.1.1466.115.121.1.58"),
    ("2.5.13.13", "booleanMatch", "1.3.6.1.4.1.1466.115.121.1.7"),
    ("2.5.13.14", "integerMatch", "1.3.6.1.4.1.1466.115.121.1.27"),
    ("2.5.13.15", "integerOrderingMatch", "1.3.6.1.4.1.1466.115.121.1.27"),
    ("2.5.13.17", "octetStringMatch", "1.3.6.1.4.1.1466.115.121.1.40"),
    ("2.5.13.18", "octetStringOrderingMatch", "1.3.6.1.4.1.1466.115.121.1.40"),
    ("2.5.13.20", "telephoneNumberMatch", "1.3.6.1.4.1.1466.115.121.1.50"),
    ("2.5.13.27", "generalizedTimeMatch", "1.3.6.1.4.1.1466.115.121.1.24"),
    ("2.5.13.28", "generalizedTimeOrderingMatch", "1.3.6.1.4.1.1466.115.121.1.24"),
    ("1.3.6.1.4.1.1466.109.114.1", "caseExactIA5Match", "1.3.6.1.4.1.1466.115.121.1.26"),
    ("1.3.6.1.4.1.1466.109.114.2", "caseIgnoreIA5Match", "1.3.6.1.4.1.1466.115.121.1.26"),
    ("1.3.6.1.4.1.1466.109.114.3", "caseIgnoreIA5SubstringsMatch", "1.3.6.1.4.1.1466.115.121.1.58"),
];

/// Yields the matching rules of the core schema.
pub(crate) fn core_rules() -> impl Iterator<Item = MatchingRule> {
    CORE_RULES
        .iter()
        .map(|&(oid, name, syntax)| MatchingRule::new(oid, name, syntax))
}
