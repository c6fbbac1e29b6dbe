//! The schema-validated search filter.
//!
//! [`SearchFilter`] is what the protocol layer lowers a raw filter
//! onto once attribute descriptions have been parsed against the
//! schema. It mirrors the raw filter's shape; the matching rule of an
//! extensible match is carried as the raw identifier, resolution being
//! a validation step rather than a substitution.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeDescription;

/// A search filter whose attribute descriptions have been validated
/// against the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchFilter {
    /// Matches when every subordinate filter matches; empty is the
    /// absolute-true filter.
    And(Vec<SearchFilter>),

    /// Matches when any subordinate filter matches; empty is the
    /// absolute-false filter.
    Or(Vec<SearchFilter>),

    /// Matches when the subordinate filter does not match.
    Not(Box<SearchFilter>),

    /// Matches values equal to the assertion value.
    Equality {
        /// The attribute the assertion applies to.
        attribute: AttributeDescription,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values ordered at or above the assertion value.
    GreaterOrEqual {
        /// The attribute the assertion applies to.
        attribute: AttributeDescription,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values ordered at or below the assertion value.
    LessOrEqual {
        /// The attribute the assertion applies to.
        attribute: AttributeDescription,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values approximately equal to the assertion value.
    ApproximateMatch {
        /// The attribute the assertion applies to.
        attribute: AttributeDescription,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values containing the given substrings in order.
    Substring {
        /// The attribute the assertion applies to.
        attribute: AttributeDescription,
        /// The fragment values must start with, if any.
        sub_initial: Option<Vec<u8>>,
        /// The fragments values must contain, in order.
        sub_any: Vec<Vec<u8>>,
        /// The fragment values must end with, if any.
        sub_final: Option<Vec<u8>>,
    },

    /// Matches entries that have any value for the attribute.
    Present {
        /// The attribute whose presence is asserted.
        attribute: AttributeDescription,
    },

    /// Matches using an explicitly named matching rule and/or across
    /// distinguished-name components.
    ExtensibleMatch {
        /// The attribute the assertion applies to, if named.
        attribute: Option<AttributeDescription>,
        /// The matching rule identifier, if named.
        matching_rule_id: Option<String>,
        /// Whether to also match against DN components.
        dn_attributes: bool,
        /// The assertion value octets.
        value: Vec<u8>,
    },
}
