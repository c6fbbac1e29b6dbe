//! The raw search-filter representation.
//!
//! [`Filter`] is the tree produced by [`decode`](crate::decode::decode)
//! before any schema validation has happened. Each variant carries
//! only the fields relevant to its kind. Assertion values are octet
//! strings: they are not guaranteed to be valid UTF-8, and printing
//! emits them byte for byte, re-escaping only the octets RFC 4515
//! reserves.
//!
//! Filters are immutable once built; transformations produce new
//! trees. Each node exclusively owns its subordinates.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::escape;

/// The kind of a search filter, named per the RFC 4511 `Filter` choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// AND of subordinate filters.
    And,
    /// OR of subordinate filters.
    Or,
    /// Negation of one subordinate filter.
    Not,
    /// Equality match.
    Equality,
    /// Greater-or-equal ordering match.
    GreaterOrEqual,
    /// Less-or-equal ordering match.
    LessOrEqual,
    /// Approximate match.
    ApproximateMatch,
    /// Substring match.
    Substring,
    /// Presence match.
    Present,
    /// Extensible match.
    ExtensibleMatch,
}

impl FilterKind {
    /// Returns the protocol name of this filter kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Equality => "equalityMatch",
            Self::GreaterOrEqual => "greaterOrEqual",
            Self::LessOrEqual => "lessOrEqual",
            Self::ApproximateMatch => "approxMatch",
            Self::Substring => "substrings",
            Self::Present => "present",
            Self::ExtensibleMatch => "extensibleMatch",
        }
    }
}

/// A raw search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// Matches when every subordinate filter matches; empty is the
    /// absolute-true filter.
    And(Vec<Filter>),

    /// Matches when any subordinate filter matches; empty is the
    /// absolute-false filter.
    Or(Vec<Filter>),

    /// Matches when the subordinate filter does not match.
    Not(Box<Filter>),

    /// Matches values equal to the assertion value.
    Equality {
        /// The attribute description the assertion applies to.
        attribute: String,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values ordered at or above the assertion value.
    GreaterOrEqual {
        /// The attribute description the assertion applies to.
        attribute: String,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values ordered at or below the assertion value.
    LessOrEqual {
        /// The attribute description the assertion applies to.
        attribute: String,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values approximately equal to the assertion value.
    ApproximateMatch {
        /// The attribute description the assertion applies to.
        attribute: String,
        /// The assertion value octets.
        value: Vec<u8>,
    },

    /// Matches values that contain the given fragments in order.
    Substring {
        /// The attribute description the assertion applies to.
        attribute: String,
        /// The fragment values must start with, if any.
        sub_initial: Option<Vec<u8>>,
        /// The fragments values must contain, in order.
        sub_any: Vec<Vec<u8>>,
        /// The fragment values must end with, if any.
        sub_final: Option<Vec<u8>>,
    },

    /// Matches entries that have any value for the attribute.
    Present {
        /// The attribute description whose presence is asserted.
        attribute: String,
    },

    /// Matches using an explicitly named matching rule and/or across
    /// distinguished-name components.
    ExtensibleMatch {
        /// The attribute description, if named.
        attribute: Option<String>,
        /// The matching rule identifier, if named.
        matching_rule_id: Option<String>,
        /// Whether to also match against DN components.
        dn_attributes: bool,
        /// The assertion value octets.
        value: Vec<u8>,
    },
}

impl Filter {
    /// Creates an AND filter over the given subordinates.
    #[must_use]
    pub fn and(components: Vec<Filter>) -> Self {
        Self::And(components)
    }

    /// Creates an OR filter over the given subordinates.
    #[must_use]
    pub fn or(components: Vec<Filter>) -> Self {
        Self::Or(components)
    }

    /// Creates a NOT filter around the given subordinate.
    #[must_use]
    pub fn not(component: Filter) -> Self {
        Self::Not(Box::new(component))
    }

    /// Creates an equality filter.
    #[must_use]
    pub fn equality(attribute: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::Equality {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates a greater-or-equal filter.
    #[must_use]
    pub fn greater_or_equal(attribute: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::GreaterOrEqual {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates a less-or-equal filter.
    #[must_use]
    pub fn less_or_equal(attribute: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::LessOrEqual {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an approximate-match filter.
    #[must_use]
    pub fn approximate(attribute: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::ApproximateMatch {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates a substring filter.
    #[must_use]
    pub fn substring(
        attribute: impl Into<String>,
        sub_initial: Option<Vec<u8>>,
        sub_any: Vec<Vec<u8>>,
        sub_final: Option<Vec<u8>>,
    ) -> Self {
        Self::Substring {
            attribute: attribute.into(),
            sub_initial,
            sub_any,
            sub_final,
        }
    }

    /// Creates a presence filter for the given attribute description.
    #[must_use]
    pub fn present(attribute: impl Into<String>) -> Self {
        Self::Present {
            attribute: attribute.into(),
        }
    }

    /// Creates an extensible-match filter.
    #[must_use]
    pub fn extensible(
        attribute: Option<String>,
        matching_rule_id: Option<String>,
        dn_attributes: bool,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self::ExtensibleMatch {
            attribute,
            matching_rule_id,
            dn_attributes,
            value: value.into(),
        }
    }

    /// Returns the `(objectclass=*)` presence filter.
    #[must_use]
    pub fn objectclass_present() -> &'static Filter {
        static OBJECTCLASS_PRESENT: OnceLock<Filter> = OnceLock::new();
        OBJECTCLASS_PRESENT.get_or_init(|| Filter::present("objectclass"))
    }

    /// Returns the kind of this filter.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::And(_) => FilterKind::And,
            Self::Or(_) => FilterKind::Or,
            Self::Not(_) => FilterKind::Not,
            Self::Equality { .. } => FilterKind::Equality,
            Self::GreaterOrEqual { .. } => FilterKind::GreaterOrEqual,
            Self::LessOrEqual { .. } => FilterKind::LessOrEqual,
            Self::ApproximateMatch { .. } => FilterKind::ApproximateMatch,
            Self::Substring { .. } => FilterKind::Substring,
            Self::Present { .. } => FilterKind::Present,
            Self::ExtensibleMatch { .. } => FilterKind::ExtensibleMatch,
        }
    }

    /// Appends the string representation of this filter to `buf`.
    ///
    /// The output re-parses to a filter structurally equal to this
    /// one. Assertion-value octets outside the RFC 4515 escape set are
    /// written verbatim, so the output is not guaranteed to be valid
    /// UTF-8.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        match self {
            Self::And(components) => {
                buf.extend_from_slice(b"(&");
                for component in components {
                    component.write_to(buf);
                }
                buf.push(b')');
            }
            Self::Or(components) => {
                buf.extend_from_slice(b"(|");
                for component in components {
                    component.write_to(buf);
                }
                buf.push(b')');
            }
            Self::Not(component) => {
                buf.extend_from_slice(b"(!");
                component.write_to(buf);
                buf.push(b')');
            }
            Self::Equality { attribute, value } => {
                write_simple(buf, attribute, b"=", value);
            }
            Self::GreaterOrEqual { attribute, value } => {
                write_simple(buf, attribute, b">=", value);
            }
            Self::LessOrEqual { attribute, value } => {
                write_simple(buf, attribute, b"<=", value);
            }
            Self::ApproximateMatch { attribute, value } => {
                write_simple(buf, attribute, b"~=", value);
            }
            Self::Substring {
                attribute,
                sub_initial,
                sub_any,
                sub_final,
            } => {
                buf.push(b'(');
                buf.extend_from_slice(attribute.as_bytes());
                buf.push(b'=');
                if let Some(initial) = sub_initial {
                    escape::write_value(buf, initial);
                }
                for any in sub_any {
                    buf.push(b'*');
                    escape::write_value(buf, any);
                }
                buf.push(b'*');
                if let Some(fin) = sub_final {
                    escape::write_value(buf, fin);
                }
                buf.push(b')');
            }
            Self::Present { attribute } => {
                buf.push(b'(');
                buf.extend_from_slice(attribute.as_bytes());
                buf.extend_from_slice(b"=*)");
            }
            Self::ExtensibleMatch {
                attribute,
                matching_rule_id,
                dn_attributes,
                value,
            } => {
                buf.push(b'(');
                if let Some(attribute) = attribute {
                    buf.extend_from_slice(attribute.as_bytes());
                }
                if *dn_attributes {
                    buf.extend_from_slice(b":dn");
                }
                if let Some(rule) = matching_rule_id {
                    buf.push(b':');
                    buf.extend_from_slice(rule.as_bytes());
                }
                buf.extend_from_slice(b":=");
                escape::write_value(buf, value);
                buf.push(b')');
            }
        }
    }

    /// Returns the string representation of this filter as raw bytes.
    #[must_use]
    pub fn to_filter_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to(&mut buf);
        buf
    }
}

fn write_simple(buf: &mut Vec<u8>, attribute: &str, operator: &[u8], value: &[u8]) {
    buf.push(b'(');
    buf.extend_from_slice(attribute.as_bytes());
    buf.extend_from_slice(operator);
    escape::write_value(buf, value);
    buf.push(b')');
}

impl fmt::Display for Filter {
    /// Renders the filter string, replacing any non-UTF-8 octets for
    /// display. Use [`Filter::to_filter_bytes`] for the byte-exact
    /// form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_filter_bytes()))
    }
}
