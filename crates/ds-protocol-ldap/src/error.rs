//! Protocol error types for the search-filter codec.
//!
//! Every decoding failure carries enough context to point at the
//! offending byte of the original filter string; positions in error
//! messages are always absolute positions in that string, never
//! positions within a sub-range.

use ds_schema::SchemaError;
use thiserror::Error;

/// Result type for filter codec operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// LDAP result codes the filter codec maps its errors onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// protocolError(2)
    ProtocolError,
    /// inappropriateMatching(18)
    InappropriateMatching,
}

impl ResultCode {
    /// Returns the numeric value of this result code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::ProtocolError => 2,
            Self::InappropriateMatching => 18,
        }
    }

    /// Returns the protocol name of this result code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProtocolError => "protocolError",
            Self::InappropriateMatching => "inappropriateMatching",
        }
    }
}

/// Errors raised while decoding, printing or lowering a search filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The filter string is empty.
    #[error("the search filter is empty")]
    EmptyFilter,

    /// The filter string is enclosed in apostrophes, a common quoting
    /// mistake.
    #[error("the search filter {0:?} is enclosed in apostrophes")]
    EnclosedInApostrophes(String),

    /// The filter opens a parenthesis it never closes.
    #[error(
        "the search filter {filter:?} has mismatched parentheses between \
         positions {start} and {end}"
    )]
    MismatchedParentheses {
        /// The original filter string.
        filter: String,
        /// Start of the offending range.
        start: usize,
        /// End of the offending range.
        end: usize,
    },

    /// A simple filter has no equal sign.
    #[error(
        "the search filter {filter:?} has no equal sign between positions \
         {start} and {end}"
    )]
    NoEqualSign {
        /// The original filter string.
        filter: String,
        /// Start of the offending range.
        start: usize,
        /// End of the offending range.
        end: usize,
    },

    /// An attribute description contains a character outside the
    /// allowed set.
    #[error(
        "the attribute description {attribute:?} contains invalid character \
         {character:?} at position {position}"
    )]
    InvalidCharInAttrType {
        /// The offending attribute description.
        attribute: String,
        /// The invalid character.
        character: char,
        /// Position of the character within the attribute description.
        position: usize,
    },

    /// A backslash escape is truncated or followed by non-hex digits.
    #[error("the search filter {filter:?} has an invalid escaped byte at position {position}")]
    InvalidEscapedByte {
        /// The original filter string.
        filter: String,
        /// Absolute position of the offending byte.
        position: usize,
    },

    /// The components of a compound filter are not each enclosed in
    /// parentheses.
    #[error(
        "the compound components of search filter {filter:?} between positions \
         {start} and {end} must each be enclosed in parentheses"
    )]
    CompoundMissingParentheses {
        /// The original filter string.
        filter: String,
        /// Start of the compound content.
        start: usize,
        /// End of the compound content.
        end: usize,
    },

    /// A close parenthesis has no matching open parenthesis.
    #[error(
        "the close parenthesis at position {position} of search filter \
         {filter:?} has no corresponding open parenthesis"
    )]
    NoCorrespondingOpenParenthesis {
        /// The original filter string.
        filter: String,
        /// Position of the unmatched close parenthesis.
        position: usize,
    },

    /// An open parenthesis has no matching close parenthesis.
    #[error(
        "the open parenthesis at position {position} of search filter \
         {filter:?} has no corresponding close parenthesis"
    )]
    NoCorrespondingCloseParenthesis {
        /// The original filter string.
        filter: String,
        /// Position of the unmatched open parenthesis.
        position: usize,
    },

    /// A NOT filter does not contain exactly one subordinate filter.
    #[error(
        "the NOT component of search filter {filter:?} between positions \
         {start} and {end} must contain exactly one subordinate filter"
    )]
    NotRequiresExactlyOne {
        /// The original filter string.
        filter: String,
        /// Start of the NOT content.
        start: usize,
        /// End of the NOT content.
        end: usize,
    },

    /// A substring value contains no asterisks.
    #[error(
        "the substring value of search filter {filter:?} between positions \
         {start} and {end} contains no asterisks"
    )]
    SubstringNoAsterisks {
        /// The original filter string.
        filter: String,
        /// Start of the substring value.
        start: usize,
        /// End of the substring value.
        end: usize,
    },

    /// An extensible match component has no colon.
    #[error(
        "the extensible match component of search filter {filter:?} starting \
         at position {position} has no colon"
    )]
    ExtensibleMatchNoColon {
        /// The original filter string.
        filter: String,
        /// Start of the extensible match component.
        position: usize,
    },

    /// An extensible match names neither an attribute description nor
    /// a matching rule.
    #[error(
        "the extensible match component of search filter {filter:?} starting \
         at position {position} has neither an attribute description nor a \
         matching rule identifier"
    )]
    ExtensibleMatchNoAttributeOrRule {
        /// The original filter string.
        filter: String,
        /// Start of the extensible match component.
        position: usize,
    },

    /// An attribute description failed schema validation during
    /// lowering.
    #[error("invalid attribute description: {0}")]
    InvalidAttributeDescription(String),

    /// A filter carries an assertion value with neither an attribute
    /// description nor a matching rule identifier.
    #[error(
        "a filter with an assertion value must name an attribute description \
         or a matching rule"
    )]
    ValueWithNoAttributeOrMatchingRule,

    /// The named matching rule is not known to the schema.
    #[error("unknown matching rule: {0}")]
    UnknownMatchingRule(String),

    /// An unexpected fault occurred while decoding.
    #[error("uncaught exception while decoding search filter {filter:?}: {cause}")]
    UncaughtException {
        /// The original filter string.
        filter: String,
        /// A description of the fault.
        cause: String,
    },
}

impl FilterError {
    /// Returns the LDAP result code this error maps onto.
    #[must_use]
    pub const fn result_code(&self) -> ResultCode {
        match self {
            Self::UnknownMatchingRule(_) => ResultCode::InappropriateMatching,
            _ => ResultCode::ProtocolError,
        }
    }
}

impl From<SchemaError> for FilterError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::InvalidAttributeDescription(detail) => {
                Self::InvalidAttributeDescription(detail)
            }
            SchemaError::UnknownMatchingRule(id) => Self::UnknownMatchingRule(id),
        }
    }
}
