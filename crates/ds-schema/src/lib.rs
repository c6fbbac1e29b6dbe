//! # ds-schema
//!
//! Schema elements for the directory server.
//!
//! This crate defines the schema-level building blocks the protocol
//! layer validates against:
//!
//! - [`AttributeDescription`] - a parsed attribute description
//!   (attribute type name plus options, RFC 4512 §2.5)
//! - [`MatchingRule`] and [`Schema`] - the matching-rule registry
//! - [`SearchFilter`] - the schema-validated search filter the raw
//!   protocol filter is lowered onto
//! - [`SchemaError`] - error types for schema parsing and lookup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attribute;
pub mod error;
pub mod matching_rule;
pub mod schema;
pub mod search;

pub use attribute::AttributeDescription;
pub use error::{SchemaError, SchemaResult};
pub use matching_rule::MatchingRule;
pub use schema::Schema;
pub use search::SearchFilter;
