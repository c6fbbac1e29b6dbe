//! # ds-protocol-ldap
//!
//! LDAP search-filter codec for the directory server.
//!
//! A search filter selects entries during a search operation. This
//! crate decodes the RFC 4515 string representation into a raw
//! [`Filter`], prints it back to its canonical text, and lowers it
//! onto the schema-validated [`SearchFilter`](ds_schema::SearchFilter)
//! used by core processing.
//!
//! # Architecture
//!
//! - [`filter`] - the raw filter representation and its printer
//! - [`decode`] - the recursive-descent decoder for filter strings
//! - [`error`] - protocol error types and LDAP result codes
//!
//! Escape handling and schema lowering are internal modules; lowering
//! is exposed as [`Filter::to_search_filter`].
//!
//! # Example
//!
//! ```
//! use ds_protocol_ldap::{decode, Filter};
//!
//! let filter = decode("(&(objectclass=person)(cn=Jane Doe))")?;
//! match &filter {
//!     Filter::And(components) => assert_eq!(components.len(), 2),
//!     _ => unreachable!(),
//! }
//! assert_eq!(filter.to_string(), "(&(objectclass=person)(cn=Jane Doe))");
//! # Ok::<(), ds_protocol_ldap::FilterError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod decode;
pub mod error;
pub mod filter;

mod escape;
mod lower;

pub use decode::{decode, decode_bytes};
pub use error::{FilterError, FilterResult, ResultCode};
pub use filter::{Filter, FilterKind};
