//! # ds-conformance
//!
//! RFC 4515 conformance suite for the search-filter codec.
//!
//! The tests live under `tests/`; this crate exists to anchor them in
//! the workspace.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
