//! Error types and result definitions for the eqlx translation engine.
//!
//! eqlx uses a single error enum ([`Error`]) shared by every crate in the
//! workspace. Translation either succeeds and returns one fragment, or fails
//! fast with one of these variants; no partial fragment is ever handed back.
//! Every message names the offending expression, member, or method so the
//! failure is actionable without a debugger.

mod error;

pub use error::Error;

/// Result type used throughout the eqlx crates.
pub type Result<T> = std::result::Result<T, Error>;
