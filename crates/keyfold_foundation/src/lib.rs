//! Keyed collections, dynamic records, and errors for keyfold.
//!
//! This crate provides:
//! - [`KeyedMap`] - Persistent, insertion-ordered map of records by key
//! - [`Value`] and [`Record`] - Loosely-shaped records with an `id` field
//! - [`Identified`] - Records that carry their own key
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod identified;
pub mod keyed;
pub mod record;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use error::{BuildLimit, Error, ErrorContext, ErrorKind};
pub use identified::Identified;
pub use keyed::KeyedMap;
pub use record::{FieldKey, Record};
pub use value::Value;

/// Result type alias using keyfold's Error.
pub type Result<T> = std::result::Result<T, Error>;
