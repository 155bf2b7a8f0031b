//! keyfold - Normalized, keyed collections of records
//!
//! This crate re-exports both layers of keyfold for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: keyfold_builder    — Folding record sequences into keyed collections
//! Layer 0: keyfold_foundation — KeyedMap, Record, Value, Identified, Error
//! ```
//!
//! # Example
//!
//! ```
//! use keyfold::foundation::{Record, Value};
//! use keyfold::builder::{build, normalize};
//!
//! let users = normalize(vec![
//!     Record::new().with("id", 1).with("name", "A"),
//!     Record::new().with("id", 2).with("name", "B"),
//! ])
//! .unwrap();
//!
//! let users = build(vec![Record::new().with("id", 1).with("name", "Z")], &users).unwrap();
//! let names: Vec<_> = users.values().filter_map(|u| u.get("name")).collect();
//! assert_eq!(names, vec![&Value::from("Z"), &Value::from("B")]);
//! ```

pub use keyfold_builder as builder;
pub use keyfold_foundation as foundation;
