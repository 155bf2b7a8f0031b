//! Folds sequences of records into keyed, insertion-ordered collections.
//!
//! This crate provides:
//! - [`build`], [`build_by`], [`normalize`] - One-shot builds with default settings
//! - [`Builder`] - Builds with an explicit [`BuildConfig`]
//! - [`BuildReport`] - Counts and skipped indices for a build

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod config;

pub use builder::{BuildReport, Builder, build, build_by, normalize};
pub use config::{BuildConfig, KeyPolicy, OrderPolicy};
