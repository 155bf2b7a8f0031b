//! Folding record sequences into a [`KeyedMap`].
//!
//! A build starts from a seed collection, adopts it with an O(1) persistent
//! clone, then visits each record once in order. Each record is stored
//! under the key its extractor returns. A later record with the same key
//! replaces the earlier one, including entries that came from the seed. The
//! seed itself is never modified.

use std::hash::Hash;

use keyfold_foundation::{BuildLimit, Error, ErrorContext, Identified, KeyedMap, Result};
use tracing::{debug, trace, warn};

use crate::config::{BuildConfig, KeyPolicy, OrderPolicy};

/// Outcome of a build, with bookkeeping.
#[derive(Clone, Debug)]
pub struct BuildReport<K, R>
where
    K: Clone + Eq + Hash,
    R: Clone,
{
    /// The resulting collection.
    pub map: KeyedMap<K, R>,
    /// Number of records written into the collection.
    pub merged: usize,
    /// Indices of records skipped for lack of a usable key, ascending.
    pub skipped: Vec<usize>,
}

/// Builds keyed collections under a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: BuildConfig,
}

impl Builder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Merges `records` into `seed`, keying each record by its own id.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidKey` for a record without a usable id under
    /// [`KeyPolicy::Strict`], and with `LimitExceeded` when more records
    /// are supplied than `max_records` allows.
    pub fn build<R, I>(
        &self,
        records: I,
        seed: &KeyedMap<R::Id, R>,
    ) -> Result<KeyedMap<R::Id, R>>
    where
        R: Identified + Clone,
        I: IntoIterator<Item = R>,
    {
        self.build_by(records, seed, R::id)
    }

    /// Merges `records` into `seed`, keying each record with `key_of`.
    ///
    /// `key_of` returns `None` for a record without a usable key.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn build_by<R, K, I, F>(
        &self,
        records: I,
        seed: &KeyedMap<K, R>,
        key_of: F,
    ) -> Result<KeyedMap<K, R>>
    where
        K: Clone + Eq + Hash,
        R: Clone,
        I: IntoIterator<Item = R>,
        F: Fn(&R) -> Option<K>,
    {
        self.build_report_by(records, seed, key_of)
            .map(|report| report.map)
    }

    /// Like [`build`](Self::build), returning a [`BuildReport`].
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn build_report<R, I>(
        &self,
        records: I,
        seed: &KeyedMap<R::Id, R>,
    ) -> Result<BuildReport<R::Id, R>>
    where
        R: Identified + Clone,
        I: IntoIterator<Item = R>,
    {
        self.build_report_by(records, seed, R::id)
    }

    /// Like [`build_by`](Self::build_by), returning a [`BuildReport`].
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn build_report_by<R, K, I, F>(
        &self,
        records: I,
        seed: &KeyedMap<K, R>,
        key_of: F,
    ) -> Result<BuildReport<K, R>>
    where
        K: Clone + Eq + Hash,
        R: Clone,
        I: IntoIterator<Item = R>,
        F: Fn(&R) -> Option<K>,
    {
        let mut map = seed.clone();
        let mut merged = 0;
        let mut skipped = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            match self.config.max_records {
                Some(limit) if index >= limit => {
                    let err = Error::limit_exceeded(BuildLimit::MaxRecords { limit });
                    return Err(self.fail(err));
                }
                _ => {}
            }

            let Some(key) = key_of(&record) else {
                match self.config.key_policy {
                    KeyPolicy::Strict => return Err(self.fail(Error::invalid_key(index))),
                    KeyPolicy::Lenient => {
                        warn!(index, "skipping record without a usable key");
                        skipped.push(index);
                        continue;
                    }
                }
            };

            let replaced = match self.config.order_policy {
                OrderPolicy::KeepFirst => map.insert_mut(key, record),
                OrderPolicy::MoveToEnd => map.insert_last_mut(key, record),
            };
            if replaced.is_some() {
                trace!(index, "overwrote existing key");
            }
            merged += 1;
        }

        debug!(
            merged,
            skipped = skipped.len(),
            len = map.len(),
            "built keyed collection"
        );
        Ok(BuildReport {
            map,
            merged,
            skipped,
        })
    }

    fn fail(&self, err: Error) -> Error {
        match &self.config.label {
            Some(label) => err.with_context(
                ErrorContext::new()
                    .with_source(label.clone())
                    .with_frame("build"),
            ),
            None => err,
        }
    }
}

/// Merges `records` into `seed` with the default configuration.
///
/// # Errors
///
/// Fails with `InvalidKey` on the first record without a usable id.
pub fn build<R, I>(records: I, seed: &KeyedMap<R::Id, R>) -> Result<KeyedMap<R::Id, R>>
where
    R: Identified + Clone,
    I: IntoIterator<Item = R>,
{
    Builder::default().build(records, seed)
}

/// Merges `records` into `seed` using `key_of`, with the default configuration.
///
/// # Errors
///
/// Fails with `InvalidKey` on the first record for which `key_of` returns `None`.
pub fn build_by<R, K, I, F>(
    records: I,
    seed: &KeyedMap<K, R>,
    key_of: F,
) -> Result<KeyedMap<K, R>>
where
    K: Clone + Eq + Hash,
    R: Clone,
    I: IntoIterator<Item = R>,
    F: Fn(&R) -> Option<K>,
{
    Builder::default().build_by(records, seed, key_of)
}

/// Builds a fresh collection from `records`.
///
/// # Errors
///
/// Fails with `InvalidKey` on the first record without a usable id.
pub fn normalize<R, I>(records: I) -> Result<KeyedMap<R::Id, R>>
where
    R: Identified + Clone,
    I: IntoIterator<Item = R>,
{
    build(records, &KeyedMap::new())
}
