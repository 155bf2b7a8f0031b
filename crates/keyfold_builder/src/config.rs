//! Configuration for building keyed collections.

/// What to do with a record whose key is unusable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Fail the whole build on the first unusable key.
    #[default]
    Strict,
    /// Skip the record and keep going.
    Lenient,
}

/// Where an overwritten key ends up in iteration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderPolicy {
    /// The key stays where it was first inserted.
    #[default]
    KeepFirst,
    /// The key moves to the end, as if newly inserted.
    MoveToEnd,
}

/// Configuration for a [`Builder`](crate::Builder).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Handling of records without a usable key.
    pub key_policy: KeyPolicy,

    /// Position of keys that are written more than once.
    pub order_policy: OrderPolicy,

    /// Maximum number of records one build may consume (None = unbounded).
    pub max_records: Option<usize>,

    /// Name of the collection, reported in error context.
    pub label: Option<String>,
}

impl BuildConfig {
    /// Creates a configuration that fails on unusable keys.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Creates a configuration that skips records with unusable keys.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            key_policy: KeyPolicy::Lenient,
            ..Self::default()
        }
    }

    /// Builder method to set the key policy.
    #[must_use]
    pub fn with_key_policy(mut self, policy: KeyPolicy) -> Self {
        self.key_policy = policy;
        self
    }

    /// Builder method to set the order policy.
    #[must_use]
    pub fn with_order_policy(mut self, policy: OrderPolicy) -> Self {
        self.order_policy = policy;
        self
    }

    /// Builder method to cap the number of records.
    #[must_use]
    pub fn with_max_records(mut self, limit: usize) -> Self {
        self.max_records = Some(limit);
        self
    }

    /// Builder method to name the collection.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
