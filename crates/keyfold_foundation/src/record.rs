//! Loosely-shaped records: an identifying field plus arbitrary payload.

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collections::LtMap;
use crate::identified::Identified;
use crate::value::Value;

/// A record with named fields.
///
/// Records are persistent: [`with`](Self::with) and [`without`](Self::without)
/// return updated copies and leave the original untouched.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Record(LtMap<Arc<str>, Value>);

impl Record {
    /// Field read by the default key extractor.
    pub const ID_FIELD: &'static str = "id";

    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(LtMap::new())
    }

    /// Returns a copy of this record with `field` set to `value`.
    #[must_use]
    pub fn with(&self, field: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Self(self.0.insert(field.into(), value.into()))
    }

    /// Returns a copy of this record without `field`.
    #[must_use]
    pub fn without(&self, field: &str) -> Self {
        Self(self.0.remove(field))
    }

    /// Gets a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns true if the record has `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over fields, in no particular order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl<F: Into<Arc<str>>, V: Into<Value>> FromIterator<(F, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields()).finish()
    }
}

impl Identified for Record {
    type Id = Value;

    fn id(&self) -> Option<Value> {
        FieldKey::id().extract(self)
    }
}

/// Key extractor that reads one named field of a [`Record`].
///
/// The field's value is only returned when it is usable as an identifier,
/// in canonical form (see [`Value::to_identifier`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey {
    field: Arc<str>,
}

impl FieldKey {
    /// Creates an extractor for `field`.
    #[must_use]
    pub fn new(field: impl Into<Arc<str>>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Creates an extractor for the conventional `id` field.
    #[must_use]
    pub fn id() -> Self {
        Self::new(Record::ID_FIELD)
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Extracts the key from a record.
    #[must_use]
    pub fn extract(&self, record: &Record) -> Option<Value> {
        record.get(&self.field).and_then(Value::to_identifier)
    }
}

impl Default for FieldKey {
    fn default() -> Self {
        Self::id()
    }
}
