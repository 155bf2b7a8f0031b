//! Records that carry their own key.

use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// A record with an intrinsic identifier.
///
/// This is the default key extractor used by the builder when the caller
/// does not pass one explicitly.
pub trait Identified {
    /// The identifier type.
    type Id: Clone + Eq + Hash;

    /// Returns this record's identifier, or `None` if it has no usable one.
    fn id(&self) -> Option<Self::Id>;
}

impl<T: Identified + ?Sized> Identified for &T {
    type Id = T::Id;

    fn id(&self) -> Option<Self::Id> {
        (**self).id()
    }
}

impl<T: Identified + ?Sized> Identified for Arc<T> {
    type Id = T::Id;

    fn id(&self) -> Option<Self::Id> {
        (**self).id()
    }
}

impl<T: Identified + ?Sized> Identified for Rc<T> {
    type Id = T::Id;

    fn id(&self) -> Option<Self::Id> {
        (**self).id()
    }
}
