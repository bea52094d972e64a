//! Owned backing store
//!
//! [`Backing`] is the one place that touches a view's backing record. Every
//! descriptor kind reads and writes through its primitives: raw field access,
//! boxed-number conversion and arbitrary mapping.

use std::fmt::{self, Debug, Formatter};

use crate::descriptor::{OwnerRef, ViewId};
use crate::number::{Boxable, Number};
use crate::path::{KeyPath, WritableKeyPath};

/// A view's backing record plus its binding identity
///
/// Only a [`View`](crate::View) creates one. The generation starts at zero
/// and grows by one on every replacement of the record.
pub struct Backing<T> {
    id: ViewId,
    generation: u64,
    wrapped: T,
}

impl<T> Backing<T> {
    pub(crate) fn new(wrapped: T) -> Self {
        Self {
            id: ViewId::new(),
            generation: 0,
            wrapped,
        }
    }

    /// Identity of the owning view
    #[inline]
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Number of replacements so far
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle descriptors must hold to access this store
    #[inline]
    #[must_use]
    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef {
            view: self.id,
            generation: self.generation,
        }
    }

    /// The backing record
    #[inline]
    #[must_use]
    pub fn wrapped(&self) -> &T {
        &self.wrapped
    }

    pub(crate) fn wrapped_mut(&mut self) -> &mut T {
        &mut self.wrapped
    }

    pub(crate) fn replace(&mut self, wrapped: T) -> T {
        self.generation += 1;
        std::mem::replace(&mut self.wrapped, wrapped)
    }

    pub(crate) fn into_inner(self) -> T {
        self.wrapped
    }

    pub(crate) fn read_raw<V>(&self, path: &KeyPath<T, V>) -> &V {
        path.get(&self.wrapped)
    }

    pub(crate) fn write_raw<V>(&mut self, path: &WritableKeyPath<T, V>, value: V) {
        *path.get_mut(&mut self.wrapped) = value;
    }

    pub(crate) fn unbox<V: Boxable>(&self, path: &KeyPath<T, Number>) -> V {
        V::unbox(self.read_raw(path))
    }

    pub(crate) fn unbox_optional<V: Boxable>(&self, path: &KeyPath<T, Option<Number>>) -> Option<V> {
        self.read_raw(path).as_ref().map(V::unbox)
    }

    pub(crate) fn box_value<V: Boxable>(&mut self, path: &WritableKeyPath<T, Number>, value: V) {
        self.write_raw(path, value.boxed());
    }

    pub(crate) fn box_optional<V: Boxable>(
        &mut self,
        path: &WritableKeyPath<T, Option<Number>>,
        value: Option<V>,
    ) {
        self.write_raw(path, value.map(Boxable::boxed));
    }

    pub(crate) fn map<S, O>(&self, path: &KeyPath<T, S>, transform: &dyn Fn(&S) -> O) -> O {
        transform(self.read_raw(path))
    }

    pub(crate) fn unmap<S, I>(
        &mut self,
        path: &WritableKeyPath<T, S>,
        value: I,
        transform: &dyn Fn(I) -> S,
    ) {
        self.write_raw(path, transform(value));
    }
}

impl<T: Debug> Debug for Backing<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backing")
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("wrapped", &self.wrapped)
            .finish()
    }
}
