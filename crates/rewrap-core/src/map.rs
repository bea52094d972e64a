//! Mapping descriptors
//!
//! [`Map`] and [`MutableMap`] expose a stored field through caller-supplied
//! transforms. [`Redirect`] and [`MutableRedirect`] are their identity
//! specialisations: the field is re-exposed unchanged under another name.
//!
//! Transforms should be pure. Nothing checks that a [`MutableMap`]'s two
//! transforms are inverses of each other; a write followed by a read
//! returns the written value only if they are.

use std::fmt::{self, Debug, Formatter};

use crate::backing::Backing;
use crate::descriptor::{descriptor_impls, DescriptorBase, Field, FieldMut};
use crate::path::{KeyPath, WritableKeyPath};

type Getter<S, O> = Box<dyn Fn(&S) -> O>;
type Setter<I, S> = Box<dyn Fn(I) -> S>;

/// Read-only transform of a stored `S` field into an exposed `O`
pub struct Map<T, S, O> {
    base: DescriptorBase,
    path: KeyPath<T, S>,
    get: Getter<S, O>,
}

impl<T: 'static, S: 'static, O: 'static> Map<T, S, O> {
    /// Declare against `path`, exposing `get(stored)`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: impl Into<KeyPath<T, S>>, get: impl Fn(&S) -> O + 'static) -> Self {
        Self::build("Map", path.into(), get)
    }

    #[track_caller]
    pub(crate) fn build(
        kind: &'static str,
        path: KeyPath<T, S>,
        get: impl Fn(&S) -> O + 'static,
    ) -> Self {
        Self {
            base: DescriptorBase::new::<T>(kind),
            path,
            get: Box::new(get),
        }
    }
}

impl<T: 'static, S: 'static, O: 'static> Map<T, Option<S>, Option<O>> {
    /// Declare against an optional field, applying `get` to present values
    ///
    /// An absent stored value reads as `None`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn lift(path: impl Into<KeyPath<T, Option<S>>>, get: impl Fn(&S) -> O + 'static) -> Self {
        Self::build("Map", path.into(), move |stored: &Option<S>| {
            stored.as_ref().map(&get)
        })
    }
}

impl<T, S, O> Map<T, S, O> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> KeyPath<T, S> {
        self.path
    }
}

impl<T, S, O> Field<T> for Map<T, S, O> {
    type Value = O;

    fn load(&self, backing: &Backing<T>) -> O {
        backing.map(&self.path, &*self.get)
    }
}

descriptor_impls!(Map<T, S, O>);

/// Bidirectional transform between a stored `S` field and an exposed `O`
pub struct MutableMap<T, S, O> {
    base: DescriptorBase,
    path: WritableKeyPath<T, S>,
    get: Getter<S, O>,
    set: Setter<O, S>,
}

impl<T: 'static, S: 'static, O: 'static> MutableMap<T, S, O> {
    /// Declare against `path`, reading `get(stored)` and writing `set(exposed)`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(
        path: WritableKeyPath<T, S>,
        get: impl Fn(&S) -> O + 'static,
        set: impl Fn(O) -> S + 'static,
    ) -> Self {
        Self::build("MutableMap", path, get, set)
    }

    #[track_caller]
    pub(crate) fn build(
        kind: &'static str,
        path: WritableKeyPath<T, S>,
        get: impl Fn(&S) -> O + 'static,
        set: impl Fn(O) -> S + 'static,
    ) -> Self {
        Self {
            base: DescriptorBase::new::<T>(kind),
            path,
            get: Box::new(get),
            set: Box::new(set),
        }
    }
}

impl<T: 'static, S: 'static, O: 'static> MutableMap<T, Option<S>, Option<O>> {
    /// Declare against an optional field, applying both transforms to present
    /// values only
    ///
    /// An absent stored value reads as `None`; writing `None` clears the field.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn lift(
        path: WritableKeyPath<T, Option<S>>,
        get: impl Fn(&S) -> O + 'static,
        set: impl Fn(O) -> S + 'static,
    ) -> Self {
        Self::build(
            "MutableMap",
            path,
            move |stored: &Option<S>| stored.as_ref().map(&get),
            move |exposed: Option<O>| exposed.map(&set),
        )
    }
}

impl<T, S, O> MutableMap<T, S, O> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> WritableKeyPath<T, S> {
        self.path
    }
}

impl<T, S, O> Field<T> for MutableMap<T, S, O> {
    type Value = O;

    fn load(&self, backing: &Backing<T>) -> O {
        backing.map(&self.path.read_only(), &*self.get)
    }
}

impl<T, S, O> FieldMut<T> for MutableMap<T, S, O> {
    fn store(&self, backing: &mut Backing<T>, value: O) {
        backing.unmap(&self.path, value, &*self.set);
    }
}

descriptor_impls!(MutableMap<T, S, O>);

/// Read-only re-exposure of a field, unchanged
pub struct Redirect<T, V> {
    inner: Map<T, V, V>,
}

impl<T: 'static, V: Clone + 'static> Redirect<T, V> {
    /// Declare against `path`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: impl Into<KeyPath<T, V>>) -> Self {
        Self {
            inner: Map::build("Redirect", path.into(), V::clone),
        }
    }
}

impl<T, V> Redirect<T, V> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> KeyPath<T, V> {
        self.inner.path
    }
}

impl<T, V> Field<T> for Redirect<T, V> {
    type Value = V;

    fn load(&self, backing: &Backing<T>) -> V {
        self.inner.load(backing)
    }
}

descriptor_impls!(Redirect<T, V> => inner.base);

/// Read-write re-exposure of a field, unchanged
pub struct MutableRedirect<T, V> {
    inner: MutableMap<T, V, V>,
}

impl<T: 'static, V: Clone + 'static> MutableRedirect<T, V> {
    /// Declare against `path`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: WritableKeyPath<T, V>) -> Self {
        Self {
            inner: MutableMap::build("MutableRedirect", path, V::clone, |value| value),
        }
    }
}

impl<T, V> MutableRedirect<T, V> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> WritableKeyPath<T, V> {
        self.inner.path
    }
}

impl<T, V> Field<T> for MutableRedirect<T, V> {
    type Value = V;

    fn load(&self, backing: &Backing<T>) -> V {
        self.inner.load(backing)
    }
}

impl<T, V> FieldMut<T> for MutableRedirect<T, V> {
    fn store(&self, backing: &mut Backing<T>, value: V) {
        self.inner.store(backing, value);
    }
}

descriptor_impls!(MutableRedirect<T, V> => inner.base);

impl<T, S, O> Debug for Map<T, S, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("path", &self.path)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl<T, S, O> Debug for MutableMap<T, S, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableMap")
            .field("path", &self.path)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl<T, V> Debug for Redirect<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Redirect").field(&self.inner.path).finish()
    }
}

impl<T, V> Debug for MutableRedirect<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableRedirect")
            .field(&self.inner.path)
            .finish()
    }
}
