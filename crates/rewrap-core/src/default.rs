//! Defaulting descriptors
//!
//! [`DefaultBox`] and [`MutableDefaultBox`] read an optional boxed field and
//! substitute a declared default when it is absent. The default is a
//! read-time fallback only: it is never written back, and writes always
//! store a present value.

use std::fmt::{self, Debug, Formatter};

use crate::backing::Backing;
use crate::descriptor::{descriptor_impls, DescriptorBase, Field, FieldMut};
use crate::number::{Boxable, Number};
use crate::path::{KeyPath, WritableKeyPath};

/// Read-only native view of an optional boxed field with a fallback
pub struct DefaultBox<T, V> {
    base: DescriptorBase,
    path: KeyPath<T, Option<Number>>,
    default: V,
}

impl<T: 'static, V: Boxable> DefaultBox<T, V> {
    /// Declare against `path`, reading `default` when the field is absent
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: impl Into<KeyPath<T, Option<Number>>>, default: V) -> Self {
        Self {
            base: DescriptorBase::new::<T>("DefaultBox"),
            path: path.into(),
            default,
        }
    }
}

impl<T, V: Copy> DefaultBox<T, V> {
    /// Value read when the field is absent
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> V {
        self.default
    }

    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> KeyPath<T, Option<Number>> {
        self.path
    }
}

impl<T, V: Boxable> Field<T> for DefaultBox<T, V> {
    type Value = V;

    fn load(&self, backing: &Backing<T>) -> V {
        backing.unbox_optional(&self.path).unwrap_or(self.default)
    }
}

descriptor_impls!(DefaultBox<T, V>);

/// Read-write native view of an optional boxed field with a fallback
///
/// Writing the default value stores it as present, so the backing field
/// no longer reads as absent to anyone inspecting the record directly.
/// There is no way to clear the field through this descriptor; declare a
/// [`MutableOptionalBox`](crate::MutableOptionalBox) on the same field for
/// that.
pub struct MutableDefaultBox<T, V> {
    base: DescriptorBase,
    path: WritableKeyPath<T, Option<Number>>,
    default: V,
}

impl<T: 'static, V: Boxable> MutableDefaultBox<T, V> {
    /// Declare against `path`, reading `default` when the field is absent
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: WritableKeyPath<T, Option<Number>>, default: V) -> Self {
        Self {
            base: DescriptorBase::new::<T>("MutableDefaultBox"),
            path,
            default,
        }
    }
}

impl<T, V: Copy> MutableDefaultBox<T, V> {
    /// Value read when the field is absent
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> V {
        self.default
    }

    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> WritableKeyPath<T, Option<Number>> {
        self.path
    }
}

impl<T, V: Boxable> Field<T> for MutableDefaultBox<T, V> {
    type Value = V;

    fn load(&self, backing: &Backing<T>) -> V {
        backing
            .unbox_optional(&self.path.read_only())
            .unwrap_or(self.default)
    }
}

impl<T, V: Boxable> FieldMut<T> for MutableDefaultBox<T, V> {
    fn store(&self, backing: &mut Backing<T>, value: V) {
        backing.box_optional(&self.path, Some(value));
    }
}

descriptor_impls!(MutableDefaultBox<T, V>);

impl<T, V: Debug> Debug for DefaultBox<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultBox")
            .field("path", &self.path)
            .field("default", &self.default)
            .field("base", &self.base)
            .finish()
    }
}

impl<T, V: Debug> Debug for MutableDefaultBox<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableDefaultBox")
            .field("path", &self.path)
            .field("default", &self.default)
            .field("base", &self.base)
            .finish()
    }
}
