//! Boxed number descriptors
//!
//! Expose a [`Number`] field of the backing record as a native value:
//! - [`Boxed`] / [`MutableBoxed`]: field always present
//! - [`OptionalBox`] / [`MutableOptionalBox`]: field may be absent; absence
//!   is exposed as `None` and writing `None` clears the field

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::backing::Backing;
use crate::descriptor::{descriptor_impls, DescriptorBase, Field, FieldMut};
use crate::number::{Boxable, Number};
use crate::path::{KeyPath, WritableKeyPath};

/// Read-only native view of a boxed field
pub struct Boxed<T, V> {
    base: DescriptorBase,
    path: KeyPath<T, Number>,
    _value: PhantomData<fn() -> V>,
}

impl<T: 'static, V: Boxable> Boxed<T, V> {
    /// Declare against `path`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: impl Into<KeyPath<T, Number>>) -> Self {
        Self {
            base: DescriptorBase::new::<T>("Boxed"),
            path: path.into(),
            _value: PhantomData,
        }
    }
}

impl<T, V> Boxed<T, V> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> KeyPath<T, Number> {
        self.path
    }
}

impl<T, V: Boxable> Field<T> for Boxed<T, V> {
    type Value = V;

    fn load(&self, backing: &Backing<T>) -> V {
        backing.unbox(&self.path)
    }
}

descriptor_impls!(Boxed<T, V>);

/// Read-write native view of a boxed field
pub struct MutableBoxed<T, V> {
    base: DescriptorBase,
    path: WritableKeyPath<T, Number>,
    _value: PhantomData<fn() -> V>,
}

impl<T: 'static, V: Boxable> MutableBoxed<T, V> {
    /// Declare against `path`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: WritableKeyPath<T, Number>) -> Self {
        Self {
            base: DescriptorBase::new::<T>("MutableBoxed"),
            path,
            _value: PhantomData,
        }
    }
}

impl<T, V> MutableBoxed<T, V> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> WritableKeyPath<T, Number> {
        self.path
    }
}

impl<T, V: Boxable> Field<T> for MutableBoxed<T, V> {
    type Value = V;

    fn load(&self, backing: &Backing<T>) -> V {
        backing.unbox(&self.path.read_only())
    }
}

impl<T, V: Boxable> FieldMut<T> for MutableBoxed<T, V> {
    fn store(&self, backing: &mut Backing<T>, value: V) {
        backing.box_value(&self.path, value);
    }
}

descriptor_impls!(MutableBoxed<T, V>);

/// Read-only native view of a boxed field that may be absent
pub struct OptionalBox<T, V> {
    base: DescriptorBase,
    path: KeyPath<T, Option<Number>>,
    _value: PhantomData<fn() -> V>,
}

impl<T: 'static, V: Boxable> OptionalBox<T, V> {
    /// Declare against `path`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: impl Into<KeyPath<T, Option<Number>>>) -> Self {
        Self {
            base: DescriptorBase::new::<T>("OptionalBox"),
            path: path.into(),
            _value: PhantomData,
        }
    }
}

impl<T, V> OptionalBox<T, V> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> KeyPath<T, Option<Number>> {
        self.path
    }
}

impl<T, V: Boxable> Field<T> for OptionalBox<T, V> {
    type Value = Option<V>;

    fn load(&self, backing: &Backing<T>) -> Option<V> {
        backing.unbox_optional(&self.path)
    }
}

descriptor_impls!(OptionalBox<T, V>);

/// Read-write native view of a boxed field that may be absent
pub struct MutableOptionalBox<T, V> {
    base: DescriptorBase,
    path: WritableKeyPath<T, Option<Number>>,
    _value: PhantomData<fn() -> V>,
}

impl<T: 'static, V: Boxable> MutableOptionalBox<T, V> {
    /// Declare against `path`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(path: WritableKeyPath<T, Option<Number>>) -> Self {
        Self {
            base: DescriptorBase::new::<T>("MutableOptionalBox"),
            path,
            _value: PhantomData,
        }
    }
}

impl<T, V> MutableOptionalBox<T, V> {
    /// Addressed field
    #[inline]
    #[must_use]
    pub fn path(&self) -> WritableKeyPath<T, Option<Number>> {
        self.path
    }
}

impl<T, V: Boxable> Field<T> for MutableOptionalBox<T, V> {
    type Value = Option<V>;

    fn load(&self, backing: &Backing<T>) -> Option<V> {
        backing.unbox_optional(&self.path.read_only())
    }
}

impl<T, V: Boxable> FieldMut<T> for MutableOptionalBox<T, V> {
    fn store(&self, backing: &mut Backing<T>, value: Option<V>) {
        backing.box_optional(&self.path, value);
    }
}

descriptor_impls!(MutableOptionalBox<T, V>);

macro_rules! boxed_debug {
    ($($name:ident),+) => {
        $(
            impl<T, V> Debug for $name<T, V> {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($name))
                        .field("path", &self.path)
                        .field("base", &self.base)
                        .finish()
                }
            }
        )+
    };
}

boxed_debug!(Boxed, MutableBoxed, OptionalBox, MutableOptionalBox);
