//! Field descriptor base and ownership contract
//!
//! Every descriptor kind embeds a [`DescriptorBase`]: its kind name, the
//! declaration [`Site`], the backing type it was declared against, and an
//! owner slot that only the binder writes. [`Properties`] is the discovery
//! seam a view uses to find every descriptor it owns.

use std::any::TypeId;
use std::cell::Cell;
use std::fmt::{self, Display, Formatter};
use std::panic::Location;

use uuid::Uuid;

use crate::backing::Backing;
use crate::error::AccessError;
use crate::path::short_type_name;

/// Declaration site of a descriptor (file, line, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    file: &'static str,
    line: u32,
    column: u32,
}

impl Site {
    /// Site of the caller
    ///
    /// Propagates through `#[track_caller]` constructors, so a descriptor
    /// built inside a property declaration reports the declaration line.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Source file
    #[inline]
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// 1-based line
    #[inline]
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column
    #[inline]
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// `file:line`, the short form used in misuse reports
    #[must_use]
    pub fn usage_location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Identity of a view
///
/// Descriptors hold this instead of a pointer to their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    /// Fresh random id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying uuid
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ViewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        f.write_str(&simple[..8])
    }
}

/// Non-owning handle from a descriptor to the backing store it serves
///
/// `generation` counts backing-store replacements, so a handle taken before
/// a replacement never matches the current store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerRef {
    pub view: ViewId,
    pub generation: u64,
}

impl Display for OwnerRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.view, self.generation)
    }
}

/// State shared by every descriptor kind
///
/// # Invariants
/// - `backing` is fixed at declaration and never changes
/// - `owner` is `None` until the first bind; afterwards it always holds the
///   handle of the current backing store of exactly one view
#[derive(Debug)]
pub struct DescriptorBase {
    kind: &'static str,
    site: Site,
    backing: TypeId,
    backing_name: &'static str,
    owner: Cell<Option<OwnerRef>>,
}

impl DescriptorBase {
    /// Create unbound base for a descriptor declared against backing type `T`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new<T: 'static>(kind: &'static str) -> Self {
        Self {
            kind,
            site: Site::caller(),
            backing: TypeId::of::<T>(),
            backing_name: std::any::type_name::<T>(),
            owner: Cell::new(None),
        }
    }

    /// Current owner, if bound
    #[inline]
    #[must_use]
    pub fn owner(&self) -> Option<OwnerRef> {
        self.owner.get()
    }

    pub(crate) fn bind(&self, owner: OwnerRef) {
        self.owner.set(Some(owner));
    }

    /// Check the owner slot against the store being accessed
    ///
    /// # Errors
    /// - [`AccessError::Unbound`] if never bound
    /// - [`AccessError::ForeignOwner`] if bound to another view
    /// - [`AccessError::StaleBinding`] if bound to an earlier store of this view
    pub(crate) fn verify_owner(&self, current: OwnerRef) -> Result<(), AccessError> {
        let descriptor = self.kind;
        let site = self.site;
        match self.owner.get() {
            None => Err(AccessError::Unbound { descriptor, site }),
            Some(owner) if owner.view != current.view => Err(AccessError::ForeignOwner {
                descriptor,
                site,
                owner: owner.view,
                view: current.view,
            }),
            Some(owner) if owner.generation != current.generation => {
                Err(AccessError::StaleBinding {
                    descriptor,
                    site,
                    bound: owner.generation,
                    current: current.generation,
                })
            }
            Some(_) => Ok(()),
        }
    }
}

/// Type-erased descriptor, as seen by discovery and diagnostics
///
/// Implementors only provide [`Descriptor::base`].
pub trait Descriptor {
    /// Shared descriptor state
    fn base(&self) -> &DescriptorBase;

    /// Kind name (`MutableDefaultBox`, `Redirect`, ...)
    fn kind(&self) -> &'static str {
        self.base().kind
    }

    /// Kind as written in misuse reports (`@MutableDefaultBox`)
    fn type_description(&self) -> String {
        format!("@{}", self.kind())
    }

    /// Declaration site
    fn site(&self) -> Site {
        self.base().site
    }

    /// Backing type this descriptor was declared against
    fn backing_type(&self) -> TypeId {
        self.base().backing
    }

    /// Short name of the backing type
    fn backing_type_name(&self) -> &'static str {
        short_type_name(self.base().backing_name)
    }

    /// Current owner, `None` until bound
    fn owner(&self) -> Option<OwnerRef> {
        self.base().owner()
    }

    /// Check if bound to any view
    fn is_bound(&self) -> bool {
        self.owner().is_some()
    }
}

/// Descriptor readable against backing type `T`
pub trait Field<T>: Descriptor {
    /// Exposed value type
    type Value;

    /// Read through the backing store without checking ownership
    #[doc(hidden)]
    fn load(&self, backing: &Backing<T>) -> Self::Value;

    /// Read after verifying this descriptor is bound to `backing`
    ///
    /// # Errors
    /// Returns [`AccessError`] if the descriptor is unbound, foreign or stale
    fn get(&self, backing: &Backing<T>) -> Result<Self::Value, AccessError> {
        self.base().verify_owner(backing.owner_ref())?;
        Ok(self.load(backing))
    }
}

/// Descriptor writable against backing type `T`
pub trait FieldMut<T>: Field<T> {
    /// Write through the backing store without checking ownership
    #[doc(hidden)]
    fn store(&self, backing: &mut Backing<T>, value: Self::Value);

    /// Write after verifying this descriptor is bound to `backing`
    ///
    /// # Errors
    /// Returns [`AccessError`] if the descriptor is unbound, foreign or stale
    fn set(&self, backing: &mut Backing<T>, value: Self::Value) -> Result<(), AccessError> {
        self.base().verify_owner(backing.owner_ref())?;
        self.store(backing, value);
        Ok(())
    }
}

/// A set of descriptors a view can discover
///
/// Every descriptor is a one-element set. Property structs visit each of
/// their fields, which lets groups nest to any depth.
pub trait Properties {
    /// Call `visitor` once for every descriptor in this set
    ///
    /// Must visit the same descriptors every time. A view calls this more
    /// than once per bind: first to check backing types, then to bind.
    fn visit(&self, visitor: &mut dyn FnMut(&dyn Descriptor));

    /// Number of descriptors in this set
    fn descriptor_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_| count += 1);
        count
    }
}

impl Properties for () {
    fn visit(&self, _visitor: &mut dyn FnMut(&dyn Descriptor)) {}
}

impl<P: Properties> Properties for Option<P> {
    fn visit(&self, visitor: &mut dyn FnMut(&dyn Descriptor)) {
        if let Some(inner) = self {
            inner.visit(visitor);
        }
    }
}

impl<P: Properties> Properties for Vec<P> {
    fn visit(&self, visitor: &mut dyn FnMut(&dyn Descriptor)) {
        for inner in self {
            inner.visit(visitor);
        }
    }
}

/// A property set that can build itself from its declarations
pub trait Declare: Properties + Sized {
    /// Construct every descriptor, all unbound
    fn declare() -> Self;
}

impl Declare for () {
    fn declare() -> Self {}
}

/// Implements [`Descriptor`] and [`Properties`] for a descriptor kind
macro_rules! descriptor_impls {
    ($name:ident < $($param:ident),+ >) => {
        descriptor_impls!($name<$($param),+> => base);
    };
    ($name:ident < $($param:ident),+ > => $($base:ident).+) => {
        impl<$($param),+> $crate::descriptor::Descriptor for $name<$($param),+> {
            fn base(&self) -> &$crate::descriptor::DescriptorBase {
                &self.$($base).+
            }
        }

        impl<$($param),+> $crate::descriptor::Properties for $name<$($param),+> {
            fn visit(
                &self,
                visitor: &mut dyn FnMut(&dyn $crate::descriptor::Descriptor),
            ) {
                visitor(self);
            }
        }
    };
}

pub(crate) use descriptor_impls;

/// Declare a property struct
///
/// Generates the struct, its [`Properties`] discovery and its [`Declare`]
/// constructor from a single list of `field: Type = initializer` entries.
/// Fields may be descriptors or nested property structs.
///
/// ```
/// use rewrap_core::{key_path, properties, MutableBoxed, Number, OptionalBox, View};
///
/// struct Reading {
///     level: Number,
///     peak: Option<Number>,
/// }
///
/// properties! {
///     struct ReadingProps {
///         level: MutableBoxed<Reading, i32> = MutableBoxed::new(key_path!(mut Reading, level)),
///         peak: OptionalBox<Reading, f64> = OptionalBox::new(key_path!(Reading, peak)),
///     }
/// }
///
/// let mut view = View::<Reading, ReadingProps>::new(Reading {
///     level: Number::I32(4),
///     peak: None,
/// })
/// .unwrap();
///
/// view.set(|p| &p.level, 9);
/// assert_eq!(view.get(|p| &p.level), 9);
/// assert_eq!(view.get(|p| &p.peak), None);
/// ```
#[macro_export]
macro_rules! properties {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty = $init:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Properties for $name {
            fn visit(&self, visitor: &mut dyn FnMut(&dyn $crate::Descriptor)) {
                $( $crate::Properties::visit(&self.$field, visitor); )*
            }
        }

        impl $crate::Declare for $name {
            fn declare() -> Self {
                Self {
                    $( $field: $init, )*
                }
            }
        }
    };
}
