//! Key paths for addressing fields of a backing record
//!
//! Provides [`KeyPath`] and [`WritableKeyPath`], typed addresses of a single
//! field inside a backing type, and the [`key_path!`](crate::key_path) macro
//! that builds them from plain field syntax.

use std::fmt::{self, Debug, Display, Formatter};

/// Read-only address of a `V` field inside `T`
///
/// Pairs a projection with the dotted field name used in diagnostics.
/// Cheap to copy.
///
/// # Examples
/// - `key_path!(Sensor, reading)` → `Sensor.reading`
/// - `key_path!(Sensor, calibration.offset)` → `Sensor.calibration.offset`
pub struct KeyPath<T, V> {
    name: &'static str,
    project: fn(&T) -> &V,
}

impl<T, V> KeyPath<T, V> {
    /// Create path from field name and projection
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str, project: fn(&T) -> &V) -> Self {
        Self { name, project }
    }

    /// Dotted field name, without the backing type
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Field name segments from outermost to innermost
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &'static str> {
        self.name.split('.')
    }

    /// Full type name of the backing record
    #[inline]
    #[must_use]
    pub fn backing_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    /// Project the field out of a record
    #[inline]
    pub fn get<'a>(&self, root: &'a T) -> &'a V {
        (self.project)(root)
    }
}

impl<T, V> Clone for KeyPath<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for KeyPath<T, V> {}

impl<T, V> Debug for KeyPath<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyPath").field(&self.to_string()).finish()
    }
}

impl<T, V> Display for KeyPath<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", short_type_name(self.backing_type_name()), self.name)
    }
}

/// Read-write address of a `V` field inside `T`
pub struct WritableKeyPath<T, V> {
    path: KeyPath<T, V>,
    project_mut: fn(&mut T) -> &mut V,
}

impl<T, V> WritableKeyPath<T, V> {
    /// Create path from field name and both projections
    #[inline]
    #[must_use]
    pub const fn new(
        name: &'static str,
        project: fn(&T) -> &V,
        project_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self {
            path: KeyPath::new(name, project),
            project_mut,
        }
    }

    /// Read-only view of this path
    #[inline]
    #[must_use]
    pub const fn read_only(&self) -> KeyPath<T, V> {
        self.path
    }

    /// Dotted field name
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.path.name
    }

    /// Project the field out of a record
    #[inline]
    pub fn get<'a>(&self, root: &'a T) -> &'a V {
        self.path.get(root)
    }

    /// Project the field out of a record for writing
    #[inline]
    pub fn get_mut<'a>(&self, root: &'a mut T) -> &'a mut V {
        (self.project_mut)(root)
    }
}

impl<T, V> Clone for WritableKeyPath<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for WritableKeyPath<T, V> {}

impl<T, V> Debug for WritableKeyPath<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WritableKeyPath")
            .field(&self.path.to_string())
            .finish()
    }
}

impl<T, V> Display for WritableKeyPath<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.path, f)
    }
}

impl<T, V> From<WritableKeyPath<T, V>> for KeyPath<T, V> {
    fn from(path: WritableKeyPath<T, V>) -> Self {
        path.path
    }
}

/// Last path segment of a fully qualified type name
///
/// Keeps generic arguments intact: `a::b::Rec<c::D>` → `Rec<c::D>`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// Build a [`KeyPath`] or [`WritableKeyPath`] from field syntax
///
/// ```
/// use rewrap_core::{key_path, KeyPath, WritableKeyPath};
///
/// struct Inner { depth: f64 }
/// struct Probe { id: u32, inner: Inner }
///
/// let id: KeyPath<Probe, u32> = key_path!(Probe, id);
/// let depth: WritableKeyPath<Probe, f64> = key_path!(mut Probe, inner.depth);
///
/// let mut probe = Probe { id: 7, inner: Inner { depth: 1.5 } };
/// *depth.get_mut(&mut probe) = 2.5;
/// assert_eq!(*id.get(&probe), 7);
/// assert_eq!(depth.name(), "inner.depth");
/// ```
#[macro_export]
macro_rules! key_path {
    (mut $root:ty, $first:ident $(. $rest:ident)*) => {
        $crate::WritableKeyPath::<$root, _>::new(
            concat!(stringify!($first) $(, ".", stringify!($rest))*),
            |root: &$root| &root.$first $(.$rest)*,
            |root: &mut $root| &mut root.$first $(.$rest)*,
        )
    };
    ($root:ty, $first:ident $(. $rest:ident)*) => {
        $crate::KeyPath::<$root, _>::new(
            concat!(stringify!($first) $(, ".", stringify!($rest))*),
            |root: &$root| &root.$first $(.$rest)*,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Calibration {
        offset: f64,
    }

    struct Sensor {
        id: u32,
        calibration: Calibration,
    }

    fn sensor() -> Sensor {
        Sensor {
            id: 3,
            calibration: Calibration { offset: 0.5 },
        }
    }

    #[test]
    fn key_path_projects_field() {
        let path: KeyPath<Sensor, u32> = crate::key_path!(Sensor, id);
        assert_eq!(*path.get(&sensor()), 3);
        assert_eq!(path.name(), "id");
    }

    #[test]
    fn nested_key_path_segments() {
        let path: KeyPath<Sensor, f64> = crate::key_path!(Sensor, calibration.offset);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec!["calibration", "offset"]);
        assert_eq!(*path.get(&sensor()), 0.5);
    }

    #[test]
    fn writable_key_path_writes() {
        let path: WritableKeyPath<Sensor, f64> = crate::key_path!(mut Sensor, calibration.offset);
        let mut s = sensor();
        *path.get_mut(&mut s) = 4.0;
        assert_eq!(s.calibration.offset, 4.0);
        assert_eq!(*path.read_only().get(&s), 4.0);
    }

    #[test]
    fn display_uses_short_type_name() {
        let path: KeyPath<Sensor, u32> = crate::key_path!(Sensor, id);
        assert_eq!(path.to_string(), "Sensor.id");
        assert!(path.backing_type_name().ends_with("Sensor"));
    }

    #[test]
    fn writable_converts_to_read_only() {
        let path: WritableKeyPath<Sensor, u32> = crate::key_path!(mut Sensor, id);
        let read: KeyPath<Sensor, u32> = path.into();
        assert_eq!(read.name(), "id");
    }

    #[test]
    fn short_type_name_keeps_generics() {
        assert_eq!(short_type_name("a::b::Rec"), "Rec");
        assert_eq!(short_type_name("a::Rec<b::Inner>"), "Rec<b::Inner>");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
