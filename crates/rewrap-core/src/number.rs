//! Boxed numeric representation
//!
//! Provides [`Number`], the single container a backing record uses where it
//! cannot hold a native primitive directly, and [`Boxable`], the closed table
//! of native kinds that convert to and from it.

use std::fmt::{self, Display, Formatter};

/// Boxed numeric value
///
/// Holds any supported native primitive. Reading a `Number` back as the
/// kind it was boxed from is lossless; reading it as another kind follows
/// numeric cast semantics (see [`Boxable::unbox`]).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "snake_case"))]
pub enum Number {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
}

/// Native kind stored in a [`Number`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl NumberKind {
    /// Every kind in the conversion table
    pub const ALL: [NumberKind; 13] = [
        Self::Bool,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::Isize,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::Usize,
        Self::F32,
        Self::F64,
    ];

    /// Rust name of the native type
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Check if kind is a floating-point type
    #[inline]
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl Display for NumberKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Number {
    /// Native kind this number was boxed from
    #[must_use]
    pub const fn kind(&self) -> NumberKind {
        match self {
            Self::Bool(_) => NumberKind::Bool,
            Self::I8(_) => NumberKind::I8,
            Self::I16(_) => NumberKind::I16,
            Self::I32(_) => NumberKind::I32,
            Self::I64(_) => NumberKind::I64,
            Self::Isize(_) => NumberKind::Isize,
            Self::U8(_) => NumberKind::U8,
            Self::U16(_) => NumberKind::U16,
            Self::U32(_) => NumberKind::U32,
            Self::U64(_) => NumberKind::U64,
            Self::Usize(_) => NumberKind::Usize,
            Self::F32(_) => NumberKind::F32,
            Self::F64(_) => NumberKind::F64,
        }
    }

    /// Read as a native value of kind `V`
    #[inline]
    #[must_use]
    pub fn unbox<V: Boxable>(&self) -> V {
        V::unbox(self)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Isize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Sealed trait - the conversion table is closed
mod private {
    pub trait Sealed {}
}

/// Native primitive that converts to and from [`Number`]
///
/// Implemented for `bool`, every signed and unsigned integer width and both
/// float widths. The trait is **sealed**: the table cannot be extended
/// outside this crate.
///
/// # Contract
/// - `V::unbox(&v.boxed()) == v` for every representable `v`
/// - Unboxing a number of another kind casts: floats truncate toward zero
///   and saturate, integers wrap, any non-zero value reads as `true`, and
///   `bool` reads as `0`/`1`
pub trait Boxable: Copy + PartialEq + std::fmt::Debug + 'static + private::Sealed {
    /// Kind produced by [`Boxable::boxed`]
    const KIND: NumberKind;

    /// Box a native value
    fn boxed(self) -> Number;

    /// Unbox a number as this kind
    fn unbox(number: &Number) -> Self;
}

macro_rules! numeric_boxable {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl private::Sealed for $native {}

            impl Boxable for $native {
                const KIND: NumberKind = NumberKind::$variant;

                #[inline]
                fn boxed(self) -> Number {
                    Number::$variant(self)
                }

                #[inline]
                #[allow(
                    unreachable_patterns,
                    clippy::unnecessary_cast,
                    clippy::cast_possible_truncation,
                    clippy::cast_possible_wrap,
                    clippy::cast_precision_loss,
                    clippy::cast_sign_loss,
                    clippy::cast_lossless
                )]
                fn unbox(number: &Number) -> Self {
                    match *number {
                        Number::$variant(v) => v,
                        Number::Bool(v) => u8::from(v) as $native,
                        Number::I8(v) => v as $native,
                        Number::I16(v) => v as $native,
                        Number::I32(v) => v as $native,
                        Number::I64(v) => v as $native,
                        Number::Isize(v) => v as $native,
                        Number::U8(v) => v as $native,
                        Number::U16(v) => v as $native,
                        Number::U32(v) => v as $native,
                        Number::U64(v) => v as $native,
                        Number::Usize(v) => v as $native,
                        Number::F32(v) => v as $native,
                        Number::F64(v) => v as $native,
                    }
                }
            }

            impl From<$native> for Number {
                #[inline]
                fn from(value: $native) -> Self {
                    value.boxed()
                }
            }
        )*
    };
}

numeric_boxable! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl private::Sealed for bool {}

impl Boxable for bool {
    const KIND: NumberKind = NumberKind::Bool;

    #[inline]
    fn boxed(self) -> Number {
        Number::Bool(self)
    }

    fn unbox(number: &Number) -> Self {
        match *number {
            Number::Bool(v) => v,
            Number::I8(v) => v != 0,
            Number::I16(v) => v != 0,
            Number::I32(v) => v != 0,
            Number::I64(v) => v != 0,
            Number::Isize(v) => v != 0,
            Number::U8(v) => v != 0,
            Number::U16(v) => v != 0,
            Number::U32(v) => v != 0,
            Number::U64(v) => v != 0,
            Number::Usize(v) => v != 0,
            Number::F32(v) => v != 0.0,
            Number::F64(v) => v != 0.0,
        }
    }
}

impl From<bool> for Number {
    #[inline]
    fn from(value: bool) -> Self {
        Number::Bool(value)
    }
}
