//! Rewrap Core
//!
//! Typed accessor views bound to loosely-typed backing records.
//!
//! # Core Concepts
//!
//! - [`View<T, P>`]: Owns a backing record `T` and binds every descriptor of
//!   its property set `P` to it
//! - [`Properties`]: Discovery of the descriptors a view owns, declared with
//!   [`properties!`]
//! - [`Number`]: Boxed numeric representation stored in backing records
//! - [`KeyPath`] / [`WritableKeyPath`]: Typed addresses of backing fields,
//!   built with [`key_path!`]
//! - Descriptor kinds, layered over the same backing primitives:
//!   - conversion: [`Boxed`], [`MutableBoxed`], [`OptionalBox`],
//!     [`MutableOptionalBox`]
//!   - defaulting: [`DefaultBox`], [`MutableDefaultBox`]
//!   - mapping: [`Map`], [`MutableMap`], [`Redirect`], [`MutableRedirect`]
//!
//! # Misuse
//!
//! Reading or writing through a descriptor that is not bound to the view is
//! a programming error. The panicking accessors abort with an
//! `API MISUSE:` diagnostic naming the descriptor kind and its declaration
//! site; the `try_` accessors return [`AccessError`]. A property set that
//! addresses another backing type fails construction with [`BindError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rewrap_core::{key_path, properties, DefaultBox, MutableMap, Number, View};
//!
//! properties! {
//!     struct ProfileProps {
//!         age: DefaultBox<Profile, u8> = DefaultBox::new(key_path!(Profile, age), 18),
//!         height_ft: MutableMap<Profile, f64, f64> = MutableMap::new(
//!             key_path!(mut Profile, height_m),
//!             |m: &f64| m / 0.3048,
//!             |ft: f64| ft * 0.3048,
//!         ),
//!     }
//! }
//!
//! let mut view = View::<Profile, ProfileProps>::new(profile)?;
//! let age = view.get(|p| &p.age);
//! view.set(|p| &p.height_ft, 6.0);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod backing;
mod config;
mod descriptor;
mod error;
mod number;
mod path;
mod view;

// Descriptor kinds
mod boxed;
mod default;
mod map;

// Re-exports
pub use backing::Backing;
pub use config::ViewConfig;
pub use descriptor::{
    Declare, Descriptor, DescriptorBase, Field, FieldMut, OwnerRef, Properties, Site, ViewId,
};
pub use error::{AccessError, BindError, Misuse};
pub use number::{Boxable, Number, NumberKind};
pub use path::{KeyPath, WritableKeyPath};
pub use view::View;

pub use boxed::{Boxed, MutableBoxed, MutableOptionalBox, OptionalBox};
pub use default::{DefaultBox, MutableDefaultBox};
pub use map::{Map, MutableMap, MutableRedirect, Redirect};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    struct Sample {
        count: Number,
        limit: Option<Number>,
        scale: Option<Number>,
        tag: String,
    }

    fn sample() -> Sample {
        Sample {
            count: Number::I32(1),
            limit: None,
            scale: Some(Number::F32(0.5)),
            tag: "a".to_string(),
        }
    }

    properties! {
        struct SampleProps {
            count: MutableBoxed<Sample, i32> = MutableBoxed::new(key_path!(mut Sample, count)),
            limit: MutableDefaultBox<Sample, u16> =
                MutableDefaultBox::new(key_path!(mut Sample, limit), 100),
            scale: OptionalBox<Sample, f32> = OptionalBox::new(key_path!(Sample, scale)),
            tag_len: Map<Sample, String, usize> = Map::new(key_path!(Sample, tag), String::len),
            tag: MutableRedirect<Sample, String> = MutableRedirect::new(key_path!(mut Sample, tag)),
        }
    }

    #[test]
    fn every_layer_through_one_view() {
        let mut view = View::<Sample, SampleProps>::new(sample()).unwrap();
        assert_eq!(view.bound_count(), 5);

        assert_eq!(view.get(|p| &p.count), 1);
        assert_eq!(view.get(|p| &p.limit), 100);
        assert_eq!(view.get(|p| &p.scale), Some(0.5));
        assert_eq!(view.get(|p| &p.tag_len), 1);

        view.set(|p| &p.count, 2);
        view.set(|p| &p.limit, 100);
        view.set(|p| &p.tag, "abc".to_string());

        assert_eq!(view.wrapped().count, Number::I32(2));
        assert_eq!(view.wrapped().limit, Some(Number::U16(100)));
        assert_eq!(view.get(|p| &p.tag_len), 3);
    }

    #[test]
    fn replace_then_read_sees_new_record() {
        let mut view = View::<Sample, SampleProps>::new(sample()).unwrap();
        let mut next = sample();
        next.count = Number::I64(40);
        next.limit = Some(Number::U8(7));

        view.replace(next);
        assert_eq!(view.get(|p| &p.count), 40);
        assert_eq!(view.get(|p| &p.limit), 7);
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
