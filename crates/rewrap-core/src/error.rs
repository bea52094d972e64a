//! Misuse errors
//!
//! Both categories are programming errors in the code that declares or uses
//! a descriptor, never conditions of the data:
//! - [`BindError`]: a descriptor declared against one backing type was found
//!   on a view wrapping another
//! - [`AccessError`]: a descriptor was used without being bound to the view
//!   it was read or written through
//!
//! Each carries the descriptor kind and its declaration site.

use crate::descriptor::{Site, ViewId};

/// Binding failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// Descriptor backing type differs from the view's backing type
    #[error(
        "the backing type `{found}` of @{descriptor} used at {site} does not match \
         `{expected}` wrapped by this view; its key path refers to another record type"
    )]
    BackingTypeMismatch {
        descriptor: &'static str,
        site: Site,
        expected: &'static str,
        found: &'static str,
    },
}

/// Descriptor accessed through a view it is not bound to
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Never bound; declared outside any view's property set
    #[error("@{descriptor} used at {site} is not bound to a view; declare it in a property set owned by a View")]
    Unbound { descriptor: &'static str, site: Site },

    /// Bound to a different view
    #[error("@{descriptor} used at {site} belongs to view {owner}, not view {view}")]
    ForeignOwner {
        descriptor: &'static str,
        site: Site,
        owner: ViewId,
        view: ViewId,
    },

    /// Bound to a backing store this view has since replaced
    #[error("@{descriptor} used at {site} is bound to generation {bound}, view is at generation {current}")]
    StaleBinding {
        descriptor: &'static str,
        site: Site,
        bound: u64,
        current: u64,
    },
}

/// Any misuse detected by the binding engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Misuse {
    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl BindError {
    /// Kind of the offending descriptor
    #[must_use]
    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::BackingTypeMismatch { descriptor, .. } => *descriptor,
        }
    }

    /// Declaration site of the offending descriptor
    #[must_use]
    pub fn site(&self) -> Site {
        match self {
            Self::BackingTypeMismatch { site, .. } => *site,
        }
    }
}

impl AccessError {
    /// Kind of the offending descriptor
    #[must_use]
    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Unbound { descriptor, .. }
            | Self::ForeignOwner { descriptor, .. }
            | Self::StaleBinding { descriptor, .. } => *descriptor,
        }
    }

    /// Declaration site of the offending descriptor
    #[must_use]
    pub fn site(&self) -> Site {
        match self {
            Self::Unbound { site, .. }
            | Self::ForeignOwner { site, .. }
            | Self::StaleBinding { site, .. } => *site,
        }
    }
}

impl Misuse {
    /// Check if this misuse must stop the caller
    ///
    /// Always true: no misuse is recoverable by retrying.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        true
    }

    /// Kind of the offending descriptor
    #[must_use]
    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Bind(e) => e.descriptor(),
            Self::Access(e) => e.descriptor(),
        }
    }

    /// Declaration site of the offending descriptor
    #[must_use]
    pub fn site(&self) -> Site {
        match self {
            Self::Bind(e) => e.site(),
            Self::Access(e) => e.site(),
        }
    }
}

/// Abort on a misuse
///
/// Used by the panicking entry points; the message starts with
/// `API MISUSE:` followed by the diagnostic.
#[cold]
#[track_caller]
pub(crate) fn abort(misuse: impl Into<Misuse>) -> ! {
    let misuse = misuse.into();
    panic!("API MISUSE: {misuse}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_message_names_kind_and_site() {
        let site = Site::caller();
        let err = AccessError::Unbound {
            descriptor: "Redirect",
            site,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("@Redirect used at "));
        assert!(msg.contains(&site.to_string()));
    }

    #[test]
    fn mismatch_message_names_both_types() {
        let err = BindError::BackingTypeMismatch {
            descriptor: "MutableMap",
            site: Site::caller(),
            expected: "Parent",
            found: "Child",
        };
        let msg = err.to_string();
        assert!(msg.contains("`Child`"));
        assert!(msg.contains("`Parent`"));
        assert!(msg.contains("@MutableMap"));
    }

    #[test]
    fn misuse_exposes_descriptor_and_site() {
        let site = Site::caller();
        let misuse: Misuse = AccessError::StaleBinding {
            descriptor: "DefaultBox",
            site,
            bound: 0,
            current: 1,
        }
        .into();
        assert_eq!(misuse.descriptor(), "DefaultBox");
        assert_eq!(misuse.site(), site);
        assert!(misuse.is_fatal());
    }

    #[test]
    #[should_panic(expected = "API MISUSE: @Boxed used at")]
    fn abort_panics_with_diagnostic() {
        abort(AccessError::Unbound {
            descriptor: "Boxed",
            site: Site::caller(),
        });
    }
}
