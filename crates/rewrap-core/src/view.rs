//! View and binder
//!
//! A [`View`] owns one backing record and one property set. Construction
//! and every replacement of the record run discovery over the property set
//! and bind each descriptor to the current store, so a descriptor can never
//! reach a record its view no longer holds.

use std::any::{type_name, TypeId};
use std::fmt::{self, Debug, Formatter};

use crate::backing::Backing;
use crate::config::ViewConfig;
use crate::descriptor::{Declare, Descriptor, Field, FieldMut, OwnerRef, Properties, ViewId};
use crate::error::{abort, AccessError, BindError};
use crate::path::short_type_name;

/// Typed view over a backing record of type `T`
///
/// `P` is the property set: a struct of descriptors (usually declared with
/// [`properties!`](crate::properties)) whose fields all address `T`.
///
/// # Binding states
/// - construction binds every descriptor (generation 0)
/// - [`View::replace`] rebinds every descriptor to the new record
///   (generation + 1)
/// - dropping the view drops its descriptors with it
///
/// # Example
/// ```rust,ignore
/// let mut view = View::<Record, RecordProps>::new(record)?;
/// let feet = view.get(|p| &p.feet);
/// view.set(|p| &p.feet, 3.0);
/// ```
pub struct View<T, P> {
    backing: Backing<T>,
    properties: P,
    config: ViewConfig,
    bound: usize,
}

impl<T: 'static, P: Properties> View<T, P> {
    /// Wrap `wrapped` with a freshly declared property set
    ///
    /// # Errors
    /// Returns [`BindError`] if any declared descriptor addresses a backing
    /// type other than `T`
    pub fn new(wrapped: T) -> Result<Self, BindError>
    where
        P: Declare,
    {
        Self::with_properties(wrapped, P::declare())
    }

    /// Wrap `wrapped` with an explicit property set
    ///
    /// # Errors
    /// Returns [`BindError`] on backing type mismatch
    pub fn with_properties(wrapped: T, properties: P) -> Result<Self, BindError> {
        Self::with_config(wrapped, properties, ViewConfig::default())
    }

    /// Wrap `wrapped` with an explicit property set and configuration
    ///
    /// Every descriptor is type-checked before any is bound.
    ///
    /// # Errors
    /// Returns [`BindError`] on backing type mismatch
    pub fn with_config(wrapped: T, properties: P, config: ViewConfig) -> Result<Self, BindError> {
        check_backing_types::<T>(&properties, label_of::<P>(&config))?;

        let mut view = Self {
            backing: Backing::new(wrapped),
            properties,
            config,
            bound: 0,
        };
        view.bind();
        Ok(view)
    }

    /// Swap in a new backing record and rebind every descriptor
    ///
    /// Returns the previous record.
    pub fn replace(&mut self, wrapped: T) -> T {
        let previous = self.backing.replace(wrapped);
        self.bind();
        previous
    }

    fn bind(&mut self) {
        let owner = self.backing.owner_ref();
        let mut bound = 0;
        self.properties.visit(&mut |descriptor| {
            descriptor.base().bind(owner);
            bound += 1;
        });
        self.bound = bound;

        tracing::debug!(
            view = %self.label(),
            id = %owner.view,
            generation = owner.generation,
            descriptors = bound,
            "bound view"
        );
    }

    /// Read a field of this view's property set
    ///
    /// # Panics
    /// Panics with an `API MISUSE` diagnostic if the selected descriptor is
    /// not bound to this view
    #[track_caller]
    pub fn get<D, F>(&self, select: F) -> D::Value
    where
        D: Field<T>,
        F: FnOnce(&P) -> &D,
    {
        self.read(select(&self.properties))
    }

    /// Read a field of this view's property set
    ///
    /// # Errors
    /// Returns [`AccessError`] if the selected descriptor is not bound to
    /// this view
    pub fn try_get<D, F>(&self, select: F) -> Result<D::Value, AccessError>
    where
        D: Field<T>,
        F: FnOnce(&P) -> &D,
    {
        self.try_read(select(&self.properties))
    }

    /// Write a field of this view's property set
    ///
    /// # Panics
    /// Panics with an `API MISUSE` diagnostic if the selected descriptor is
    /// not bound to this view
    #[track_caller]
    pub fn set<D, F>(&mut self, select: F, value: D::Value)
    where
        D: FieldMut<T>,
        F: FnOnce(&P) -> &D,
    {
        if let Err(err) = self.try_set(select, value) {
            abort(err);
        }
    }

    /// Write a field of this view's property set
    ///
    /// # Errors
    /// Returns [`AccessError`] if the selected descriptor is not bound to
    /// this view
    pub fn try_set<D, F>(&mut self, select: F, value: D::Value) -> Result<(), AccessError>
    where
        D: FieldMut<T>,
        F: FnOnce(&P) -> &D,
    {
        let descriptor = select(&self.properties);
        Self::store(&mut self.backing, &self.config, descriptor, value)
    }

    /// Read through any descriptor
    ///
    /// # Panics
    /// Panics with an `API MISUSE` diagnostic if `descriptor` is not bound to
    /// this view
    #[track_caller]
    pub fn read<D: Field<T>>(&self, descriptor: &D) -> D::Value {
        match self.try_read(descriptor) {
            Ok(value) => value,
            Err(err) => abort(err),
        }
    }

    /// Read through any descriptor
    ///
    /// # Errors
    /// Returns [`AccessError`] if `descriptor` is not bound to this view
    pub fn try_read<D: Field<T>>(&self, descriptor: &D) -> Result<D::Value, AccessError> {
        if self.config.trace_access {
            trace_access(self.label(), descriptor, "read");
        }
        descriptor
            .get(&self.backing)
            .map_err(|err| report(self.label(), err))
    }

    /// Write through any descriptor
    ///
    /// # Panics
    /// Panics with an `API MISUSE` diagnostic if `descriptor` is not bound to
    /// this view
    #[track_caller]
    pub fn write<D: FieldMut<T>>(&mut self, descriptor: &D, value: D::Value) {
        if let Err(err) = self.try_write(descriptor, value) {
            abort(err);
        }
    }

    /// Write through any descriptor
    ///
    /// # Errors
    /// Returns [`AccessError`] if `descriptor` is not bound to this view
    pub fn try_write<D: FieldMut<T>>(
        &mut self,
        descriptor: &D,
        value: D::Value,
    ) -> Result<(), AccessError> {
        Self::store(&mut self.backing, &self.config, descriptor, value)
    }

    fn store<D: FieldMut<T>>(
        backing: &mut Backing<T>,
        config: &ViewConfig,
        descriptor: &D,
        value: D::Value,
    ) -> Result<(), AccessError> {
        let label = label_of::<P>(config);
        if config.trace_access {
            trace_access(label, descriptor, "write");
        }
        descriptor
            .set(backing, value)
            .map_err(|err| report(label, err))
    }

    /// Number of descriptors bound by the last bind
    #[inline]
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bound
    }
}

impl<T, P> View<T, P> {
    /// Identity of this view
    #[inline]
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.backing.id()
    }

    /// Number of backing-record replacements so far
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.backing.generation()
    }

    /// Handle every bound descriptor currently holds
    #[inline]
    #[must_use]
    pub fn owner_ref(&self) -> OwnerRef {
        self.backing.owner_ref()
    }

    /// The backing record
    #[inline]
    #[must_use]
    pub fn wrapped(&self) -> &T {
        self.backing.wrapped()
    }

    /// The backing record, for direct edits
    ///
    /// Edits in place keep the current binding; use [`View::replace`] to
    /// swap in a different record.
    #[inline]
    pub fn wrapped_mut(&mut self) -> &mut T {
        self.backing.wrapped_mut()
    }

    /// The property set
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &P {
        &self.properties
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Name used in log events
    #[must_use]
    pub fn label(&self) -> &str {
        label_of::<P>(&self.config)
    }

    /// Release the view and return its backing record
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.backing.into_inner()
    }
}

impl<T: Debug, P> Debug for View<T, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("label", &self.label())
            .field("owner", &self.owner_ref())
            .field("bound", &self.bound)
            .field("wrapped", self.wrapped())
            .finish()
    }
}

fn label_of<P>(config: &ViewConfig) -> &str {
    config
        .label
        .as_deref()
        .unwrap_or_else(|| short_type_name(type_name::<P>()))
}

fn check_backing_types<T: 'static>(
    properties: &impl Properties,
    label: &str,
) -> Result<(), BindError> {
    let expected = TypeId::of::<T>();
    let mut mismatch = None;
    properties.visit(&mut |descriptor| {
        if mismatch.is_none() && descriptor.backing_type() != expected {
            mismatch = Some(BindError::BackingTypeMismatch {
                descriptor: descriptor.kind(),
                site: descriptor.site(),
                expected: short_type_name(type_name::<T>()),
                found: descriptor.backing_type_name(),
            });
        }
    });

    match mismatch {
        Some(err) => {
            tracing::error!(view = %label, "API MISUSE: {err}");
            Err(err)
        }
        None => Ok(()),
    }
}

fn report(label: &str, err: AccessError) -> AccessError {
    tracing::error!(view = %label, "API MISUSE: {err}");
    err
}

fn trace_access(label: &str, descriptor: &dyn Descriptor, op: &str) {
    tracing::trace!(
        view = %label,
        descriptor = descriptor.kind(),
        site = %descriptor.site(),
        "{op}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key_path, properties, MutableBoxed, MutableRedirect, Number, OptionalBox, Redirect};

    struct Gauge {
        pressure: Number,
        peak: Option<Number>,
        unit: String,
    }

    struct Other {
        unit: String,
    }

    fn gauge(pressure: i32) -> Gauge {
        Gauge {
            pressure: Number::I32(pressure),
            peak: None,
            unit: "kPa".to_string(),
        }
    }

    properties! {
        struct GaugeProps {
            pressure: MutableBoxed<Gauge, i32> = MutableBoxed::new(key_path!(mut Gauge, pressure)),
            peak: OptionalBox<Gauge, f64> = OptionalBox::new(key_path!(Gauge, peak)),
            unit: MutableRedirect<Gauge, String> = MutableRedirect::new(key_path!(mut Gauge, unit)),
        }
    }

    properties! {
        struct MixedProps {
            pressure: MutableBoxed<Gauge, i32> = MutableBoxed::new(key_path!(mut Gauge, pressure)),
            unit: Redirect<Other, String> = Redirect::new(key_path!(Other, unit)),
        }
    }

    properties! {
        struct NestedProps {
            inner: GaugeProps = GaugeProps::declare(),
            extra: Vec<Redirect<Gauge, String>> = vec![
                Redirect::new(key_path!(Gauge, unit)),
                Redirect::new(key_path!(Gauge, unit)),
            ],
        }
    }

    fn owners(props: &impl Properties) -> Vec<Option<OwnerRef>> {
        let mut out = Vec::new();
        props.visit(&mut |d| out.push(d.owner()));
        out
    }

    #[test]
    fn construction_binds_every_descriptor() {
        let view = View::<Gauge, GaugeProps>::new(gauge(1)).unwrap();
        assert_eq!(view.bound_count(), 3);
        assert_eq!(view.generation(), 0);
        for owner in owners(view.properties()) {
            assert_eq!(owner, Some(view.owner_ref()));
        }
    }

    #[test]
    fn get_and_set_through_selectors() {
        let mut view = View::<Gauge, GaugeProps>::new(gauge(7)).unwrap();
        assert_eq!(view.get(|p| &p.pressure), 7);
        assert_eq!(view.get(|p| &p.peak), None);

        view.set(|p| &p.pressure, 11);
        view.set(|p| &p.unit, "bar".to_string());
        assert_eq!(view.wrapped().pressure, Number::I32(11));
        assert_eq!(view.get(|p| &p.unit), "bar");
    }

    #[test]
    fn replace_rebinds_to_new_store() {
        let mut view = View::<Gauge, GaugeProps>::new(gauge(1)).unwrap();
        let id = view.id();

        let old = view.replace(gauge(2));
        assert_eq!(old.pressure, Number::I32(1));
        assert_eq!(view.id(), id);
        assert_eq!(view.generation(), 1);
        assert_eq!(view.get(|p| &p.pressure), 2);
        for owner in owners(view.properties()) {
            assert_eq!(owner, Some(view.owner_ref()));
        }
    }

    #[test]
    fn mismatched_backing_type_rejected() {
        let result = View::<Gauge, MixedProps>::new(gauge(1));
        let Err(err) = result else {
            panic!("mismatch must be rejected");
        };
        assert_eq!(err.descriptor(), "Redirect");
        assert!(matches!(
            err,
            BindError::BackingTypeMismatch {
                expected: "Gauge",
                found: "Other",
                ..
            }
        ));
    }

    #[test]
    fn nested_groups_are_discovered() {
        let view = View::<Gauge, NestedProps>::new(gauge(1)).unwrap();
        assert_eq!(view.bound_count(), 5);
        assert!(owners(view.properties()).iter().all(Option::is_some));
    }

    #[test]
    fn foreign_descriptor_rejected() {
        let first = View::<Gauge, GaugeProps>::new(gauge(1)).unwrap();
        let second = View::<Gauge, GaugeProps>::new(gauge(2)).unwrap();
        let result = second.try_read(&first.properties().pressure);
        assert!(matches!(result, Err(AccessError::ForeignOwner { .. })));
    }

    #[test]
    fn unbound_descriptor_rejected() {
        let view = View::<Gauge, GaugeProps>::new(gauge(1)).unwrap();
        let loose = Redirect::<Gauge, String>::new(key_path!(Gauge, unit));
        assert!(matches!(
            view.try_read(&loose),
            Err(AccessError::Unbound {
                descriptor: "Redirect",
                ..
            })
        ));
    }

    #[test]
    fn label_defaults_to_property_set_name() {
        let view = View::<Gauge, GaugeProps>::new(gauge(1)).unwrap();
        assert_eq!(view.label(), "GaugeProps");

        let labelled = View::with_config(
            gauge(1),
            GaugeProps::declare(),
            ViewConfig::new().with_label("boiler").with_access_tracing(true),
        )
        .unwrap();
        assert_eq!(labelled.label(), "boiler");
        assert_eq!(labelled.get(|p| &p.pressure), 1);
    }

    #[test]
    fn into_inner_returns_record() {
        let mut view = View::<Gauge, GaugeProps>::new(gauge(4)).unwrap();
        view.wrapped_mut().unit = "psi".to_string();
        let record = view.into_inner();
        assert_eq!(record.unit, "psi");
    }
}
