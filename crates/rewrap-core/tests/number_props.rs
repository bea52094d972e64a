//! Number Property Tests
//!
//! Round-trip law of the conversion layer and invertibility of mapped
//! fields.

use proptest::prelude::*;
use rewrap_core::{Boxable, Number, NumberKind};
use rewrap_test_utils::{distance_view, feet_from_meters, meters_from_feet};

fn round_trips<V: Boxable>(value: V) -> bool {
    let boxed = value.boxed();
    boxed.kind() == V::KIND && V::unbox(&boxed) == value
}

#[test]
fn test_every_kind_round_trips() {
    assert!(round_trips(true));
    assert!(round_trips(1.0_f64));
    assert!(round_trips(2.0_f32));
    assert!(round_trips(3_isize));
    assert!(round_trips(4_i8));
    assert!(round_trips(5_i16));
    assert!(round_trips(6_i32));
    assert!(round_trips(7_i64));
    assert!(round_trips(8_usize));
    assert!(round_trips(9_u8));
    assert!(round_trips(10_u16));
    assert!(round_trips(11_u32));
    assert!(round_trips(12_u64));
    assert_eq!(NumberKind::ALL.len(), 13);
}

#[test]
fn test_absent_is_not_zero() {
    let absent: Option<Number> = None;
    assert_eq!(absent.as_ref().map(i32::unbox), None);
}

proptest! {
    #[test]
    fn prop_integers_round_trip(a in any::<i8>(), b in any::<i16>(), c in any::<i32>(), d in any::<i64>()) {
        prop_assert!(round_trips(a));
        prop_assert!(round_trips(b));
        prop_assert!(round_trips(c));
        prop_assert!(round_trips(d));
    }

    #[test]
    fn prop_unsigned_round_trip(a in any::<u8>(), b in any::<u16>(), c in any::<u32>(), d in any::<u64>(), e in any::<usize>()) {
        prop_assert!(round_trips(a));
        prop_assert!(round_trips(b));
        prop_assert!(round_trips(c));
        prop_assert!(round_trips(d));
        prop_assert!(round_trips(e));
    }

    #[test]
    fn prop_floats_round_trip_bitwise(a in any::<f32>(), b in any::<f64>()) {
        prop_assert_eq!(f32::unbox(&a.boxed()).to_bits(), a.to_bits());
        prop_assert_eq!(f64::unbox(&b.boxed()).to_bits(), b.to_bits());
    }

    #[test]
    fn prop_bool_round_trip(flag in any::<bool>()) {
        prop_assert!(round_trips(flag));
    }

    #[test]
    fn prop_feet_written_are_feet_read(feet in -1.0e6f64..1.0e6) {
        let mut view = distance_view(0.0);
        view.set(|p| &p.mutable_feet, feet);

        let read = view.get(|p| &p.mutable_feet);
        prop_assert!((read - feet).abs() <= 1e-9 * feet.abs().max(1.0));

        let meters = view.wrapped().mutable_meters;
        prop_assert!((meters - meters_from_feet(feet)).abs() <= f64::EPSILON * meters.abs().max(1.0));
        prop_assert!((feet_from_meters(meters) - read).abs() <= f64::EPSILON);
    }
}
