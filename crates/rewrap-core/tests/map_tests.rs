//! Mapping Tests
//!
//! Map, MutableMap and the unit-conversion fixture.

use rewrap_test_utils::{distance_view, init_tracing, DEFAULT_DOUBLE};

fn assert_close(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 0.0001,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_map_reads() {
    init_tracing();
    let view = distance_view(10.0);

    assert_eq!(view.get(|p| &p.immutable_meters), 10.0);
    assert_eq!(view.get(|p| &p.mutable_meters), 10.0);
    assert_close(32.8084, view.get(|p| &p.immutable_feet));
    assert_close(32.8084, view.get(|p| &p.mutable_feet));
    assert_eq!(view.get(|p| &p.immutable_default_double), DEFAULT_DOUBLE);
}

#[test]
fn test_mutable_map_writes_converted_value() {
    init_tracing();
    let mut view = distance_view(10.0);

    view.set(|p| &p.mutable_feet, 3.0);
    assert_close(3.0, view.get(|p| &p.mutable_feet));
    assert_close(0.9144, view.get(|p| &p.mutable_meters));
    assert_close(0.9144, view.wrapped().mutable_meters);

    // read-only field addresses the other column
    assert_eq!(view.wrapped().immutable_meters, 10.0);
}

#[test]
fn test_map_sees_present_optional() {
    let mut view = distance_view(1.0);
    view.wrapped_mut().immutable_optional_double = Some(2.5);
    assert_eq!(view.get(|p| &p.immutable_default_double), 2.5);
}

#[test]
fn test_identity_mutable_map() {
    let mut view = distance_view(1.0);
    view.set(|p| &p.mutable_meters, 12.5);
    assert_eq!(view.wrapped().mutable_meters, 12.5);
    assert_eq!(view.get(|p| &p.mutable_meters), 12.5);
}

mod boxed_survey {
    use rewrap_core::{key_path, properties, MutableMap, MutableRedirect, Number, View};
    use rewrap_test_utils::{feet_from_meters, meters_from_feet};

    use super::assert_close;

    struct Survey {
        meters: Option<Number>,
    }

    properties! {
        struct SurveyProps {
            feet: MutableMap<Survey, Option<Number>, Option<f64>> = MutableMap::lift(
                key_path!(mut Survey, meters),
                |m: &Number| feet_from_meters(m.unbox()),
                |ft: f64| Number::F64(meters_from_feet(ft)),
            ),
            meters: MutableRedirect<Survey, Option<Number>> =
                MutableRedirect::new(key_path!(mut Survey, meters)),
        }
    }

    #[test]
    fn test_boxed_optional_meters_exposed_as_feet() {
        let mut view = View::<Survey, SurveyProps>::new(Survey {
            meters: Some(Number::F64(10.0)),
        })
        .unwrap();

        let feet = view.get(|p| &p.feet).unwrap();
        assert_close(32.8084, feet);

        view.set(|p| &p.feet, Some(3.0));
        let Some(Number::F64(meters)) = view.get(|p| &p.meters) else {
            panic!("meters must stay a boxed f64");
        };
        assert_close(0.9144, meters);
        assert_close(3.0, view.get(|p| &p.feet).unwrap());

        view.set(|p| &p.feet, None);
        assert_eq!(view.get(|p| &p.meters), None);
        assert_eq!(view.get(|p| &p.feet), None);
    }
}
