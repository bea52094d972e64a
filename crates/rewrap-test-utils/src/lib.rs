//! Testing utilities for Rewrap workspace
//!
//! Shared backing records, property sets and helpers.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use rewrap_core::{
    key_path, properties, Boxed, DefaultBox, Map, MutableBoxed, MutableDefaultBox, MutableMap,
    MutableOptionalBox, MutableRedirect, Number, OptionalBox, View,
};
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

// Boxed numbers

#[derive(Debug, Clone, PartialEq)]
pub struct BoxRecord {
    pub immutable_int: Number,
    pub mutable_int: Number,
    pub immutable_optional_int: Option<Number>,
    pub mutable_optional_int: Option<Number>,
    pub immutable_default_int: Option<Number>,
    pub mutable_default_int: Option<Number>,
}

/// Record whose present fields hold `value + 1` through `value + 4`
pub fn box_record(value: i64) -> BoxRecord {
    BoxRecord {
        immutable_int: Number::I64(value + 1),
        mutable_int: Number::I64(value + 2),
        immutable_optional_int: Some(Number::I64(value + 3)),
        mutable_optional_int: Some(Number::I64(value + 4)),
        immutable_default_int: None,
        mutable_default_int: None,
    }
}

properties! {
    pub struct BoxRecordProps {
        pub immutable_int: Boxed<BoxRecord, i64> =
            Boxed::new(key_path!(BoxRecord, immutable_int)),
        pub mutable_int: MutableBoxed<BoxRecord, i64> =
            MutableBoxed::new(key_path!(mut BoxRecord, mutable_int)),
        pub immutable_optional_int: OptionalBox<BoxRecord, i64> =
            OptionalBox::new(key_path!(BoxRecord, immutable_optional_int)),
        pub mutable_optional_int: MutableOptionalBox<BoxRecord, i64> =
            MutableOptionalBox::new(key_path!(mut BoxRecord, mutable_optional_int)),
        pub immutable_default_int: DefaultBox<BoxRecord, i64> =
            DefaultBox::new(key_path!(BoxRecord, immutable_default_int), 5),
        pub mutable_default_int: MutableDefaultBox<BoxRecord, i64> =
            MutableDefaultBox::new(key_path!(mut BoxRecord, mutable_default_int), 6),
    }
}

pub type BoxRecordView = View<BoxRecord, BoxRecordProps>;

pub fn box_record_view(value: i64) -> BoxRecordView {
    View::new(box_record(value)).unwrap()
}

// Unit conversion

/// Metres in one foot
pub const METERS_PER_FOOT: f64 = 0.3048;

pub fn meters_from_feet(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

pub fn feet_from_meters(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    pub immutable_meters: f64,
    pub mutable_meters: f64,
    pub immutable_optional_double: Option<f64>,
}

pub fn distance(meters: f64) -> Distance {
    Distance {
        immutable_meters: meters,
        mutable_meters: meters,
        immutable_optional_double: None,
    }
}

/// Fallback read through [`DistanceProps::immutable_default_double`]
pub const DEFAULT_DOUBLE: f64 = 3.14159;

properties! {
    pub struct DistanceProps {
        pub immutable_meters: Map<Distance, f64, f64> =
            Map::new(key_path!(Distance, immutable_meters), |m: &f64| *m),
        pub mutable_meters: MutableMap<Distance, f64, f64> = MutableMap::new(
            key_path!(mut Distance, mutable_meters),
            |m: &f64| *m,
            |m: f64| m,
        ),
        pub immutable_feet: Map<Distance, f64, f64> =
            Map::new(key_path!(Distance, immutable_meters), |m: &f64| feet_from_meters(*m)),
        pub mutable_feet: MutableMap<Distance, f64, f64> = MutableMap::new(
            key_path!(mut Distance, mutable_meters),
            |m: &f64| feet_from_meters(*m),
            meters_from_feet,
        ),
        pub immutable_default_double: Map<Distance, Option<f64>, f64> = Map::new(
            key_path!(Distance, immutable_optional_double),
            |d: &Option<f64>| d.unwrap_or(DEFAULT_DOUBLE),
        ),
    }
}

pub type DistanceView = View<Distance, DistanceProps>;

pub fn distance_view(meters: f64) -> DistanceView {
    View::new(distance(meters)).unwrap()
}

// Adapter scenario

#[derive(Debug, Clone, PartialEq)]
pub struct XyzChildModel {
    pub name: Option<String>,
    pub birthday_seconds: Option<Number>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XyzDataModel {
    pub is_enabled: Option<Number>,
    pub average_score: Option<Number>,
    pub children: Vec<XyzChildModel>,
}

pub fn child(name: &str, birthday_seconds: f64) -> XyzChildModel {
    XyzChildModel {
        name: Some(name.to_string()),
        birthday_seconds: Some(Number::F64(birthday_seconds)),
    }
}

/// `None` when the timestamp is outside the representable date range
#[allow(clippy::cast_possible_truncation)]
pub fn date_from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

#[allow(clippy::cast_precision_loss)]
pub fn seconds_from_date(date: DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64 / 1000.0
}

properties! {
    pub struct ChildModelProps {
        pub name: MutableRedirect<XyzChildModel, Option<String>> =
            MutableRedirect::new(key_path!(mut XyzChildModel, name)),
        pub birthday: MutableMap<XyzChildModel, Option<Number>, Option<DateTime<Utc>>> =
            MutableMap::new(
                key_path!(mut XyzChildModel, birthday_seconds),
                |seconds: &Option<Number>| {
                    seconds.as_ref().and_then(|s| date_from_seconds(s.unbox()))
                },
                |date: Option<DateTime<Utc>>| date.map(|d| Number::F64(seconds_from_date(d))),
            ),
    }
}

pub type ChildModelAdapter = View<XyzChildModel, ChildModelProps>;

/// Wrap each child record in its own adapter
pub fn child_adapters(children: &[XyzChildModel]) -> Vec<ChildModelAdapter> {
    children
        .iter()
        .map(|child| View::new(child.clone()).expect("child properties address XyzChildModel"))
        .collect()
}

properties! {
    pub struct DataModelProps {
        pub is_enabled: MutableDefaultBox<XyzDataModel, bool> =
            MutableDefaultBox::new(key_path!(mut XyzDataModel, is_enabled), false),
        pub average_score: DefaultBox<XyzDataModel, f64> =
            DefaultBox::new(key_path!(XyzDataModel, average_score), 0.0),
        pub children: Map<XyzDataModel, Vec<XyzChildModel>, Vec<ChildModelAdapter>> =
            Map::new(key_path!(XyzDataModel, children), |children: &Vec<XyzChildModel>| {
                child_adapters(children)
            }),
    }
}

pub type DataModelAdapter = View<XyzDataModel, DataModelProps>;

pub fn data_model() -> XyzDataModel {
    XyzDataModel {
        is_enabled: None,
        average_score: Some(Number::F32(4.5)),
        children: vec![child("Ada", 0.0), child("Grace", 86_400.5)],
    }
}
