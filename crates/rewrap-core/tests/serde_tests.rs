//! Serialization Tests
//!
//! Boxed numbers keep their kind through JSON.

#![cfg(feature = "serde")]

use rewrap_core::{Number, NumberKind};
use serde_json::json;

#[test]
fn test_number_serializes_with_kind() {
    let value = serde_json::to_value(Number::U16(7)).unwrap();
    assert_eq!(value, json!({ "kind": "u16", "value": 7 }));
}

#[test]
fn test_number_deserializes_to_same_kind() {
    let number: Number = serde_json::from_value(json!({ "kind": "f64", "value": 1.5 })).unwrap();
    assert_eq!(number, Number::F64(1.5));
    assert_eq!(number.kind(), NumberKind::F64);
}

#[test]
fn test_record_of_numbers_round_trips() {
    let numbers = vec![Number::Bool(true), Number::I64(-3), Number::F32(0.25)];
    let text = serde_json::to_string(&numbers).unwrap();
    let back: Vec<Number> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, numbers);
}
