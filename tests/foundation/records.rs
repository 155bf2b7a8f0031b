//! Integration tests for Record and Value
//!
//! Tests field access, persistence, and identifier rules.

use keyfold_foundation::{FieldKey, Identified, LtMap, Record, Value};
use std::collections::HashSet;

// =============================================================================
// Records
// =============================================================================

#[test]
fn record_fields_iterate_all() {
    let r = Record::new().with("id", 1).with("name", "A").with("admin", true);

    let mut fields: Vec<_> = r.fields().map(|(k, _)| k.to_string()).collect();
    fields.sort();
    assert_eq!(fields, vec!["admin", "id", "name"]);
}

#[test]
fn record_equality_ignores_field_order() {
    let r1 = Record::new().with("id", 1).with("name", "A");
    let r2 = Record::new().with("name", "A").with("id", 1);
    assert_eq!(r1, r2);

    let set: HashSet<Record> = [r1, r2].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn record_nested_payload() {
    let address: LtMap<Value, Value> = LtMap::new()
        .insert(Value::from("city"), Value::from("Oslo"))
        .insert(Value::from("zip"), Value::from("0150"));
    let r = Record::new()
        .with("id", "u-1")
        .with("address", Value::Map(address))
        .with("roles", vec!["admin", "ops"]);

    assert_eq!(r.id(), Some(Value::from("u-1")));
    let roles = r.get("roles").and_then(Value::as_vec).unwrap();
    assert_eq!(roles.len(), 2);
    let city = r
        .get("address")
        .and_then(Value::as_map)
        .and_then(|m| m.get(&Value::from("city")));
    assert_eq!(city, Some(&Value::from("Oslo")));
}

#[test]
fn record_scalar_payload() {
    let r = Record::new()
        .with("id", 1)
        .with("deleted_at", None::<i64>)
        .with("admin", true)
        .with("score", 2.5);

    assert!(r.get("deleted_at").is_some_and(Value::is_nil));
    assert!(!r.get("id").is_some_and(Value::is_nil));
    assert_eq!(r.get("admin").and_then(Value::as_bool), Some(true));
    assert_eq!(r.get("score").and_then(Value::as_float), Some(2.5));
    assert_eq!(r.get("score").and_then(Value::as_int), None);
    assert_eq!(r.get("id").and_then(Value::as_float), None);
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn identifier_kinds() {
    assert_eq!(Record::new().with("id", 1).id(), Some(Value::Int(1)));
    assert_eq!(Record::new().with("id", "a").id(), Some(Value::from("a")));
    assert_eq!(Record::new().with("id", true).id(), Some(Value::Bool(true)));
    assert_eq!(Record::new().with("id", 0.5).id(), Some(Value::Float(0.5)));
}

#[test]
fn identifier_rejections() {
    assert_eq!(Record::new().id(), None);
    assert_eq!(Record::new().with("id", None::<i64>).id(), None);
    assert_eq!(Record::new().with("id", f64::NAN).id(), None);
    assert_eq!(
        Record::new().with("id", Value::Map(LtMap::new())).id(),
        None
    );
}

#[test]
fn field_key_ignores_id() {
    let by_email = FieldKey::new("email");
    let r = Record::new().with("id", 1);
    assert_eq!(by_email.extract(&r), None);
}

#[test]
fn value_type_names() {
    assert_eq!(Value::Nil.type_name(), "nil");
    assert_eq!(Value::Int(1).type_name(), "int");
    assert_eq!(Value::from("s").type_name(), "string");
    assert_eq!(Value::from(vec![1]).type_name(), "vec");
}
