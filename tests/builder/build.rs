//! Integration tests for building keyed collections
//!
//! Tests the normalization scenarios, policies, and seed handling.

use keyfold_builder::{BuildConfig, Builder, KeyPolicy, OrderPolicy, build, build_by, normalize};
use keyfold_foundation::{BuildLimit, ErrorKind, Identified, KeyedMap, Record, Value};
use std::sync::Arc;
use std::thread;

fn user(id: i64, name: &str) -> Record {
    Record::new().with("id", id).with("name", name)
}

fn entries(map: &KeyedMap<Value, Record>) -> Vec<(i64, String)> {
    map.iter()
        .map(|(k, r)| {
            (
                k.as_int().unwrap(),
                r.get("name").and_then(Value::as_str).unwrap().to_string(),
            )
        })
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn empty_into_empty_is_empty() {
    let map = build(Vec::<Record>::new(), &KeyedMap::new()).unwrap();
    assert_eq!(map, KeyedMap::new());
}

#[test]
fn one_record_one_entry() {
    let map = normalize(vec![user(1, "A")]).unwrap();
    assert_eq!(entries(&map), vec![(1, "A".to_string())]);
}

#[test]
fn duplicate_key_resolves_to_last() {
    let map = normalize(vec![user(1, "A"), user(1, "B")]).unwrap();
    assert_eq!(entries(&map), vec![(1, "B".to_string())]);
}

#[test]
fn signed_zero_float_ids_share_a_key() {
    let map = normalize(vec![
        Record::new().with("id", 0.0).with("name", "A"),
        Record::new().with("id", -0.0).with("name", "B"),
    ])
    .unwrap();

    assert_eq!(map.len(), 1);
    let name = map
        .get(&Value::Float(0.0))
        .and_then(|r| r.get("name"))
        .and_then(Value::as_str);
    assert_eq!(name, Some("B"));
}

#[test]
fn int_and_float_ids_stay_distinct() {
    let map = normalize(vec![
        Record::new().with("id", 1).with("name", "A"),
        Record::new().with("id", 1.0).with("name", "B"),
    ])
    .unwrap();

    assert_eq!(map.len(), 2);
    assert!(map.contains_key(&Value::Int(1)));
    assert!(map.contains_key(&Value::Float(1.0)));
}

#[test]
fn chained_builds_accumulate() {
    let first = normalize(vec![user(1, "A")]).unwrap();
    let second = build(vec![user(2, "C")], &first).unwrap();

    assert_eq!(
        entries(&second),
        vec![(1, "A".to_string()), (2, "C".to_string())]
    );
}

#[test]
fn record_without_id_fails_strict() {
    let err = normalize(vec![Record::new().with("name", "no-id")]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidKey { index: 0 }));
}

#[test]
fn record_without_id_skipped_lenient() {
    let builder = Builder::new(BuildConfig::lenient());
    let map = builder
        .build(vec![Record::new().with("name", "no-id")], &KeyedMap::new())
        .unwrap();
    assert!(map.is_empty());
}

// =============================================================================
// Seeds
// =============================================================================

#[test]
fn seed_is_untouched_on_success() {
    let seed = normalize(vec![user(1, "A"), user(2, "B")]).unwrap();
    let snapshot = seed.clone();

    let result = build(vec![user(2, "Z"), user(3, "C")], &seed).unwrap();

    assert_eq!(seed, snapshot);
    assert_eq!(
        entries(&result),
        vec![
            (1, "A".to_string()),
            (2, "Z".to_string()),
            (3, "C".to_string())
        ]
    );
}

#[test]
fn seed_is_untouched_on_failure() {
    let seed = normalize(vec![user(1, "A")]).unwrap();
    let snapshot = seed.clone();

    let err = build(vec![user(1, "Z"), Record::new()], &seed).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::InvalidKey { index: 1 }));
    assert_eq!(seed, snapshot);
}

#[test]
fn records_overwrite_seed_entries() {
    let seed = normalize(vec![user(1, "A")]).unwrap();
    let map = build(vec![user(1, "B"), user(1, "C")], &seed).unwrap();
    assert_eq!(entries(&map), vec![(1, "C".to_string())]);
}

#[test]
fn shared_seed_across_threads() {
    let seed = Arc::new(normalize((0..100).map(|i| user(i, "seed"))).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let seed = Arc::clone(&seed);
            thread::spawn(move || {
                let updates = (0..10).map(|i| user(i * 10, &format!("thread-{t}")));
                build(updates, &*seed).unwrap()
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        let map = handle.join().unwrap();
        assert_eq!(map.len(), 100);
        let name = map.get(&Value::Int(0)).and_then(|r| r.get("name")).cloned();
        assert_eq!(name, Some(Value::from(format!("thread-{t}"))));
    }
    assert!(seed.values().all(|r| r.get("name") == Some(&Value::from("seed"))));
}

// =============================================================================
// Policies
// =============================================================================

#[test]
fn lenient_report_lists_skipped_indices() {
    let records = vec![
        user(1, "A"),
        Record::new(),
        user(2, "B"),
        Record::new().with("id", f64::NAN),
        user(1, "C"),
    ];
    let report = Builder::new(BuildConfig::lenient())
        .build_report(records, &KeyedMap::new())
        .unwrap();

    assert_eq!(report.skipped, vec![1, 3]);
    assert_eq!(report.merged, 3);
    assert_eq!(
        entries(&report.map),
        vec![(1, "C".to_string()), (2, "B".to_string())]
    );
}

#[test]
fn move_to_end_order() {
    let builder = Builder::new(BuildConfig::default().with_order_policy(OrderPolicy::MoveToEnd));
    let map = builder
        .build(
            vec![user(1, "A"), user(2, "B"), user(1, "C")],
            &KeyedMap::new(),
        )
        .unwrap();

    assert_eq!(
        entries(&map),
        vec![(2, "B".to_string()), (1, "C".to_string())]
    );
}

#[test]
fn limit_counts_skipped_records() {
    let config = BuildConfig::lenient().with_max_records(2);
    let err = Builder::new(config)
        .build(vec![Record::new(), Record::new(), user(1, "A")], &KeyedMap::new())
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(BuildLimit::MaxRecords { limit: 2 })
    ));
}

#[test]
fn label_attached_to_errors() {
    let config = BuildConfig::default()
        .with_key_policy(KeyPolicy::Strict)
        .with_label("comments");
    let err = Builder::new(config)
        .build(vec![Record::new()], &KeyedMap::new())
        .unwrap_err();

    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("comments"));
    assert_eq!(ctx.stack, vec!["build".to_string()]);
}

// =============================================================================
// Typed records
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct Todo {
    id: u64,
    text: String,
    done: bool,
}

impl Identified for Todo {
    type Id = u64;

    fn id(&self) -> Option<u64> {
        Some(self.id)
    }
}

fn todo(id: u64, text: &str, done: bool) -> Todo {
    Todo {
        id,
        text: text.to_string(),
        done,
    }
}

#[test]
fn typed_records_use_identified() {
    let todos = normalize(vec![
        todo(1, "write", false),
        todo(2, "test", false),
        todo(1, "write", true),
    ])
    .unwrap();

    assert_eq!(todos.len(), 2);
    assert!(todos.get(&1).unwrap().done);
    let order: Vec<_> = todos.keys().copied().collect();
    assert_eq!(order, vec![1, 2]);
}

#[test]
fn typed_records_with_custom_key() {
    let todos = vec![todo(1, "write", false), todo(2, "test", true)];
    let by_text = build_by(todos, &KeyedMap::new(), |t| Some(t.text.clone())).unwrap();

    assert_eq!(by_text.get("test").map(|t| t.id), Some(2));
}

#[test]
fn shared_records_via_arc() {
    let todos = vec![Arc::new(todo(7, "share", false))];
    let map = normalize(todos).unwrap();
    assert_eq!(map.get(&7).map(|t| t.text.as_str()), Some("share"));
}
