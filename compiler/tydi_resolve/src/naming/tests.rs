use super::*;
use crate::logic_types::resolve_logic_types;
use crate::test_support::{id, ingested, name};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn pass1(value: Value) -> (Graph, Deduplicator) {
    let mut graph = ingested(value);
    let mut dedup = Deduplicator::new();
    resolve_logic_types(&mut graph, &mut dedup).unwrap();
    (graph, dedup)
}

#[test]
fn last_alias_wins() {
    let (mut graph, mut dedup) = pass1(json!({"logic_types": {
        "package_p__A": {"type": "Ref", "value": "package_p__B"},
        "package_p__B": {"type": "Ref", "value": "package_p__C", "aliases": ["x"]},
        "package_p__C": {"type": "Bit", "value": 8},
        "package_p__D": {"type": "Ref", "value": "package_p__C", "aliases": ["y"]}
    }}));
    promote_aliases(&mut graph, &mut dedup);

    let c = graph.logic_type(id(&graph, "package_p__C"));
    assert_eq!(c.name, "y");
    assert_eq!(c.original_name.as_deref(), Some("C"));

    // Ref entities keep their own names.
    assert_eq!(name(&graph, id(&graph, "package_p__B")), "B");
}

#[test]
fn instance_scope_suffixes_and_rechecks() {
    let (mut graph, mut dedup) = pass1(json!({"logic_types": {
        "instance_i1__T": {"type": "Bit", "value": 1},
        "instance_i2__T": {"type": "Bit", "value": 2},
        "package_p__R1": {"type": "Ref", "value": "instance_i1__T", "aliases": ["Word"]},
        "package_p__R2": {"type": "Ref", "value": "instance_i2__T", "aliases": ["Word"]}
    }}));
    // Same name and kind: the second instance's T is a duplicate after Pass 1.
    assert!(!graph.logic_type(id(&graph, "instance_i2__T")).unique);

    promote_aliases(&mut graph, &mut dedup);
    let first = graph.logic_type(id(&graph, "instance_i1__T"));
    let second = graph.logic_type(id(&graph, "instance_i2__T"));
    assert_eq!(first.name, "Word_i1");
    assert_eq!(second.name, "Word_i2");
    assert!(first.unique);
    assert!(second.unique);
}

#[test]
fn earlier_duplicates_are_not_retargeted() {
    let (mut graph, mut dedup) = pass1(json!({"logic_types": {
        "package_p__Bit1": {"type": "Bit", "value": 1},
        "package_p__Bit2": {"type": "Bit", "value": 2},
        "package_a__S": {"type": "Stream", "value": {
            "stream_type": "package_p__Bit1", "user_type": "package_p__Bit1"}},
        "package_b__S": {"type": "Stream", "value": {
            "stream_type": "package_p__Bit2", "user_type": "package_p__Bit2"}},
        "package_p__Named": {"type": "Ref", "value": "package_a__S", "aliases": ["Renamed"]}
    }}));
    promote_aliases(&mut graph, &mut dedup);

    let canonical = graph.logic_type(id(&graph, "package_a__S"));
    let duplicate = graph.logic_type(id(&graph, "package_b__S"));
    assert_eq!(canonical.name, "Renamed");
    // The duplicate keeps the old name, its non-unique status and the
    // canonical's links, although no unique "S" remains.
    assert_eq!(duplicate.name, "S");
    assert!(!duplicate.unique);
    assert_eq!(duplicate.as_stream(), canonical.as_stream());
}

#[test]
fn generated_streams_are_auto_named() {
    let (mut graph, mut dedup) = pass1(json!({"logic_types": {
        "package_p__Foo": {"type": "Bit", "value": 4},
        "package_p__Null1": {"type": "Null"},
        "package_p__generated_1": {"type": "Stream", "value": {
            "stream_type": "package_p__Foo", "user_type": "package_p__Null1", "complexity": 2}},
        "package_p__generated_2": {"type": "Stream", "value": {
            "stream_type": "package_p__Foo", "user_type": "package_p__Null1", "complexity": 2}},
        "package_p__Kept": {"type": "Stream", "value": {
            "stream_type": "package_p__Foo", "user_type": "package_p__Null1"}}
    }}));
    auto_name_streams(&mut graph, &mut dedup).unwrap();

    let first = graph.logic_type(id(&graph, "package_p__generated_1"));
    let second = graph.logic_type(id(&graph, "package_p__generated_2"));
    assert_eq!(first.name, "stream_Foo_c2");
    assert_eq!(first.original_name.as_deref(), Some("generated_1"));
    assert!(first.unique);
    assert_eq!(second.name, "stream_Foo_c2");
    assert!(!second.unique);
    assert_eq!(name(&graph, id(&graph, "package_p__Kept")), "Kept");
}

#[test]
fn front_end_temporary_stream_is_auto_named() {
    let (mut graph, mut dedup) = pass1(json!({"logic_types": {
        "package_p__Foo": {"type": "Bit", "value": 4},
        "package_p__Null1": {"type": "Null"},
        "generated_0__stream": {"type": "Stream", "value": {
            "stream_type": "package_p__Foo", "user_type": "package_p__Null1", "complexity": 2}}
    }}));
    let stream = id(&graph, "generated_0__stream");
    assert_eq!(name(&graph, stream), "generated_0__stream");

    auto_name_streams(&mut graph, &mut dedup).unwrap();
    let ty = graph.logic_type(stream);
    assert_eq!(ty.name, "stream_Foo_c2");
    assert_eq!(ty.original_name.as_deref(), Some("generated_0__stream"));
}
