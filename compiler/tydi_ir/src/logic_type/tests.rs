use super::*;
use crate::key::parse;
use pretty_assertions::assert_eq;

fn entity(key: &str, payload: LogicPayload) -> LogicType {
    LogicType::new(key, parse(key).unwrap(), payload)
}

#[test]
fn new_entity_takes_local_name() {
    let ty = entity("package_p__Bit1", LogicPayload::Bit { width: 8 });
    assert_eq!(ty.name, "Bit1");
    assert_eq!(ty.kind(), LogicKind::Bit);
    assert!(ty.defined());
    assert!(!ty.unique);
    assert!(ty.original_name.is_none());
}

#[test]
fn anonymous_entity_is_named_after_key() {
    let ty = entity("group_g", LogicPayload::Null);
    assert_eq!(ty.name, "group_g");
    assert!(ty.defined());
    assert!(ty.scope.is_anonymous());
}

#[test]
fn unrecognized_scope_keeps_full_key_as_name() {
    let ty = entity("generated_0__stream", LogicPayload::Null);
    assert_eq!(ty.name, "generated_0__stream");
    assert!(!ty.defined());
}

#[test]
fn kind_follows_payload() {
    let stream = StreamProps::new(LogicTypeId::new(0), LogicTypeId::new(1));
    assert_eq!(LogicPayload::Stream(stream).kind(), LogicKind::Stream);
    assert_eq!(LogicPayload::Union(Elements::new()).kind(), LogicKind::Union);
    assert_eq!(
        LogicPayload::Ref {
            target: "package_p__x".to_owned(),
            resolved: LogicTypeId::INVALID,
        }
        .kind(),
        LogicKind::Ref
    );
    assert!(LogicKind::Group.is_composite());
    assert!(!LogicKind::Stream.is_composite());
}

#[test]
fn stream_defaults() {
    let props = StreamProps::new(LogicTypeId::new(0), LogicTypeId::new(1));
    assert_eq!(props.throughput, 1.0);
    assert_eq!(props.synchronicity, "Sync");
    assert_eq!(props.complexity, 1);
    assert_eq!(props.dimension, 1);
    assert_eq!(props.direction, "Forward");
}

#[test]
fn links_in_declaration_order() {
    let mut elements = Elements::new();
    elements.insert("b".to_owned(), LogicTypeId::new(5));
    elements.insert("a".to_owned(), LogicTypeId::new(3));
    let group = entity("package_p__G", LogicPayload::Group(elements));
    assert_eq!(group.links(), vec![LogicTypeId::new(5), LogicTypeId::new(3)]);

    let unresolved = entity(
        "package_p__R",
        LogicPayload::Ref {
            target: "package_p__G".to_owned(),
            resolved: LogicTypeId::INVALID,
        },
    );
    assert!(unresolved.links().is_empty());
}

#[test]
fn rename_keeps_previous_name() {
    let mut ty = entity("package_p__Old", LogicPayload::Null);
    ty.rename("New".to_owned());
    assert_eq!(ty.name, "New");
    assert_eq!(ty.original_name.as_deref(), Some("Old"));
}
