//! End-to-end resolution of complete units.
//!
//! Each test feeds a JSON unit through the whole pipeline and checks the
//! resolved graph or its export.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tydi_ir::{LogicKind, LogicTypeId, NetOwner, RawGraph};
use tydi_resolve::{resolve, ResolveConfig, ResolveError, ResolvedUnit};

fn run(unit: Value) -> Result<ResolvedUnit, ResolveError> {
    let raw: RawGraph = serde_json::from_value(unit).unwrap();
    resolve(&raw, &ResolveConfig::default())
}

fn key_id(unit: &ResolvedUnit, key: &str) -> LogicTypeId {
    unit.graph.logic_type_id(key).unwrap()
}

#[test]
fn stream_over_bit_and_null() {
    let unit = run(json!({"logic_types": {
        "package_p__Bit1": {"kind": "Bit"},
        "package_p__Null1": {"kind": "Null"},
        "package_p__S1": {"kind": "Stream", "value": {
            "stream_type": {"kind": "Ref", "target": "package_p__Bit1"},
            "user_type": {"kind": "Ref", "target": "package_p__Null1"},
            "throughput": 1.0, "synchronicity": "Sync", "complexity": 1,
            "dimension": 1, "direction": "Forward"
        }}
    }}))
    .unwrap();

    let graph = &unit.graph;
    let props = graph
        .logic_type(key_id(&unit, "package_p__S1"))
        .as_stream()
        .unwrap();
    let data = graph.logic_type(props.stream_type);
    assert_eq!(data.key, "package_p__Bit1");
    assert_eq!(data.name, "Bit1");
    assert!(data.defined());
    assert_eq!(data.scope.scope_name, "p");

    let export = serde_json::to_value(&unit).unwrap();
    let s1 = &export["logic_types"]["package_p__S1"];
    assert_eq!(
        s1["value"]["stream_type"],
        json!({"type": "Ref", "value": "package_p__Bit1"})
    );
    assert_eq!(s1["unique"], json!(true));
    let bit1 = &export["logic_types"]["package_p__Bit1"];
    assert_eq!(bit1["name"], json!("Bit1"));
    assert_eq!(bit1["defined"], json!(true));
    assert_eq!(bit1["scope_name"], json!("p"));
    assert_eq!(bit1["scope_type"], json!("package"));
}

#[test]
fn alias_chain_names_the_target() {
    let unit = run(json!({"logic_types": {
        "package_p__A": {"type": "Ref", "value": "package_p__B"},
        "package_p__B": {"type": "Ref", "value": "package_p__C", "aliases": ["x"]},
        "package_p__C": {"type": "Bit", "value": 4}
    }}))
    .unwrap();

    let c = unit.graph.logic_type(key_id(&unit, "package_p__C"));
    assert_eq!(c.aliases.iter().collect::<Vec<_>>(), vec!["x"]);
    assert_eq!(c.name, "x");
    assert_eq!(c.original_name.as_deref(), Some("C"));

    let export = serde_json::to_value(&unit).unwrap();
    assert_eq!(
        export["logic_types"]["package_p__A"]["resolved"],
        json!({"type": "Ref", "value": "package_p__C"})
    );
}

#[test]
fn front_end_alias_spelling_names_the_target() {
    let unit = run(json!({"logic_types": {
        "package_p__A": {"type": "Ref", "value": "package_p__C", "alias": ["x"]},
        "package_p__C": {"type": "Bit", "value": 4}
    }}))
    .unwrap();

    let c = unit.graph.logic_type(key_id(&unit, "package_p__C"));
    assert_eq!(c.aliases.iter().collect::<Vec<_>>(), vec!["x"]);
    assert_eq!(c.name, "x");
}

#[test]
fn defined_follows_scope_recognition() {
    let unit = run(json!({"logic_types": {
        "impl_x__Bit1": {"type": "Bit"},
        "streamlet_s__B": {"type": "Bit"},
        "temp_0__C": {"type": "Bit"}
    }}))
    .unwrap();

    let export = serde_json::to_value(&unit).unwrap();
    let types = &export["logic_types"];
    assert_eq!(types["impl_x__Bit1"]["defined"], json!(true));
    assert_eq!(types["impl_x__Bit1"]["name"], json!("Bit1"));
    assert_eq!(types["streamlet_s__B"]["defined"], json!(true));
    assert_eq!(types["temp_0__C"]["defined"], json!(false));
    assert_eq!(types["temp_0__C"]["name"], json!("temp_0__C"));
}

#[test]
fn port_substreams_and_self_net() {
    let unit = run(json!({
        "logic_types": {
            "package_p__Bit1": {"type": "Bit", "value": 1},
            "package_p__Null1": {"type": "Null"},
            "package_p__A": {"type": "Stream", "value": {
                "stream_type": "package_p__Bit1", "user_type": "package_p__Null1"}},
            "package_p__B": {"type": "Stream", "value": {
                "stream_type": "package_p__Bit1", "user_type": "package_p__Null1"}},
            "package_p__Nested": {"type": "Group", "value": {"elements": {"b": "package_p__B"}}},
            "package_p__Outer": {"type": "Group", "value": {"elements": {
                "a": "package_p__A", "nested": "package_p__Nested"}}},
            "package_p__Top": {"type": "Stream", "value": {
                "stream_type": "package_p__Outer", "user_type": "package_p__Null1"}}
        },
        "streamlets": {"streamlet_p__comp": {"ports": {
            "comp__std_in": {"logic_type": "package_p__Top", "direction": "In"},
            "comp__std_out": {"logic_type": "package_p__Top", "direction": "Out"}
        }}},
        "implementations": {
            "impl_p__wire": {"derived_streamlet": "streamlet_p__comp", "nets": {
                "wire__n0": {"src_port_owner_name": "self", "src_port_name": "comp__std_in",
                             "sink_port_owner_name": "self", "sink_port_name": "comp__std_out"}
            }}
        }
    }))
    .unwrap();

    let export = serde_json::to_value(&unit).unwrap();
    let port = &export["streamlets"]["streamlet_p__comp"]["ports"]["comp__std_in"];
    assert_eq!(port["name"], json!("in"));
    assert_eq!(
        port["sub_streams"],
        json!([
            {"name": "a", "path": ["el", "a"]},
            {"name": "b", "path": ["el", "nested", "el", "b"]}
        ])
    );

    let wire = unit.graph.implementation_id("impl_p__wire").unwrap();
    let resolution = unit.graph.implementation(wire).nets["wire__n0"]
        .resolution
        .as_ref()
        .unwrap();
    assert_eq!(resolution.src_owner, NetOwner::Implementation(wire));
    assert_eq!(resolution.sink_owner, NetOwner::Implementation(wire));

    let net = &export["implementations"]["impl_p__wire"]["nets"]["wire__n0"];
    assert_eq!(net["src_owner"], json!({"kind": "self", "name": "wire"}));
    assert_eq!(net["src_port"], json!("in"));
    assert_eq!(net["sink_port"], json!("out"));
    assert_eq!(
        net["data_type"],
        json!({"type": "Ref", "value": "package_p__Outer"})
    );
    assert_eq!(net["sub_streams"], port["sub_streams"]);
}

#[test]
fn nets_resolve_across_forward_declared_implementations() {
    let unit = run(json!({
        "logic_types": {
            "package_p__Bit1": {"type": "Bit", "value": 1},
            "package_p__S": {"type": "Stream", "value": {
                "stream_type": "package_p__Bit1", "user_type": "package_p__Bit1"}}
        },
        "streamlets": {"streamlet_p__comp": {"ports": {
            "comp__std_in": {"logic_type": "package_p__S", "direction": "In"},
            "comp__std_out": {"logic_type": "package_p__S", "direction": "Out"}
        }}},
        "implementations": {
            "impl_p__top": {
                "derived_streamlet": "streamlet_p__comp",
                "implementation_instances": {
                    "top__dup": {"derived_implementation": "impl_p__dup"}
                },
                "nets": {
                    "top__n0": {"src_port_owner_name": "self", "src_port_name": "comp__std_in",
                                "sink_port_owner_name": "top__dup", "sink_port_name": "comp__std_in"},
                    "top__n1": {"src_port_owner_name": "top__dup", "src_port_name": "comp__std_out",
                                "sink_port_owner_name": "self", "sink_port_name": "comp__std_out"}
                }
            },
            "impl_p__dup": {"derived_streamlet": "streamlet_p__comp",
                            "impl_type": {"TemplateInstance": {"template_name": "duplicator_i"}}}
        }
    }))
    .unwrap();

    let export = serde_json::to_value(&unit).unwrap();
    let top = &export["implementations"]["impl_p__top"];
    assert_eq!(
        top["nets"]["top__n1"]["src_owner"],
        json!({"kind": "instance", "name": "dup"})
    );
    assert_eq!(
        export["implementations"]["impl_p__dup"]["impl_kind"],
        json!("Duplicator")
    );
    assert_eq!(
        export["implementations"]["impl_p__dup"]["impl_type"],
        json!({"TemplateInstance": {"template_name": "duplicator_i"}})
    );
}

#[test]
fn no_link_targets_a_ref_after_resolution() {
    let unit = run(json!({"logic_types": {
        "package_p__Bit1": {"type": "Bit", "value": 1},
        "package_p__R1": {"type": "Ref", "value": "package_p__Bit1"},
        "package_p__R2": {"type": "Ref", "value": "package_p__R1"},
        "package_p__G": {"type": "Group", "value": {"elements": {
            "a": "package_p__R2", "b": {"type": "Ref", "value": "package_p__R1"}}}},
        "package_p__U": {"type": "Union", "value": {"elements": {"g": "package_p__G"}}},
        "package_p__S": {"type": "Stream", "value": {
            "stream_type": "package_p__U", "user_type": "package_p__R2"}}
    }}))
    .unwrap();

    for ty in unit.graph.logic_types() {
        if ty.kind() == LogicKind::Ref {
            continue;
        }
        for link in ty.links() {
            assert_ne!(
                unit.graph.logic_type(link).kind(),
                LogicKind::Ref,
                "{} links to a Ref",
                ty.key
            );
        }
    }
}

#[test]
fn same_named_groups_are_merged_regardless_of_structure() {
    // Accepted limitation: canonicalization is by (name, kind) only.
    let unit = run(json!({"logic_types": {
        "package_p__Bit1": {"type": "Bit", "value": 1},
        "package_p__Bit2": {"type": "Bit", "value": 2},
        "package_a__Pair": {"type": "Group", "value": {"elements": {"x": "package_p__Bit1"}}},
        "package_b__Pair": {"type": "Group", "value": {"elements": {
            "x": "package_p__Bit2", "y": "package_p__Bit2"}}}
    }}))
    .unwrap();

    let first = unit.graph.logic_type(key_id(&unit, "package_a__Pair"));
    let second = unit.graph.logic_type(key_id(&unit, "package_b__Pair"));
    assert!(first.unique);
    assert!(!second.unique);
    assert_ne!(first.elements(), second.elements());
}

#[test]
fn failures_name_the_offending_key() {
    let err = run(json!({"logic_types": {
        "package_p__A": {"type": "Ref", "value": "package_p__B"},
        "package_p__B": {"type": "Ref", "value": "package_p__A"}
    }}))
    .unwrap_err();
    assert_eq!(err.code(), "R0003");
    assert_eq!(err.to_string(), "reference chain revisits `package_p__A`");

    let err = run(json!({
        "logic_types": {"package_p__Bit1": {"type": "Bit", "value": 1}},
        "streamlets": {"streamlet_p__comp": {"ports": {
            "comp__std_in": {"logic_type": "package_p__Bit1", "direction": "In"}
        }}}
    }))
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "`comp__std_in`: expected Stream, found Bit"
    );
}
