//! Debug-mode validation of resolved-graph invariants.
//!
//! Walks the arena after the pipeline and asserts:
//! - No Stream, Group or Union link targets a `Ref` entity
//! - Every `Ref` entity has a concrete resolution
//! - Every port type is a Stream
//! - Every implementation names a valid streamlet and every instance a valid
//!   implementation
//! - Every net is resolved
//!
//! These checks are enabled only in debug builds (`debug_assert!`).

use tydi_ir::{Graph, LogicKind, LogicPayload, LogicTypeId};

/// Validate that a resolved graph satisfies all invariants.
///
/// Panics with a message naming the offending key if one is violated.
pub fn validate(graph: &Graph) {
    for ty in graph.logic_types() {
        match &ty.payload {
            LogicPayload::Ref { resolved, .. } => {
                debug_assert!(
                    resolved.is_valid(),
                    "Ref `{}` has no concrete resolution",
                    ty.key,
                );
                validate_link(graph, &ty.key, *resolved);
            }
            LogicPayload::Stream(_) | LogicPayload::Group(_) | LogicPayload::Union(_) => {
                for link in ty.links() {
                    validate_link(graph, &ty.key, link);
                }
            }
            LogicPayload::Bit { .. } | LogicPayload::Null => {}
        }
    }

    for streamlet in graph.streamlets() {
        for port in streamlet.ports.values() {
            debug_assert!(
                port.logic_type.is_valid()
                    && graph.logic_type(port.logic_type).kind() == LogicKind::Stream,
                "port `{}` is not typed by a Stream",
                port.key,
            );
        }
    }

    for implementation in graph.implementations() {
        debug_assert!(
            implementation.derived_streamlet.is_valid(),
            "implementation `{}` has no streamlet",
            implementation.key,
        );
        for instance in implementation.instances.values() {
            debug_assert!(
                instance.derived_implementation.is_valid(),
                "instance `{}` has no implementation",
                instance.key,
            );
        }
        for net in implementation.nets.values() {
            debug_assert!(
                net.resolution.is_some(),
                "net `{}` is unresolved",
                net.key
            );
        }
    }
}

fn validate_link(graph: &Graph, owner: &str, link: LogicTypeId) {
    if !link.is_valid() {
        return;
    }
    debug_assert!(
        graph.logic_type(link).kind() != LogicKind::Ref,
        "`{owner}` links to Ref `{}`",
        graph.logic_type(link).key,
    );
}
