//! Reference chasing.
//!
//! A `Ref` entity names another entity by key; that entity may itself be a
//! `Ref`. Chains are followed iteratively with a visited set, so a cycle is
//! reported instead of looping. Aliases carried by every hop are appended to
//! the concrete target's alias set in chain order.

use rustc_hash::FxHashSet;
use tydi_ir::{Graph, LogicKind, LogicPayload, LogicTypeId};

use crate::{ResolveError, Result};

/// Follow the chain starting at the `Ref` entity `id` to its concrete target.
///
/// Fails with `TypeMismatch` if `id` is not a `Ref`, `UnknownReference` on a
/// dangling target key and `CycleDetected` when a hop is revisited.
pub fn resolve_chain(graph: &mut Graph, id: LogicTypeId) -> Result<LogicTypeId> {
    let start = graph.logic_type(id);
    if start.kind() != LogicKind::Ref {
        return Err(ResolveError::kind_mismatch(&start.key, "Ref", start.kind()));
    }

    let mut visited = FxHashSet::default();
    let mut aliases: Vec<String> = Vec::new();
    let mut current = id;
    loop {
        let hop = graph.logic_type(current);
        let LogicPayload::Ref { target, .. } = &hop.payload else {
            break;
        };
        if !visited.insert(current) {
            return Err(ResolveError::CycleDetected {
                key: hop.key.clone(),
            });
        }
        aliases.extend(hop.aliases.iter().cloned());
        current = graph
            .logic_type_id(target)
            .ok_or_else(|| ResolveError::UnknownReference {
                key: hop.key.clone(),
                target: target.clone(),
            })?;
    }

    let concrete = graph.logic_type_mut(current);
    for alias in aliases {
        if !concrete.aliases.contains(&alias) {
            tracing::trace!(key = %concrete.key, alias = %alias, "alias attached");
            concrete.aliases.insert(alias);
        }
    }
    Ok(current)
}

/// The concrete entity behind a link: the link itself unless it is a `Ref`.
pub fn chase(graph: &mut Graph, id: LogicTypeId) -> Result<LogicTypeId> {
    if graph.logic_type(id).kind() == LogicKind::Ref {
        resolve_chain(graph, id)
    } else {
        Ok(id)
    }
}
