//! Final names: alias promotion (Pass 4) and stream auto-naming (Pass 5).
//!
//! Renames keep the previous name as `original_name`. Links are ids, so a
//! rename is seen by every referencer. What is *not* revisited is dedup
//! status already decided under the old name: entities that were collapsed
//! onto this one before the rename stay collapsed.

use tydi_ir::{Graph, LogicKind, LogicTypeId, ScopeType};

use crate::auto_name::{is_generated, stream_name};
use crate::{Deduplicator, Result};

/// Pass 4: adopt the most recently discovered alias as the name.
///
/// Instance-scoped entities suffix the alias with their scope name and are
/// re-checked for duplicates under the composite name. `Ref` entities only
/// forward their aliases and keep their names.
#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn promote_aliases(graph: &mut Graph, dedup: &mut Deduplicator) {
    let ids: Vec<LogicTypeId> = graph.logic_type_ids().collect();
    for id in ids {
        let ty = graph.logic_type(id);
        if ty.kind() == LogicKind::Ref {
            continue;
        }
        let Some(alias) = ty.aliases.last() else {
            continue;
        };

        let per_instance = ty.scope.scope_type == ScopeType::Instance;
        let name = if per_instance {
            format!("{alias}_{}", ty.scope.scope_name)
        } else {
            alias.clone()
        };
        tracing::debug!(key = %ty.key, from = %ty.name, to = %name, "alias promoted");

        graph.logic_type_mut(id).rename(name);
        if per_instance {
            dedup.check(graph, id);
        }
    }
}

/// Pass 5: give every stream the front end left unnamed a descriptive name.
#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn auto_name_streams(graph: &mut Graph, dedup: &mut Deduplicator) -> Result<()> {
    let unnamed: Vec<LogicTypeId> = graph
        .streams()
        .filter(|(_, ty)| is_generated(&ty.name))
        .map(|(id, _)| id)
        .collect();

    for id in unnamed {
        let name = stream_name(graph, id)?;
        tracing::debug!(key = %graph.logic_type(id).key, to = %name, "stream auto-named");
        graph.logic_type_mut(id).rename(name);
        dedup.check(graph, id);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
