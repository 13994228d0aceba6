//! Pass 3a: link implementations to their streamlets and instances to the
//! implementations they instantiate, and classify each implementation.
//!
//! Must complete for every implementation of the unit before any net is
//! resolved: an instance may name an implementation declared later.

use tydi_ir::{Graph, ImplId, ImplKind};

use crate::{ResolveError, Result};

#[tracing::instrument(level = "debug", skip_all, fields(count = graph.implementations().len()))]
pub(crate) fn resolve_implementations(graph: &mut Graph) -> Result<()> {
    let ids: Vec<ImplId> = graph.implementation_ids().collect();
    for id in ids {
        let implementation = graph.implementation(id);
        let streamlet = graph
            .streamlet_id(&implementation.streamlet_key)
            .ok_or_else(|| ResolveError::UnknownStreamlet {
                key: implementation.key.clone(),
                streamlet: implementation.streamlet_key.clone(),
            })?;
        let kind = ImplKind::classify(
            &implementation.impl_type,
            implementation.template_name.as_deref(),
        );
        let derived = implementation
            .instances
            .values()
            .map(|instance| {
                graph
                    .implementation_id(&instance.implementation_key)
                    .ok_or_else(|| ResolveError::UnknownImplementation {
                        key: instance.key.clone(),
                        implementation: instance.implementation_key.clone(),
                    })
            })
            .collect::<Result<Vec<ImplId>>>()?;
        tracing::trace!(key = %implementation.key, ?kind, instances = derived.len(), "implementation linked");

        let implementation = graph.implementation_mut(id);
        implementation.derived_streamlet = streamlet;
        implementation.impl_kind = kind;
        for (instance, derived) in implementation.instances.values_mut().zip(derived) {
            instance.derived_implementation = derived;
        }
    }
    Ok(())
}
