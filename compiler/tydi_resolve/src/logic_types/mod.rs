//! Pass 1: resolve every logic type.
//!
//! Entities are visited in discovery order. Each one has its links chased
//! to concrete entities (a `Ref` entity records its own resolution), and is
//! then registered with the [`Deduplicator`] unless it is anonymous.
//! Canonical entities are always visited before their duplicates, so a
//! duplicate Stream adopts links that are already concrete.

use tydi_ir::{Graph, LogicPayload, LogicTypeId};

use crate::reference::{chase, resolve_chain};
use crate::{Deduplicator, Result};

#[tracing::instrument(level = "debug", skip_all, fields(count = graph.logic_types().len()))]
pub(crate) fn resolve_logic_types(graph: &mut Graph, dedup: &mut Deduplicator) -> Result<()> {
    let ids: Vec<LogicTypeId> = graph.logic_type_ids().collect();
    for id in ids {
        resolve_links(graph, id)?;
        if !graph.logic_type(id).scope.is_anonymous() {
            dedup.check(graph, id);
        }
    }
    Ok(())
}

fn resolve_links(graph: &mut Graph, id: LogicTypeId) -> Result<()> {
    match &graph.logic_type(id).payload {
        LogicPayload::Ref { .. } => {
            let concrete = resolve_chain(graph, id)?;
            if let LogicPayload::Ref { resolved, .. } = &mut graph.logic_type_mut(id).payload {
                *resolved = concrete;
            }
        }
        LogicPayload::Stream(props) => {
            let (stream_type, user_type) = (props.stream_type, props.user_type);
            let stream_type = chase(graph, stream_type)?;
            let user_type = chase(graph, user_type)?;
            if let Some(props) = graph.logic_type_mut(id).as_stream_mut() {
                props.stream_type = stream_type;
                props.user_type = user_type;
            }
        }
        LogicPayload::Group(elements) | LogicPayload::Union(elements) => {
            let links: Vec<LogicTypeId> = elements.values().copied().collect();
            let mut concrete = Vec::with_capacity(links.len());
            for link in links {
                concrete.push(chase(graph, link)?);
            }
            if let Some(elements) = graph.logic_type_mut(id).elements_mut() {
                for (slot, link) in elements.values_mut().zip(concrete) {
                    *slot = link;
                }
            }
        }
        LogicPayload::Bit { .. } | LogicPayload::Null => {}
    }
    Ok(())
}
