//! Pass 2: resolve streamlet ports.
//!
//! Each port's type link is chased to a concrete Stream and the streams
//! nested in that Stream's data type are recorded on the port.

use tydi_ir::{Graph, LogicTypeId, StreamletId, SubstreamConnection};

use crate::reference::chase;
use crate::substream::find_substreams;
use crate::{ResolveError, Result};

#[tracing::instrument(level = "debug", skip_all, fields(count = graph.streamlets().len()))]
pub(crate) fn resolve_ports(graph: &mut Graph) -> Result<()> {
    let ids: Vec<StreamletId> = graph.streamlet_ids().collect();
    for id in ids {
        let links: Vec<(String, LogicTypeId)> = graph
            .streamlet(id)
            .ports
            .values()
            .map(|port| (port.key.clone(), port.logic_type))
            .collect();

        let mut resolved: Vec<(LogicTypeId, Vec<SubstreamConnection>)> =
            Vec::with_capacity(links.len());
        for (key, link) in links {
            let stream = chase(graph, link)?;
            let ty = graph.logic_type(stream);
            if ty.as_stream().is_none() {
                return Err(ResolveError::kind_mismatch(&key, "Stream", ty.kind()));
            }
            let sub_streams = find_substreams(graph, stream)?;
            tracing::trace!(port = %key, sub_streams = sub_streams.len(), "port resolved");
            resolved.push((stream, sub_streams));
        }

        let ports = &mut graph.streamlet_mut(id).ports;
        for (port, (stream, sub_streams)) in ports.values_mut().zip(resolved) {
            port.logic_type = stream;
            port.sub_streams = sub_streams;
        }
    }
    Ok(())
}
