//! Pass 3b: resolve net endpoints.
//!
//! An owner name of `"self"` is the enclosing implementation; any other name
//! is one of its instances. Port names lose their reserved-word escape, and
//! the source port's stream type, data type and nested streams are copied
//! onto the net for the renderer.

use tydi_ir::key;
use tydi_ir::netlist::SELF_OWNER;
use tydi_ir::{Graph, ImplId, Net, NetOwner, NetResolution};

use crate::{ResolveError, Result};

#[tracing::instrument(level = "debug", skip_all, fields(count = graph.implementations().len()))]
pub(crate) fn resolve_nets(graph: &mut Graph) -> Result<()> {
    let ids: Vec<ImplId> = graph.implementation_ids().collect();
    for id in ids {
        let resolutions = graph
            .implementation(id)
            .nets
            .values()
            .map(|net| resolve_net(graph, id, net))
            .collect::<Result<Vec<NetResolution>>>()?;

        let nets = &mut graph.implementation_mut(id).nets;
        for (net, resolution) in nets.values_mut().zip(resolutions) {
            net.resolution = Some(resolution);
        }
    }
    Ok(())
}

fn resolve_net(graph: &Graph, parent: ImplId, net: &Net) -> Result<NetResolution> {
    let src_owner = owner(graph, parent, net, &net.src_owner_name)?;
    let sink_owner = owner(graph, parent, net, &net.sink_owner_name)?;
    let src_port = key::port_name(&net.src_port_key).to_owned();
    let sink_port = key::port_name(&net.sink_port_key).to_owned();

    let src_impl = graph
        .owner_implementation(src_owner)
        .ok_or_else(|| unknown_instance(net, &net.src_owner_name))?;
    let streamlet = graph.streamlet(graph.implementation(src_impl).derived_streamlet);
    let port = streamlet
        .port(&src_port)
        .ok_or_else(|| ResolveError::UnknownPort {
            key: net.key.clone(),
            owner: net.src_owner_name.clone(),
            port: src_port.clone(),
        })?;

    let port_type = graph.logic_type(port.logic_type);
    let data_type = port_type
        .as_stream()
        .map(|props| props.stream_type)
        .ok_or_else(|| ResolveError::kind_mismatch(&port.key, "Stream", port_type.kind()))?;

    tracing::trace!(
        net = %net.key,
        src = %graph.owner_name(src_owner),
        sink = %graph.owner_name(sink_owner),
        "net resolved"
    );

    Ok(NetResolution {
        src_owner,
        sink_owner,
        src_port,
        sink_port,
        resolved_type: port.logic_type,
        data_type,
        sub_streams: port.sub_streams.clone(),
    })
}

fn owner(graph: &Graph, parent: ImplId, net: &Net, owner_name: &str) -> Result<NetOwner> {
    if owner_name == SELF_OWNER {
        return Ok(NetOwner::Implementation(parent));
    }
    graph
        .implementation(parent)
        .find_instance(owner_name)
        .map(|index| NetOwner::Instance { parent, index })
        .ok_or_else(|| unknown_instance(net, owner_name))
}

fn unknown_instance(net: &Net, owner_name: &str) -> ResolveError {
    ResolveError::UnknownInstance {
        key: net.key.clone(),
        owner: owner_name.to_owned(),
    }
}
