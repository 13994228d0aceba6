//! Ingest: build the owned arena from the immutable input index.
//!
//! Every entity is allocated up front so forward references resolve by key.
//! Links are mapped to arena ids but not chased: a link to a `Ref` entity
//! stays a link to that entity until Pass 1 (logic types) or Pass 2 (ports)
//! replaces it. Instance and streamlet links start out `INVALID` and are
//! filled in by Pass 3a.

use indexmap::IndexMap;
use tydi_ir::key::{self, ScopeInfo};
use tydi_ir::raw::{RawImplementation, RawLogicType, RawStreamlet, RawTypeRef, RawValue};
use tydi_ir::{
    Elements, Graph, ImplId, ImplKind, Implementation, Instance, LogicKind, LogicPayload,
    LogicType, LogicTypeId, Net, Port, RawGraph, StreamProps, Streamlet, StreamletId,
};

use crate::{ResolveError, Result};

/// Width of a `Bit` record that carries no payload.
const DEFAULT_BIT_WIDTH: u64 = 1;

/// Build the unresolved arena for one unit.
#[tracing::instrument(level = "debug", skip_all, fields(
    logic_types = raw.logic_types.len(),
    streamlets = raw.streamlets.len(),
    implementations = raw.implementations.len(),
))]
pub fn build(raw: &RawGraph) -> Result<Graph> {
    let mut graph = Graph::new();

    // Allocate first, so payload links may point forward.
    for (key, record) in &raw.logic_types {
        let scope = key::parse(key)?;
        let mut ty = LogicType::new(key.as_str(), scope, LogicPayload::Null);
        ty.aliases = record.aliases.iter().cloned().collect();
        ty.document = record.document().map(str::to_owned);
        graph.alloc_logic_type(ty);
    }

    let ids: Vec<LogicTypeId> = graph.logic_type_ids().collect();
    for ((key, record), id) in raw.logic_types.iter().zip(ids) {
        let payload = payload(&graph, key, record)?;
        graph.logic_type_mut(id).payload = payload;
    }

    for (key, record) in &raw.streamlets {
        let streamlet = streamlet(&graph, key, record)?;
        graph.alloc_streamlet(streamlet);
    }

    for (key, record) in &raw.implementations {
        graph.alloc_implementation(implementation(key, record)?);
    }

    Ok(graph)
}

/// Map a link to the id of the keyed entity it names.
pub(crate) fn link(graph: &Graph, owner: &str, link: &RawTypeRef) -> Result<LogicTypeId> {
    let target = link
        .target()
        .map_err(|kind| ResolveError::kind_mismatch(owner, "a Ref link", kind))?;
    graph
        .logic_type_id(target)
        .ok_or_else(|| ResolveError::UnknownReference {
            key: owner.to_owned(),
            target: target.to_owned(),
        })
}

fn payload(graph: &Graph, key: &str, record: &RawLogicType) -> Result<LogicPayload> {
    let payload = match (record.kind, record.value.as_ref()) {
        (LogicKind::Null, _) => LogicPayload::Null,
        (LogicKind::Bit, None) => LogicPayload::Bit {
            width: DEFAULT_BIT_WIDTH,
        },
        (LogicKind::Bit, Some(RawValue::Width(width))) => LogicPayload::Bit { width: *width },
        (LogicKind::Ref, Some(RawValue::Key(target))) => LogicPayload::Ref {
            target: target.clone(),
            resolved: LogicTypeId::INVALID,
        },
        (LogicKind::Stream, Some(RawValue::Stream(stream))) => {
            let mut props = StreamProps::new(
                link(graph, key, &stream.stream_type)?,
                link(graph, key, &stream.user_type)?,
            );
            props.throughput = stream.throughput;
            props.synchronicity.clone_from(&stream.synchronicity);
            props.complexity = stream.complexity;
            props.dimension = stream.dimension;
            props.direction.clone_from(&stream.direction);
            LogicPayload::Stream(props)
        }
        (LogicKind::Group, Some(RawValue::Composite(composite))) => {
            LogicPayload::Group(elements(graph, key, &composite.elements)?)
        }
        (LogicKind::Union, Some(RawValue::Composite(composite))) => {
            LogicPayload::Union(elements(graph, key, &composite.elements)?)
        }
        (kind, value) => {
            return Err(ResolveError::TypeMismatch {
                key: key.to_owned(),
                expected: expected_payload(kind),
                found: describe(value).to_owned(),
            })
        }
    };
    Ok(payload)
}

fn elements(
    graph: &Graph,
    key: &str,
    elements: &IndexMap<String, RawTypeRef>,
) -> Result<Elements> {
    elements
        .iter()
        .map(|(name, element)| Ok((name.clone(), link(graph, key, element)?)))
        .collect()
}

fn expected_payload(kind: LogicKind) -> &'static str {
    match kind {
        LogicKind::Stream => "a stream payload",
        LogicKind::Bit => "a bit width",
        LogicKind::Group | LogicKind::Union => "an element mapping",
        LogicKind::Ref => "a target key",
        LogicKind::Null => "no payload",
    }
}

fn describe(value: Option<&RawValue>) -> &'static str {
    match value {
        None => "no payload",
        Some(RawValue::Key(_)) => "a key",
        Some(RawValue::Width(_)) => "a bit width",
        Some(RawValue::Stream(_)) => "a stream payload",
        Some(RawValue::Composite(_)) => "an element mapping",
    }
}

fn named(key: &str) -> Result<(ScopeInfo, String)> {
    let scope = key::parse(key)?;
    let name = scope.name_or(key).to_owned();
    Ok((scope, name))
}

fn streamlet(graph: &Graph, key: &str, record: &RawStreamlet) -> Result<Streamlet> {
    let (scope, name) = named(key)?;
    let mut ports = IndexMap::with_capacity(record.ports.len());
    for (port_key, port) in &record.ports {
        let port = Port {
            key: port_key.clone(),
            name: key::port_name(port_key).to_owned(),
            direction: port.direction,
            logic_type: link(graph, port_key, &port.logic_type)?,
            sub_streams: Vec::new(),
            document: port.document.clone(),
        };
        ports.insert(port_key.clone(), port);
    }

    Ok(Streamlet {
        key: key.to_owned(),
        scope,
        name,
        document: record.document.clone(),
        ports,
    })
}

fn implementation(key: &str, record: &RawImplementation) -> Result<Implementation> {
    let (scope, name) = named(key)?;

    let instances = record
        .implementation_instances
        .iter()
        .map(|(instance_key, instance)| {
            let instance = Instance {
                key: instance_key.clone(),
                name: key::member_name(instance_key).to_owned(),
                implementation_key: instance.derived_implementation.clone(),
                derived_implementation: ImplId::INVALID,
                document: instance.document.clone(),
            };
            (instance_key.clone(), instance)
        })
        .collect();

    let nets = record
        .nets
        .iter()
        .map(|(net_key, net)| {
            let net = Net {
                key: net_key.clone(),
                name: key::member_name(net_key).to_owned(),
                src_owner_name: net.src_port_owner_name.clone(),
                src_port_key: net.src_port_name.clone(),
                sink_owner_name: net.sink_port_owner_name.clone(),
                sink_port_key: net.sink_port_name.clone(),
                document: net.document.clone(),
                resolution: None,
            };
            (net_key.clone(), net)
        })
        .collect();

    Ok(Implementation {
        key: key.to_owned(),
        scope,
        name,
        document: record.document.clone(),
        streamlet_key: record.derived_streamlet.clone(),
        derived_streamlet: StreamletId::INVALID,
        impl_type: record.impl_type.impl_type().to_owned(),
        template_name: record.impl_type.template_name().map(str::to_owned),
        impl_kind: ImplKind::default(),
        instances,
        nets,
    })
}
