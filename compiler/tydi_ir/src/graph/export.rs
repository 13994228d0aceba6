//! Resolved-graph export for the external renderer.
//!
//! The graph serializes back into the wire shape it was read from: the same
//! three mappings keyed by qualified key, with every link written as an
//! inline `{"type": "Ref", "value": key}` record. Resolved information
//! (names, dedup status, substream paths, net endpoints) rides alongside the
//! raw fields, so the export is both renderer input and valid resolver input.

use indexmap::{IndexMap, IndexSet};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::Graph;
use crate::netlist::{
    Direction, ImplKind, Implementation, Net, NetOwner, NetResolution, Streamlet,
    SubstreamConnection,
};
use crate::raw::RawImplType;
use crate::{LogicKind, LogicPayload, LogicType, LogicTypeId};

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Graph", 3)?;
        state.serialize_field("logic_types", &LogicTypes(self))?;
        state.serialize_field("streamlets", &Streamlets(self))?;
        state.serialize_field("implementations", &Implementations(self))?;
        state.end()
    }
}

struct LogicTypes<'a>(&'a Graph);

impl Serialize for LogicTypes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let graph = self.0;
        serializer.collect_map(
            graph
                .logic_types()
                .iter()
                .map(|ty| (ty.key.as_str(), LogicTypeView::new(graph, ty))),
        )
    }
}

struct Streamlets<'a>(&'a Graph);

impl Serialize for Streamlets<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let graph = self.0;
        serializer.collect_map(
            graph
                .streamlets()
                .iter()
                .map(|streamlet| (streamlet.key.as_str(), StreamletView::new(graph, streamlet))),
        )
    }
}

struct Implementations<'a>(&'a Graph);

impl Serialize for Implementations<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let graph = self.0;
        serializer.collect_map(graph.implementations().iter().map(|implementation| {
            (
                implementation.key.as_str(),
                ImplementationView::new(graph, implementation),
            )
        }))
    }
}

/// A link, written as an inline Ref record.
#[derive(Serialize)]
struct Link<'a> {
    #[serde(rename = "type")]
    kind: LogicKind,
    value: &'a str,
}

impl<'a> Link<'a> {
    fn to(graph: &'a Graph, id: LogicTypeId) -> Option<Self> {
        id.is_valid().then(|| Link {
            kind: LogicKind::Ref,
            value: graph.logic_type(id).key.as_str(),
        })
    }
}

#[derive(Serialize)]
struct LogicTypeView<'a> {
    #[serde(rename = "type")]
    kind: LogicKind,
    value: ValueView<'a>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_name: Option<&'a str>,
    scope_type: &'a str,
    scope_name: &'a str,
    defined: bool,
    unique: bool,
    aliases: &'a IndexSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
    /// Concrete end of the chain, for Ref entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<Link<'a>>,
}

impl<'a> LogicTypeView<'a> {
    fn new(graph: &'a Graph, ty: &'a LogicType) -> Self {
        let (value, resolved) = match &ty.payload {
            LogicPayload::Stream(props) => (
                ValueView::Stream(StreamView {
                    stream_type: Link::to(graph, props.stream_type),
                    user_type: Link::to(graph, props.user_type),
                    throughput: props.throughput,
                    synchronicity: &props.synchronicity,
                    complexity: props.complexity,
                    dimension: props.dimension,
                    direction: &props.direction,
                }),
                None,
            ),
            LogicPayload::Bit { width } => (ValueView::Width(*width), None),
            LogicPayload::Group(elements) | LogicPayload::Union(elements) => (
                ValueView::Composite(CompositeView {
                    elements: elements
                        .iter()
                        .map(|(name, &id)| (name.as_str(), Link::to(graph, id)))
                        .collect(),
                }),
                None,
            ),
            LogicPayload::Null => (ValueView::Null, None),
            LogicPayload::Ref { target, resolved } => {
                (ValueView::Key(target.as_str()), Link::to(graph, *resolved))
            }
        };

        LogicTypeView {
            kind: ty.kind(),
            value,
            name: &ty.name,
            original_name: ty.original_name.as_deref(),
            scope_type: ty.scope.scope_type.as_str(),
            scope_name: &ty.scope.scope_name,
            defined: ty.defined(),
            unique: ty.unique,
            aliases: &ty.aliases,
            document: ty.document.as_deref(),
            resolved,
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ValueView<'a> {
    Key(&'a str),
    Width(u64),
    Stream(StreamView<'a>),
    Composite(CompositeView<'a>),
    Null,
}

#[derive(Serialize)]
struct StreamView<'a> {
    stream_type: Option<Link<'a>>,
    user_type: Option<Link<'a>>,
    throughput: f64,
    synchronicity: &'a str,
    complexity: u32,
    dimension: u32,
    direction: &'a str,
}

#[derive(Serialize)]
struct CompositeView<'a> {
    elements: IndexMap<&'a str, Option<Link<'a>>>,
}

#[derive(Serialize)]
struct StreamletView<'a> {
    name: &'a str,
    scope_type: &'a str,
    scope_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
    ports: IndexMap<&'a str, PortView<'a>>,
}

#[derive(Serialize)]
struct PortView<'a> {
    name: &'a str,
    logic_type: Option<Link<'a>>,
    direction: Direction,
    sub_streams: &'a [SubstreamConnection],
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
}

impl<'a> StreamletView<'a> {
    fn new(graph: &'a Graph, streamlet: &'a Streamlet) -> Self {
        StreamletView {
            name: &streamlet.name,
            scope_type: streamlet.scope.scope_type.as_str(),
            scope_name: &streamlet.scope.scope_name,
            document: streamlet.document.as_deref(),
            ports: streamlet
                .ports
                .iter()
                .map(|(key, port)| {
                    let view = PortView {
                        name: &port.name,
                        logic_type: Link::to(graph, port.logic_type),
                        direction: port.direction,
                        sub_streams: &port.sub_streams,
                        document: port.document.as_deref(),
                    };
                    (key.as_str(), view)
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ImplTypeView<'a> {
    Named(&'a str),
    Template {
        #[serde(rename = "TemplateInstance")]
        template: TemplateView<'a>,
    },
}

#[derive(Serialize)]
struct TemplateView<'a> {
    template_name: &'a str,
}

#[derive(Serialize)]
struct ImplementationView<'a> {
    name: &'a str,
    scope_type: &'a str,
    scope_name: &'a str,
    derived_streamlet: &'a str,
    impl_type: ImplTypeView<'a>,
    impl_kind: ImplKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_name: Option<&'a str>,
    implementation_instances: IndexMap<&'a str, InstanceView<'a>>,
    nets: IndexMap<&'a str, NetView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
}

#[derive(Serialize)]
struct InstanceView<'a> {
    name: &'a str,
    derived_implementation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
}

impl<'a> ImplementationView<'a> {
    fn new(graph: &'a Graph, implementation: &'a Implementation) -> Self {
        let impl_type = match implementation.template_name.as_deref() {
            Some(template_name) if implementation.impl_type == RawImplType::TEMPLATE_INSTANCE => {
                ImplTypeView::Template {
                    template: TemplateView { template_name },
                }
            }
            _ => ImplTypeView::Named(implementation.impl_type.as_str()),
        };

        ImplementationView {
            name: &implementation.name,
            scope_type: implementation.scope.scope_type.as_str(),
            scope_name: &implementation.scope.scope_name,
            derived_streamlet: &implementation.streamlet_key,
            impl_type,
            impl_kind: implementation.impl_kind,
            template_name: implementation.template_name.as_deref(),
            implementation_instances: implementation
                .instances
                .iter()
                .map(|(key, instance)| {
                    let view = InstanceView {
                        name: &instance.name,
                        derived_implementation: &instance.implementation_key,
                        document: instance.document.as_deref(),
                    };
                    (key.as_str(), view)
                })
                .collect(),
            nets: implementation
                .nets
                .iter()
                .map(|(key, net)| (key.as_str(), NetView::new(graph, net)))
                .collect(),
            document: implementation.document.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct NetView<'a> {
    name: &'a str,
    src_port_owner_name: &'a str,
    src_port_name: &'a str,
    sink_port_owner_name: &'a str,
    sink_port_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
    #[serde(flatten)]
    resolution: Option<ResolutionView<'a>>,
}

#[derive(Serialize)]
struct ResolutionView<'a> {
    src_owner: OwnerView<'a>,
    sink_owner: OwnerView<'a>,
    src_port: &'a str,
    sink_port: &'a str,
    resolved_type: Option<Link<'a>>,
    data_type: Option<Link<'a>>,
    sub_streams: &'a [SubstreamConnection],
}

#[derive(Serialize)]
struct OwnerView<'a> {
    kind: &'static str,
    name: &'a str,
}

impl<'a> OwnerView<'a> {
    fn new(graph: &'a Graph, owner: NetOwner) -> Self {
        let kind = match owner {
            NetOwner::Implementation(_) => "self",
            NetOwner::Instance { .. } => "instance",
        };
        OwnerView {
            kind,
            name: graph.owner_name(owner),
        }
    }
}

impl<'a> NetView<'a> {
    fn new(graph: &'a Graph, net: &'a Net) -> Self {
        NetView {
            name: &net.name,
            src_port_owner_name: &net.src_owner_name,
            src_port_name: &net.src_port_key,
            sink_port_owner_name: &net.sink_owner_name,
            sink_port_name: &net.sink_port_key,
            document: net.document.as_deref(),
            resolution: net
                .resolution
                .as_ref()
                .map(|resolution| ResolutionView::new(graph, resolution)),
        }
    }
}

impl<'a> ResolutionView<'a> {
    fn new(graph: &'a Graph, resolution: &'a NetResolution) -> Self {
        ResolutionView {
            src_owner: OwnerView::new(graph, resolution.src_owner),
            sink_owner: OwnerView::new(graph, resolution.sink_owner),
            src_port: &resolution.src_port,
            sink_port: &resolution.sink_port,
            resolved_type: Link::to(graph, resolution.resolved_type),
            data_type: Link::to(graph, resolution.data_type),
            sub_streams: &resolution.sub_streams,
        }
    }
}
