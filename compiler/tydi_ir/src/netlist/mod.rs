//! Streamlets, implementations and their netlists.
//!
//! A streamlet is an interface of Stream-typed ports. An implementation
//! realizes a streamlet, either as a netlist of instances connected by
//! point-to-point nets or as an instance of a template (duplicator, voider,
//! ...). Links to streamlets, implementations and logic types are arena ids
//! that start out as `INVALID` and are filled in by the resolution passes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::key::ScopeInfo;
use crate::{ImplId, LogicTypeId, StreamletId};

/// Path segment marking a step into a Group/Union element.
pub const ELEMENT_SEGMENT: &str = "el";

/// Owner name that refers to the enclosing implementation itself.
pub const SELF_OWNER: &str = "self";

/// The literal implementation type of a plain netlist.
pub const NORMAL_IMPL: &str = "Normal";

/// Port direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

/// Access path from an owning stream to a stream nested inside its data type.
pub type SubstreamPath = SmallVec<[String; 4]>;

/// A stream nested in the data type of a port's stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SubstreamConnection {
    /// Element name of the nested stream.
    pub name: String,
    /// `["el", outer, "el", inner, ...]` from the owning stream.
    pub path: SubstreamPath,
}

/// A streamlet port.
#[derive(Clone, Debug, PartialEq)]
pub struct Port {
    /// Key of the port inside its streamlet (`{scope}__{escaped_name}`).
    pub key: String,
    /// Port name with the reserved-word escape removed.
    pub name: String,
    pub direction: Direction,
    /// Stream type of the port (a Ref until Pass 2 resolves it).
    pub logic_type: LogicTypeId,
    pub sub_streams: Vec<SubstreamConnection>,
    pub document: Option<String>,
}

/// A named interface of Stream-typed ports.
#[derive(Clone, Debug, PartialEq)]
pub struct Streamlet {
    pub key: String,
    pub scope: ScopeInfo,
    pub name: String,
    pub document: Option<String>,
    pub ports: IndexMap<String, Port>,
}

impl Streamlet {
    /// Look up a port by its normalized name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.values().find(|port| port.name == name)
    }
}

/// What an implementation is made of.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ImplKind {
    /// A plain netlist of instances.
    #[default]
    Normal,
    /// An instance of some other template.
    TemplateInstance,
    /// The stream duplicator template (`duplicator_i`).
    Duplicator,
    /// The stream sink template (`voider_i`).
    Voider,
}

impl ImplKind {
    /// Classify an implementation by its declared type and template name.
    ///
    /// Only the literal `"Normal"` is a plain netlist. Anything else is a
    /// template instance, refined by the template name (falling back to the
    /// declared type itself when no template name was given).
    pub fn classify(impl_type: &str, template_name: Option<&str>) -> Self {
        if impl_type == NORMAL_IMPL {
            return ImplKind::Normal;
        }
        match template_name.unwrap_or(impl_type) {
            "duplicator_i" => ImplKind::Duplicator,
            "voider_i" => ImplKind::Voider,
            _ => ImplKind::TemplateInstance,
        }
    }
}

/// A named usage of an implementation inside another implementation.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub key: String,
    pub name: String,
    /// Qualified key of the instantiated implementation.
    pub implementation_key: String,
    /// Resolved by Pass 3a.
    pub derived_implementation: ImplId,
    pub document: Option<String>,
}

/// One end of a net.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NetOwner {
    /// The enclosing implementation (`"self"`).
    Implementation(ImplId),
    /// An instance of the enclosing implementation, by position.
    Instance { parent: ImplId, index: usize },
}

/// Derived connectivity of a net, filled in by Pass 3b.
#[derive(Clone, Debug, PartialEq)]
pub struct NetResolution {
    pub src_owner: NetOwner,
    pub sink_owner: NetOwner,
    pub src_port: String,
    pub sink_port: String,
    /// Stream type of the source port.
    pub resolved_type: LogicTypeId,
    /// Data type carried by that stream.
    pub data_type: LogicTypeId,
    pub sub_streams: Vec<SubstreamConnection>,
}

/// A point-to-point wire between a source port and a sink port.
#[derive(Clone, Debug, PartialEq)]
pub struct Net {
    pub key: String,
    pub name: String,
    pub src_owner_name: String,
    pub src_port_key: String,
    pub sink_owner_name: String,
    pub sink_port_key: String,
    pub document: Option<String>,
    pub resolution: Option<NetResolution>,
}

/// An implementation of a streamlet.
#[derive(Clone, Debug, PartialEq)]
pub struct Implementation {
    pub key: String,
    pub scope: ScopeInfo,
    pub name: String,
    pub document: Option<String>,
    /// Qualified key of the implemented streamlet.
    pub streamlet_key: String,
    /// Resolved by Pass 3a.
    pub derived_streamlet: StreamletId,
    /// Declared type: `"Normal"` or a template marker.
    pub impl_type: String,
    pub template_name: Option<String>,
    /// Classified by Pass 3a.
    pub impl_kind: ImplKind,
    pub instances: IndexMap<String, Instance>,
    pub nets: IndexMap<String, Net>,
}

impl Implementation {
    /// Position of the instance an owner name refers to, matched first by
    /// instance key and then by instance name.
    pub fn find_instance(&self, owner_name: &str) -> Option<usize> {
        self.instances.get_index_of(owner_name).or_else(|| {
            self.instances
                .values()
                .position(|instance| instance.name == owner_name)
        })
    }
}
