//! Wire-format input model.
//!
//! The upstream front end emits one unit as three top-level mappings
//! (`logic_types`, `streamlets`, `implementations`), each from qualified key
//! to record. This module is the immutable input index the resolver reads
//! from; it never mutates. Mapping order is preserved, since discovery order
//! decides which of several same-named types becomes canonical.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::netlist::{Direction, NORMAL_IMPL};
use crate::LogicKind;

/// One unresolved input unit.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawGraph {
    #[serde(default)]
    pub logic_types: IndexMap<String, RawLogicType>,
    #[serde(default)]
    pub streamlets: IndexMap<String, RawStreamlet>,
    #[serde(default)]
    pub implementations: IndexMap<String, RawImplementation>,
}

/// A logic type record.
#[derive(Clone, Debug, Deserialize)]
pub struct RawLogicType {
    #[serde(rename = "type", alias = "kind")]
    pub kind: LogicKind,
    #[serde(default, alias = "target")]
    pub value: Option<RawValue>,
    /// Spelled `alias` by the front end.
    #[serde(default, alias = "alias")]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub document: Option<String>,
}

impl RawLogicType {
    /// Record-level document, falling back to the one inside the payload.
    pub fn document(&self) -> Option<&str> {
        self.document
            .as_deref()
            .or_else(|| self.value.as_ref().and_then(RawValue::document))
    }
}

/// Payload of a logic type record; its shape depends on the record kind.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Target key of a Ref.
    Key(String),
    /// Width of a Bit.
    Width(u64),
    Stream(RawStream),
    Composite(RawComposite),
}

impl RawValue {
    pub fn document(&self) -> Option<&str> {
        match self {
            RawValue::Stream(stream) => stream.document.as_deref(),
            RawValue::Composite(composite) => composite.document.as_deref(),
            RawValue::Key(_) | RawValue::Width(_) => None,
        }
    }
}

/// A link to another logic type: a bare key or an inline Ref record.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTypeRef {
    Key(String),
    Inline(RawInlineType),
}

/// An inline logic type record. Only Ref records are valid links.
#[derive(Clone, Debug, Deserialize)]
pub struct RawInlineType {
    #[serde(rename = "type", alias = "kind")]
    pub kind: LogicKind,
    #[serde(default, alias = "target")]
    pub value: Option<Box<RawValue>>,
}

impl RawTypeRef {
    /// The key this link points at, or the offending kind of a non-Ref
    /// inline record.
    pub fn target(&self) -> Result<&str, LogicKind> {
        match self {
            RawTypeRef::Key(key) => Ok(key),
            RawTypeRef::Inline(inline) => match (inline.kind, inline.value.as_deref()) {
                (LogicKind::Ref, Some(RawValue::Key(key))) => Ok(key),
                (kind, _) => Err(kind),
            },
        }
    }
}

fn default_throughput() -> f64 {
    1.0
}

fn default_synchronicity() -> String {
    "Sync".to_owned()
}

fn default_one() -> u32 {
    1
}

fn default_direction() -> String {
    "Forward".to_owned()
}

/// Stream payload.
#[derive(Clone, Debug, Deserialize)]
pub struct RawStream {
    pub stream_type: RawTypeRef,
    pub user_type: RawTypeRef,
    #[serde(default = "default_throughput")]
    pub throughput: f64,
    #[serde(default = "default_synchronicity")]
    pub synchronicity: String,
    #[serde(default = "default_one")]
    pub complexity: u32,
    #[serde(default = "default_one")]
    pub dimension: u32,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default)]
    pub document: Option<String>,
}

/// Group/Union payload.
#[derive(Clone, Debug, Deserialize)]
pub struct RawComposite {
    pub elements: IndexMap<String, RawTypeRef>,
    #[serde(default)]
    pub document: Option<String>,
}

/// A streamlet record.
#[derive(Clone, Debug, Deserialize)]
pub struct RawStreamlet {
    #[serde(default)]
    pub ports: IndexMap<String, RawPort>,
    #[serde(default)]
    pub document: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawPort {
    pub logic_type: RawTypeRef,
    pub direction: Direction,
    #[serde(default)]
    pub document: Option<String>,
}

/// An implementation record.
#[derive(Clone, Debug, Deserialize)]
pub struct RawImplementation {
    pub derived_streamlet: String,
    #[serde(default, alias = "type")]
    pub impl_type: RawImplType,
    #[serde(default)]
    pub implementation_instances: IndexMap<String, RawInstance>,
    #[serde(default)]
    pub nets: IndexMap<String, RawNet>,
    #[serde(default)]
    pub document: Option<String>,
}

/// Declared implementation type.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawImplType {
    /// `"Normal"` or a bare template marker.
    Named(String),
    Template {
        #[serde(rename = "TemplateInstance")]
        template: RawTemplate,
    },
}

impl Default for RawImplType {
    fn default() -> Self {
        RawImplType::Named(NORMAL_IMPL.to_owned())
    }
}

impl RawImplType {
    /// Marker written for template instances given in object form.
    pub const TEMPLATE_INSTANCE: &'static str = "TemplateInstance";

    pub fn impl_type(&self) -> &str {
        match self {
            RawImplType::Named(name) => name,
            RawImplType::Template { .. } => Self::TEMPLATE_INSTANCE,
        }
    }

    pub fn template_name(&self) -> Option<&str> {
        match self {
            RawImplType::Named(_) => None,
            RawImplType::Template { template } => Some(&template.template_name),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawTemplate {
    pub template_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawInstance {
    pub derived_implementation: String,
    #[serde(default)]
    pub document: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawNet {
    pub src_port_owner_name: String,
    pub src_port_name: String,
    pub sink_port_owner_name: String,
    pub sink_port_name: String,
    #[serde(default)]
    pub document: Option<String>,
}
