//! Logic types: the nodes of the structural type system.
//!
//! A logic type is one of `Stream`, `Bit`, `Group`, `Union`, `Null` or
//! `Ref`. The kind is derived from the payload, so the two can never
//! disagree. Links to other logic types are [`LogicTypeId`]s into the
//! owning graph; before resolution they may point at `Ref` entities, after
//! resolution they always point at concrete ones.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::key::ScopeInfo;
use crate::LogicTypeId;

/// The kind of a logic type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicKind {
    Stream,
    Bit,
    Group,
    Union,
    Null,
    Ref,
}

impl LogicKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicKind::Stream => "Stream",
            LogicKind::Bit => "Bit",
            LogicKind::Group => "Group",
            LogicKind::Union => "Union",
            LogicKind::Null => "Null",
            LogicKind::Ref => "Ref",
        }
    }

    /// Group and Union carry named elements.
    pub fn is_composite(self) -> bool {
        matches!(self, LogicKind::Group | LogicKind::Union)
    }
}

impl std::fmt::Display for LogicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named elements of a Group or Union, in declaration order.
pub type Elements = IndexMap<String, LogicTypeId>;

/// Properties of a Stream.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamProps {
    /// The data carried by the stream.
    pub stream_type: LogicTypeId,
    /// User-defined sideband signals (`Null` when absent).
    pub user_type: LogicTypeId,
    pub throughput: f64,
    pub synchronicity: String,
    pub complexity: u32,
    pub dimension: u32,
    pub direction: String,
}

impl StreamProps {
    pub const DEFAULT_THROUGHPUT: f64 = 1.0;
    pub const DEFAULT_SYNCHRONICITY: &'static str = "Sync";
    pub const DEFAULT_COMPLEXITY: u32 = 1;
    pub const DEFAULT_DIMENSION: u32 = 1;
    pub const DEFAULT_DIRECTION: &'static str = "Forward";

    /// A stream with default properties over the given data and user types.
    pub fn new(stream_type: LogicTypeId, user_type: LogicTypeId) -> Self {
        StreamProps {
            stream_type,
            user_type,
            throughput: Self::DEFAULT_THROUGHPUT,
            synchronicity: Self::DEFAULT_SYNCHRONICITY.to_owned(),
            complexity: Self::DEFAULT_COMPLEXITY,
            dimension: Self::DEFAULT_DIMENSION,
            direction: Self::DEFAULT_DIRECTION.to_owned(),
        }
    }
}

/// Kind-specific content of a logic type.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicPayload {
    Stream(StreamProps),
    Bit {
        width: u64,
    },
    Group(Elements),
    Union(Elements),
    Null,
    Ref {
        /// Qualified key of the referenced entity.
        target: String,
        /// Concrete entity at the end of the reference chain, once resolved.
        resolved: LogicTypeId,
    },
}

impl LogicPayload {
    pub fn kind(&self) -> LogicKind {
        match self {
            LogicPayload::Stream(_) => LogicKind::Stream,
            LogicPayload::Bit { .. } => LogicKind::Bit,
            LogicPayload::Group(_) => LogicKind::Group,
            LogicPayload::Union(_) => LogicKind::Union,
            LogicPayload::Null => LogicKind::Null,
            LogicPayload::Ref { .. } => LogicKind::Ref,
        }
    }
}

/// A logic type entity.
#[derive(Clone, Debug, PartialEq)]
pub struct LogicType {
    /// Qualified key this entity was declared under.
    pub key: String,
    pub scope: ScopeInfo,
    /// Current display name. Alias promotion and auto-naming rewrite it.
    pub name: String,
    /// The name before the most recent rename.
    pub original_name: Option<String>,
    /// Canonical representative of its `(name, kind)` pair.
    pub unique: bool,
    /// Alternate names discovered through reference chasing, in discovery
    /// order.
    pub aliases: IndexSet<String>,
    pub document: Option<String>,
    pub payload: LogicPayload,
}

impl LogicType {
    /// Create an unresolved entity named after its key.
    pub fn new(key: impl Into<String>, scope: ScopeInfo, payload: LogicPayload) -> Self {
        let key = key.into();
        let name = scope.name_or(&key).to_owned();
        LogicType {
            key,
            scope,
            name,
            original_name: None,
            unique: false,
            aliases: IndexSet::new(),
            document: None,
            payload,
        }
    }

    #[inline]
    pub fn kind(&self) -> LogicKind {
        self.payload.kind()
    }

    #[inline]
    pub fn defined(&self) -> bool {
        self.scope.defined()
    }

    pub fn as_stream(&self) -> Option<&StreamProps> {
        match &self.payload {
            LogicPayload::Stream(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_stream_mut(&mut self) -> Option<&mut StreamProps> {
        match &mut self.payload {
            LogicPayload::Stream(props) => Some(props),
            _ => None,
        }
    }

    /// Elements of a Group or Union.
    pub fn elements(&self) -> Option<&Elements> {
        match &self.payload {
            LogicPayload::Group(elements) | LogicPayload::Union(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn elements_mut(&mut self) -> Option<&mut Elements> {
        match &mut self.payload {
            LogicPayload::Group(elements) | LogicPayload::Union(elements) => Some(elements),
            _ => None,
        }
    }

    /// Every outgoing link of this entity, in declaration order.
    pub fn links(&self) -> Vec<LogicTypeId> {
        match &self.payload {
            LogicPayload::Stream(props) => vec![props.stream_type, props.user_type],
            LogicPayload::Group(elements) | LogicPayload::Union(elements) => {
                elements.values().copied().collect()
            }
            LogicPayload::Ref { resolved, .. } if resolved.is_valid() => vec![*resolved],
            LogicPayload::Bit { .. } | LogicPayload::Null | LogicPayload::Ref { .. } => Vec::new(),
        }
    }

    /// Adopt a new display name, remembering the previous one.
    pub fn rename(&mut self, name: String) {
        let previous = std::mem::replace(&mut self.name, name);
        self.original_name = Some(previous);
    }
}

#[cfg(test)]
mod tests;
