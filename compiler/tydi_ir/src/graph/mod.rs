//! The owned, resolved graph of one input unit.
//!
//! Three tables (logic types, streamlets, implementations), each indexed by
//! its own id type and by qualified key. Entities are only ever appended, so
//! ids and instance positions stay stable for the whole run.

mod export;

use rustc_hash::FxHashMap;

use crate::ids::to_u32;
use crate::netlist::{Implementation, Instance, NetOwner, Streamlet};
use crate::{ImplId, LogicKind, LogicType, LogicTypeId, StreamletId};

/// Arena owning every entity of one unit.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    logic_types: Vec<LogicType>,
    streamlets: Vec<Streamlet>,
    implementations: Vec<Implementation>,
    logic_type_keys: FxHashMap<String, LogicTypeId>,
    streamlet_keys: FxHashMap<String, StreamletId>,
    implementation_keys: FxHashMap<String, ImplId>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Logic types --

    /// Append a logic type and index it by key. A later entity with the
    /// same key shadows the earlier one in key lookups.
    pub fn alloc_logic_type(&mut self, ty: LogicType) -> LogicTypeId {
        let id = LogicTypeId::new(to_u32(self.logic_types.len()));
        self.logic_type_keys.insert(ty.key.clone(), id);
        self.logic_types.push(ty);
        id
    }

    #[inline]
    pub fn logic_type(&self, id: LogicTypeId) -> &LogicType {
        &self.logic_types[id.index()]
    }

    #[inline]
    pub fn logic_type_mut(&mut self, id: LogicTypeId) -> &mut LogicType {
        &mut self.logic_types[id.index()]
    }

    pub fn logic_type_id(&self, key: &str) -> Option<LogicTypeId> {
        self.logic_type_keys.get(key).copied()
    }

    /// Look up a logic type by qualified key.
    pub fn logic_type_by_key(&self, key: &str) -> Option<&LogicType> {
        self.logic_type_id(key).map(|id| self.logic_type(id))
    }

    pub fn logic_types(&self) -> &[LogicType] {
        &self.logic_types
    }

    /// All logic type ids in discovery order.
    pub fn logic_type_ids(&self) -> impl Iterator<Item = LogicTypeId> {
        (0..to_u32(self.logic_types.len())).map(LogicTypeId::new)
    }

    /// Every Stream entity, in discovery order.
    pub fn streams(&self) -> impl Iterator<Item = (LogicTypeId, &LogicType)> + '_ {
        self.logic_type_ids()
            .map(|id| (id, self.logic_type(id)))
            .filter(|(_, ty)| ty.kind() == LogicKind::Stream)
    }

    // -- Streamlets --

    pub fn alloc_streamlet(&mut self, streamlet: Streamlet) -> StreamletId {
        let id = StreamletId::new(to_u32(self.streamlets.len()));
        self.streamlet_keys.insert(streamlet.key.clone(), id);
        self.streamlets.push(streamlet);
        id
    }

    #[inline]
    pub fn streamlet(&self, id: StreamletId) -> &Streamlet {
        &self.streamlets[id.index()]
    }

    #[inline]
    pub fn streamlet_mut(&mut self, id: StreamletId) -> &mut Streamlet {
        &mut self.streamlets[id.index()]
    }

    pub fn streamlet_id(&self, key: &str) -> Option<StreamletId> {
        self.streamlet_keys.get(key).copied()
    }

    pub fn streamlets(&self) -> &[Streamlet] {
        &self.streamlets
    }

    pub fn streamlet_ids(&self) -> impl Iterator<Item = StreamletId> {
        (0..to_u32(self.streamlets.len())).map(StreamletId::new)
    }

    // -- Implementations --

    pub fn alloc_implementation(&mut self, implementation: Implementation) -> ImplId {
        let id = ImplId::new(to_u32(self.implementations.len()));
        self.implementation_keys
            .insert(implementation.key.clone(), id);
        self.implementations.push(implementation);
        id
    }

    #[inline]
    pub fn implementation(&self, id: ImplId) -> &Implementation {
        &self.implementations[id.index()]
    }

    #[inline]
    pub fn implementation_mut(&mut self, id: ImplId) -> &mut Implementation {
        &mut self.implementations[id.index()]
    }

    pub fn implementation_id(&self, key: &str) -> Option<ImplId> {
        self.implementation_keys.get(key).copied()
    }

    pub fn implementations(&self) -> &[Implementation] {
        &self.implementations
    }

    pub fn implementation_ids(&self) -> impl Iterator<Item = ImplId> {
        (0..to_u32(self.implementations.len())).map(ImplId::new)
    }

    /// The instance at `index` inside implementation `parent`.
    pub fn instance(&self, parent: ImplId, index: usize) -> Option<&Instance> {
        self.implementation(parent)
            .instances
            .get_index(index)
            .map(|(_, instance)| instance)
    }

    /// The implementation that realizes a net owner: the enclosing one for
    /// `self`, the instantiated one otherwise.
    pub fn owner_implementation(&self, owner: NetOwner) -> Option<ImplId> {
        match owner {
            NetOwner::Implementation(id) => Some(id),
            NetOwner::Instance { parent, index } => self
                .instance(parent, index)
                .map(|instance| instance.derived_implementation)
                .filter(|id| id.is_valid()),
        }
    }

    /// Display name of a net owner.
    pub fn owner_name(&self, owner: NetOwner) -> &str {
        match owner {
            NetOwner::Implementation(id) => &self.implementation(id).name,
            NetOwner::Instance { parent, index } => self
                .instance(parent, index)
                .map_or("", |instance| instance.name.as_str()),
        }
    }
}
