//! Canonicalization of logic types by `(name, kind)`.
//!
//! The first entity observed for a pair is canonical; every later one is
//! marked non-unique so the renderer emits the pair once. Equality is by
//! name and kind only, not by structure: two Groups that share a name are
//! merged even if their elements differ.

use rustc_hash::FxHashMap;
use tydi_ir::{Graph, LogicKind, LogicTypeId};

/// Per-unit canonical table.
#[derive(Debug, Default)]
pub struct Deduplicator {
    canonical: FxHashMap<(String, LogicKind), LogicTypeId>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under its current name and kind, and record whether it
    /// is the canonical representative.
    ///
    /// A non-canonical Stream adopts the canonical Stream's `stream_type` and
    /// `user_type`, so equally named streams share one sub-type reference.
    pub fn check(&mut self, graph: &mut Graph, id: LogicTypeId) -> bool {
        let ty = graph.logic_type(id);
        let canonical = *self
            .canonical
            .entry((ty.name.clone(), ty.kind()))
            .or_insert(id);
        let unique = canonical == id;

        if !unique {
            tracing::trace!(key = %ty.key, name = %ty.name, "duplicate of canonical type");
            let shared = graph
                .logic_type(canonical)
                .as_stream()
                .map(|props| (props.stream_type, props.user_type));
            if let (Some((stream_type, user_type)), Some(props)) =
                (shared, graph.logic_type_mut(id).as_stream_mut())
            {
                props.stream_type = stream_type;
                props.user_type = user_type;
            }
        }

        graph.logic_type_mut(id).unique = unique;
        unique
    }

    /// The canonical entity for a pair, if one has been registered.
    pub fn canonical(&self, name: &str, kind: LogicKind) -> Option<LogicTypeId> {
        self.canonical.get(&(name.to_owned(), kind)).copied()
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}
