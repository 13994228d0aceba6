//! Shared fixtures for unit tests.

use serde_json::Value;
use tydi_ir::{Graph, LogicTypeId, RawGraph};

pub(crate) fn raw(value: Value) -> RawGraph {
    serde_json::from_value(value).unwrap()
}

/// Ingest a unit without running any pass.
pub(crate) fn ingested(value: Value) -> Graph {
    crate::ingest::build(&raw(value)).unwrap()
}

pub(crate) fn id(graph: &Graph, key: &str) -> LogicTypeId {
    graph
        .logic_type_id(key)
        .unwrap_or_else(|| panic!("no logic type `{key}`"))
}

pub(crate) fn name(graph: &Graph, id: LogicTypeId) -> &str {
    &graph.logic_type(id).name
}
