//! Descriptive names for anonymous streams.
//!
//! `stream_{data}[_{user}]` followed by one suffix per property that differs
//! from its default, in fixed order: throughput `_t`, synchronicity `_s`,
//! complexity `_c`, dimension `_d`, direction `_r`. Throughput always keeps
//! its fractional part (`4.0`), and dots become underscores so it stays a
//! valid identifier.

use std::fmt::Write;

use tydi_ir::{Graph, LogicKind, LogicTypeId, StreamProps};

use crate::{ResolveError, Result};

/// Prefix of names the front end assigns to streams it could not name.
pub const GENERATED_PREFIX: &str = "generated";

/// Derive the descriptive name of the Stream `id`.
pub fn stream_name(graph: &Graph, id: LogicTypeId) -> Result<String> {
    let ty = graph.logic_type(id);
    let props = ty
        .as_stream()
        .ok_or_else(|| ResolveError::kind_mismatch(&ty.key, "Stream", ty.kind()))?;

    let mut name = format!("stream_{}", graph.logic_type(props.stream_type).name);
    let user = graph.logic_type(props.user_type);
    if user.kind() != LogicKind::Null {
        let _ = write!(name, "_{}", user.name);
    }

    if props.throughput != StreamProps::DEFAULT_THROUGHPUT {
        let _ = write!(name, "_t{:?}", props.throughput);
    }
    if props.synchronicity != StreamProps::DEFAULT_SYNCHRONICITY {
        let _ = write!(name, "_s{}", props.synchronicity);
    }
    if props.complexity != StreamProps::DEFAULT_COMPLEXITY {
        let _ = write!(name, "_c{}", props.complexity);
    }
    if props.dimension != StreamProps::DEFAULT_DIMENSION {
        let _ = write!(name, "_d{}", props.dimension);
    }
    if props.direction != StreamProps::DEFAULT_DIRECTION {
        let _ = write!(name, "_r{}", props.direction);
    }

    Ok(name.replace('.', "_"))
}

/// Whether the front end left this name unassigned.
pub fn is_generated(name: &str) -> bool {
    name.starts_with(GENERATED_PREFIX)
}
