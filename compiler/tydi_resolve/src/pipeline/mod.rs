//! The pass pipeline for one input unit.
//!
//! ```text
//! ingest → 1 logic types → 2 ports → 3a implementations → 3b nets
//!        → 4 alias promotion → 5 auto-naming (unless disabled)
//! ```
//!
//! Passes run strictly in order over the whole unit; each reads fields the
//! previous ones wrote anywhere in the graph. Every unit gets its own graph
//! and its own [`Deduplicator`], so distinct units may run concurrently.

use serde::Serialize;
use tydi_ir::{Graph, RawGraph};

use crate::implementations::resolve_implementations;
use crate::logic_types::resolve_logic_types;
use crate::naming::{auto_name_streams, promote_aliases};
use crate::nets::resolve_nets;
use crate::ports::resolve_ports;
use crate::{ingest, Deduplicator, Result};

/// Caller-selected options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Run Pass 5. On by default.
    pub auto_name_streams: bool,
    /// Renderer option; carried through untouched.
    pub external_only: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        ResolveConfig {
            auto_name_streams: true,
            external_only: false,
        }
    }
}

/// A fully resolved unit, ready for the renderer.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedUnit {
    pub external_only: bool,
    #[serde(flatten)]
    pub graph: Graph,
}

/// Resolve one unit. Any error aborts the whole unit.
#[tracing::instrument(level = "debug", skip_all, fields(
    logic_types = raw.logic_types.len(),
    streamlets = raw.streamlets.len(),
    implementations = raw.implementations.len(),
    auto_name = config.auto_name_streams,
))]
pub fn resolve(raw: &RawGraph, config: &ResolveConfig) -> Result<ResolvedUnit> {
    let mut graph = ingest::build(raw)?;
    let mut dedup = Deduplicator::new();

    resolve_logic_types(&mut graph, &mut dedup)?;
    resolve_ports(&mut graph)?;
    // Every instance must be linked before any net is resolved.
    resolve_implementations(&mut graph)?;
    resolve_nets(&mut graph)?;
    promote_aliases(&mut graph, &mut dedup);
    if config.auto_name_streams {
        auto_name_streams(&mut graph, &mut dedup)?;
    }

    #[cfg(debug_assertions)]
    crate::validate(&graph);

    tracing::debug!(canonical = dedup.len(), "unit resolved");
    Ok(ResolvedUnit {
        external_only: config.external_only,
        graph,
    })
}
