//! Discovery of streams nested inside a stream's data type.
//!
//! A port carries one Stream, but the Stream's data type may be a tree of
//! Groups and Unions with further Streams at any depth. Each nested Stream
//! becomes a [`SubstreamConnection`] whose path is the sequence of
//! `"el", <element>` steps leading to it from the owning stream.

use rustc_hash::FxHashSet;
use tydi_ir::netlist::ELEMENT_SEGMENT;
use tydi_ir::{Graph, LogicTypeId, SubstreamConnection, SubstreamPath};

use crate::{ResolveError, Result};

/// Every Stream nested in `stream`'s data type, depth-first in element order.
///
/// Empty unless `stream` is a Stream whose data type is a Group or Union.
/// All links must already be concrete.
pub fn find_substreams(graph: &Graph, stream: LogicTypeId) -> Result<Vec<SubstreamConnection>> {
    let mut found = Vec::new();
    if let Some(props) = graph.logic_type(stream).as_stream() {
        let mut walker = Walker {
            graph,
            on_path: FxHashSet::default(),
            found: &mut found,
        };
        walker.walk(props.stream_type, &SubstreamPath::new())?;
    }
    Ok(found)
}

struct Walker<'a> {
    graph: &'a Graph,
    /// Composites on the current walk path.
    on_path: FxHashSet<LogicTypeId>,
    found: &'a mut Vec<SubstreamConnection>,
}

impl Walker<'_> {
    fn walk(&mut self, data: LogicTypeId, path: &SubstreamPath) -> Result<()> {
        let graph = self.graph;
        let ty = graph.logic_type(data);
        let Some(elements) = ty.elements() else {
            return Ok(());
        };
        if !self.on_path.insert(data) {
            return Err(ResolveError::CycleDetected {
                key: ty.key.clone(),
            });
        }

        for (name, &element) in elements {
            let mut element_path = path.clone();
            element_path.push(ELEMENT_SEGMENT.to_owned());
            element_path.push(name.clone());

            let element_ty = graph.logic_type(element);
            if let Some(props) = element_ty.as_stream() {
                self.found.push(SubstreamConnection {
                    name: name.clone(),
                    path: element_path.clone(),
                });
                self.walk(props.stream_type, &element_path)?;
            } else {
                self.walk(element, &element_path)?;
            }
        }

        self.on_path.remove(&data);
        Ok(())
    }
}
