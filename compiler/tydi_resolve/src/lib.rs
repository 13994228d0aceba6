//! Multi-pass resolution of Tydi logic types, streamlets and implementations.
//!
//! Takes one unresolved unit ([`RawGraph`]) and produces a fully resolved,
//! deduplicated and named [`Graph`] for code emission.
//!
//! # Pipeline Position
//!
//! ```text
//! Front end → JSON → **Resolve** → Renderer → target HDL
//! ```
//!
//! # Passes
//!
//! 1. **Logic types** (`logic_types`): chase `Ref` chains to concrete types,
//!    accumulate aliases, canonicalize by `(name, kind)`
//! 2. **Ports** (`ports`): type every port by a concrete Stream and record
//!    the streams nested in its data type
//! 3. **Implementations** (`implementations`, `nets`): link streamlets and
//!    instances across the unit, then resolve net endpoints
//! 4. **Alias promotion** (`naming`): adopt the last discovered alias
//! 5. **Auto-naming** (`naming`, optional): name anonymous streams after
//!    their non-default properties
//!
//! [`RawGraph`]: tydi_ir::RawGraph
//! [`Graph`]: tydi_ir::Graph

mod auto_name;
mod dedup;
mod error;
mod implementations;
mod ingest;
mod logic_types;
mod naming;
mod nets;
mod pipeline;
mod ports;
mod reference;
mod substream;
mod validate;

#[cfg(test)]
mod test_support;

pub use auto_name::{is_generated, stream_name, GENERATED_PREFIX};
pub use dedup::Deduplicator;
pub use error::{ResolveError, Result};
pub use ingest::build;
pub use pipeline::{resolve, ResolveConfig, ResolvedUnit};
pub use reference::{chase, resolve_chain};
pub use substream::find_substreams;
pub use validate::validate;
