//! Tydi IR - Intermediate Representation for the resolution pipeline
//!
//! This crate contains the data structures shared by the resolver and the
//! renderer:
//! - Arena ids (`LogicTypeId`, `StreamletId`, `ImplId`)
//! - Qualified-key parsing (`key`)
//! - Logic types, streamlets, implementations and netlists
//! - The owned `Graph` of one input unit and its JSON-shaped export
//! - The wire-format input model (`raw`)
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: entities link to each other through `u32` ids
//!   into one arena, never through shared mutable references
//! - **Two Phases**: the `raw` input index is immutable; resolution builds a
//!   separate owned `Graph`
//! - **Order Matters**: every mapping preserves declaration order, because
//!   discovery order decides canonical representatives

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod graph;
mod ids;
pub mod key;
mod logic_type;
pub mod netlist;
pub mod raw;

pub use graph::Graph;
pub use ids::{ImplId, LogicTypeId, StreamletId};
pub use key::{KeyError, ScopeInfo, ScopeType};
pub use logic_type::{Elements, LogicKind, LogicPayload, LogicType, StreamProps};
pub use netlist::{
    Direction, ImplKind, Implementation, Instance, Net, NetOwner, NetResolution, Port, Streamlet,
    SubstreamConnection, SubstreamPath,
};
pub use raw::RawGraph;
