//! The graph store and its construction API.

pub mod builder;
pub mod store;

pub use builder::{
    split_members, EdgeOutcome, EdgeRecord, LoadSummary, StationRecord, TransitGraphBuilder,
};
pub use store::TransitGraph;
