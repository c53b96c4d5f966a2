//! # transit-network
//!
//! A static transit network as a weighted directed graph, with shortest-path
//! queries and structural analytics.
//!
//! ## Features
//!
//! - **Graph store**: stations in an arena, adjacency by identifier, built
//!   once and immutable afterwards
//! - **Routing**: Dijkstra shortest paths between stations by display name
//!   or identifier
//! - **Analysis**: line rosters, transfer stations, hub classification and
//!   bidirectional-edge auditing
//! - **CSV loading**: enable the `loader` feature
//!
//! ## Example
//!
//! ```
//! use transit_network::prelude::*;
//!
//! let mut builder = TransitGraphBuilder::new();
//! for id in ["A", "B", "C"] {
//!     let metro = [SystemIdentifier::new("Metro")];
//!     builder.add_station(id, id, metro, [LineIdentifier::new("Line 1")]);
//! }
//! builder.add_edge("A", "B", 5);
//! builder.add_edge("B", "C", 3);
//! builder.add_edge("A", "C", 10);
//! let graph = builder.build();
//!
//! let journey = Router::new(&graph).shortest_path("a", "c").unwrap();
//! assert_eq!(journey.total_minutes, 8);
//! assert_eq!(journey.stations.len(), 3);
//!
//! let hubs = NetworkAnalyzer::new(&graph).hub_classification();
//! assert_eq!(hubs.isolated.len(), 1); // C has no outgoing edges
//! ```

pub mod analysis;
pub mod graph;
pub mod identifiers;
#[cfg(feature = "loader")]
pub mod loader;
pub mod models;
pub mod routing;

// Re-exports for convenience
pub mod prelude {
    pub use crate::analysis::{
        AsymmetricEdge, BidirectionalAudit, Connectivity, HubClassification, LineRoster,
        NetworkAnalyzer, NetworkTotals, DEFAULT_PRIMARY_SYSTEM, HUB_MIN_CONNECTIONS,
    };
    pub use crate::graph::{
        EdgeOutcome, EdgeRecord, LoadSummary, StationRecord, TransitGraph, TransitGraphBuilder,
    };
    pub use crate::identifiers::*;
    pub use crate::models::{traits::*, types::*, Station};
    pub use crate::routing::{Journey, Router, Selection};
}

pub use prelude::*;
