//! Read-only network statistics.
//!
//! Everything here is derived from the built graph on demand. Results that
//! list stations follow identifier order unless stated otherwise, so reports
//! are stable between runs.

use std::collections::BTreeMap;

use crate::graph::TransitGraph;
use crate::identifiers::*;
use crate::models::{Minutes, Station, TransitStation};

/// System whose lines are listed by default in the line roster
pub const DEFAULT_PRIMARY_SYSTEM: &str = "Metro";

/// Stations with at least this many outgoing edges are hubs
pub const HUB_MIN_CONNECTIONS: usize = 3;

// ============================================================================
// Report Types
// ============================================================================

/// Stations of one line, split by whether they connect to other lines
#[derive(Clone, Debug, Default)]
pub struct LineRoster<'g> {
    pub transfer_stations: Vec<&'g Station>,
    pub regular_stations: Vec<&'g Station>,
}

impl LineRoster<'_> {
    pub fn len(&self) -> usize {
        self.transfer_stations.len() + self.regular_stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outgoing-degree classification of a station
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// No outgoing edges
    Isolated,
    /// One or two outgoing edges
    Regular,
    /// `HUB_MIN_CONNECTIONS` or more outgoing edges
    Hub,
}

impl Connectivity {
    pub fn from_out_degree(degree: usize) -> Self {
        match degree {
            0 => Self::Isolated,
            d if d >= HUB_MIN_CONNECTIONS => Self::Hub,
            _ => Self::Regular,
        }
    }
}

/// Every station, in exactly one partition
#[derive(Clone, Debug, Default)]
pub struct HubClassification<'g> {
    pub isolated: Vec<&'g Station>,
    pub regular: Vec<&'g Station>,
    pub hubs: Vec<&'g Station>,
}

/// A directed edge whose reverse is missing or has a different weight
#[derive(Clone, Debug)]
pub struct AsymmetricEdge<'g> {
    pub from: &'g Station,
    pub to: &'g Station,
    pub minutes: Minutes,
    /// Weight of `to -> from`, if that edge exists
    pub reverse_minutes: Option<Minutes>,
}

#[derive(Clone, Debug, Default)]
pub struct BidirectionalAudit<'g> {
    /// Station pairs joined in both directions with equal weight
    pub bidirectional_pairs: usize,
    /// Ordered by origin identifier, then by the origin's edge order
    pub asymmetric_edges: Vec<AsymmetricEdge<'g>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkTotals {
    pub stations: usize,
    pub edges: usize,
    /// Sum over every directed edge; a bidirectional pair counts twice
    pub total_minutes: u64,
}

// ============================================================================
// Analyzer
// ============================================================================

#[derive(Clone, Copy, Debug)]
pub struct NetworkAnalyzer<'g> {
    graph: &'g TransitGraph,
}

impl<'g> NetworkAnalyzer<'g> {
    pub fn new(graph: &'g TransitGraph) -> Self {
        Self { graph }
    }

    /// Group the stations of `system` by line.
    ///
    /// A station on several lines is listed under each of them, as a
    /// transfer station. Both partitions are sorted by display name.
    pub fn line_roster(&self, system: &str) -> BTreeMap<LineIdentifier, LineRoster<'g>> {
        let mut roster: BTreeMap<LineIdentifier, LineRoster<'g>> = BTreeMap::new();

        for station in self
            .graph
            .stations_ordered_by_id()
            .filter(|s| s.belongs_to_system(system))
        {
            for line in station.lines() {
                let entry = roster.entry(line.clone()).or_default();
                if station.is_transfer() {
                    entry.transfer_stations.push(station);
                } else {
                    entry.regular_stations.push(station);
                }
            }
        }

        for entry in roster.values_mut() {
            // Stable sort keeps identifier order among equal names.
            entry.transfer_stations.sort_by(|a, b| a.name.cmp(&b.name));
            entry.regular_stations.sort_by(|a, b| a.name.cmp(&b.name));
        }

        roster
    }

    /// Every station that belongs to more than one line, in identifier order
    pub fn transfer_stations(&self) -> Vec<&'g Station> {
        self.graph
            .stations_ordered_by_id()
            .filter(|s| s.is_transfer())
            .collect()
    }

    pub fn hub_classification(&self) -> HubClassification<'g> {
        let mut classes = HubClassification::default();
        for station in self.graph.stations_ordered_by_id() {
            match Connectivity::from_out_degree(station.out_degree()) {
                Connectivity::Isolated => classes.isolated.push(station),
                Connectivity::Regular => classes.regular.push(station),
                Connectivity::Hub => classes.hubs.push(station),
            }
        }
        classes
    }

    /// Check every directed edge for an equal-weight reverse edge.
    ///
    /// Each matched edge is half of a pair, so the pair count is the number
    /// of matched edges divided by two. A self-loop is its own reverse and
    /// counts as a whole pair.
    pub fn bidirectional_audit(&self) -> BidirectionalAudit<'g> {
        let mut matched_halves = 0;
        let mut asymmetric_edges = Vec::new();

        for from in self.graph.stations_ordered_by_id() {
            for connection in from.connections() {
                let Some(to) = self.graph.get(connection.to.as_str()) else {
                    continue;
                };

                let reverse_minutes = to.minutes_to(&from.id);
                if reverse_minutes == Some(connection.minutes) {
                    matched_halves += if to.id == from.id { 2 } else { 1 };
                } else {
                    asymmetric_edges.push(AsymmetricEdge {
                        from,
                        to,
                        minutes: connection.minutes,
                        reverse_minutes,
                    });
                }
            }
        }

        BidirectionalAudit {
            bidirectional_pairs: matched_halves / 2,
            asymmetric_edges,
        }
    }

    pub fn totals(&self) -> NetworkTotals {
        let (edges, total_minutes) = self
            .graph
            .stations()
            .flat_map(|s| s.connections())
            .fold((0, 0u64), |(count, sum), c| {
                (count + 1, sum + u64::from(c.minutes))
            });

        NetworkTotals {
            stations: self.graph.len(),
            edges,
            total_minutes,
        }
    }
}
