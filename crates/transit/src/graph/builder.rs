//! Construction API for the transit graph.
//!
//! Stations go in first, then edges. Edges naming a station that was never
//! added are dropped and counted rather than failing the load. Calling
//! [`TransitGraphBuilder::build`] freezes the result into an immutable
//! [`TransitGraph`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::store::TransitGraph;
use crate::identifiers::*;
use crate::models::{Minutes, Result, Station, TransitError};

// ============================================================================
// Records
// ============================================================================

/// One row of the station source.
///
/// `system` and `lines` are semicolon-joined lists, e.g. `"Metro Line 1;Metro Line 2"`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct StationRecord {
    pub station_id: String,
    pub name: String,
    pub system: String,
    pub lines: String,
}

/// One row of the edge source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct EdgeRecord {
    pub from_station_id: String,
    pub to_station_id: String,
    pub weight: Minutes,
}

/// Split a semicolon-joined list, trimming entries and skipping empty ones
pub fn split_members(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Outcomes
// ============================================================================

/// What happened to a single `add_edge` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    Inserted,
    /// The edge already existed; its weight was overwritten.
    Updated { previous: Minutes },
    /// At least one endpoint is not a loaded station.
    Dropped,
}

/// Counters collected while the graph is being built
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Distinct stations in the graph
    pub stations: usize,
    /// Station additions that replaced an existing identifier
    pub replaced_stations: usize,
    /// Directed edges attached to the graph
    pub accepted_edges: usize,
    /// Edge additions that overwrote the weight of an existing edge
    pub updated_edges: usize,
    /// Edge additions with an unknown endpoint
    pub dropped_edges: usize,
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Debug, Default)]
pub struct TransitGraphBuilder {
    stations: Vec<Station>,
    index: HashMap<StationIdentifier, usize>,
    summary: LoadSummary,
}

impl TransitGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station, replacing any station already loaded under the same id.
    ///
    /// A replaced station keeps its insertion slot, takes the new name,
    /// systems and lines, and loses the outgoing edges attached so far.
    /// Returns `true` when a station was replaced.
    pub fn add_station(
        &mut self,
        id: impl Into<StationIdentifier>,
        name: impl Into<Arc<str>>,
        systems: impl IntoIterator<Item = SystemIdentifier>,
        lines: impl IntoIterator<Item = LineIdentifier>,
    ) -> bool {
        self.insert_station(Station::new(id.into(), name, systems, lines))
    }

    /// Add a station from a raw record, splitting its semicolon-joined lists
    pub fn add_station_record(&mut self, record: &StationRecord) -> Result<bool> {
        let id = record.station_id.trim();
        if id.is_empty() {
            return Err(TransitError::InvalidData(format!(
                "station '{}' has an empty station_id",
                record.name
            )));
        }

        Ok(self.add_station(
            id,
            record.name.as_str(),
            split_members(&record.system).map(SystemIdentifier::new),
            split_members(&record.lines).map(LineIdentifier::new),
        ))
    }

    fn insert_station(&mut self, station: Station) -> bool {
        match self.index.get(&station.id) {
            Some(&slot) => {
                log::warn!(
                    "Duplicate station id '{}': replacing '{}' with '{}'",
                    station.id,
                    self.stations[slot].name,
                    station.name
                );
                // The replacement starts with no outgoing edges.
                self.summary.accepted_edges -= self.stations[slot].connections.len();
                self.stations[slot] = station;
                self.summary.replaced_stations += 1;
                true
            }
            None => {
                self.index.insert(station.id.clone(), self.stations.len());
                self.stations.push(station);
                self.summary.stations += 1;
                false
            }
        }
    }

    /// Attach the directed edge `from -> to`.
    ///
    /// Re-adding an existing edge overwrites its weight.
    pub fn add_edge(&mut self, from: &str, to: &str, minutes: Minutes) -> EdgeOutcome {
        let (from_slot, to_slot) = match (self.index.get(from), self.index.get(to)) {
            (Some(&f), Some(&t)) => (f, t),
            (f, t) => {
                log::debug!(
                    "Dropping edge {} -> {} ({} min): unknown {}",
                    from,
                    to,
                    minutes,
                    match (f.is_none(), t.is_none()) {
                        (true, true) => "endpoints",
                        (true, false) => "origin",
                        _ => "destination",
                    }
                );
                self.summary.dropped_edges += 1;
                return EdgeOutcome::Dropped;
            }
        };

        let to_id = self.stations[to_slot].id.clone();
        match self.stations[from_slot].upsert_connection(to_id, minutes) {
            Some(previous) => {
                self.summary.updated_edges += 1;
                EdgeOutcome::Updated { previous }
            }
            None => {
                self.summary.accepted_edges += 1;
                EdgeOutcome::Inserted
            }
        }
    }

    pub fn add_edge_record(&mut self, record: &EdgeRecord) -> EdgeOutcome {
        self.add_edge(
            record.from_station_id.trim(),
            record.to_station_id.trim(),
            record.weight,
        )
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    /// Freeze the builder into an immutable graph
    pub fn build(self) -> TransitGraph {
        if self.summary.dropped_edges > 0 {
            log::warn!(
                "{} edges referenced unknown stations and were dropped",
                self.summary.dropped_edges
            );
        }
        TransitGraph::from_parts(self.stations, self.index, self.summary)
    }
}
