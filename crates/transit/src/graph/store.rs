//! The immutable, in-memory transit graph.
//!
//! Stations live in an arena; adjacency lists refer to neighbors by
//! identifier only, so no station owns another. Once built the graph has no
//! mutation API and can be shared freely (e.g. behind an `Arc`) between
//! concurrent readers.

use std::collections::HashMap;

use crate::graph::builder::LoadSummary;
use crate::identifiers::*;
use crate::models::{Station, TransitStation};

#[derive(Clone, Debug)]
pub struct TransitGraph {
    // Core data, in insertion order
    stations: Vec<Station>,

    // Lookup maps
    index: HashMap<StationIdentifier, usize>,
    folded_names: Vec<String>,

    // Arena slots sorted by station identifier
    by_id: Vec<usize>,

    summary: LoadSummary,
}

impl TransitGraph {
    pub(crate) fn from_parts(
        stations: Vec<Station>,
        index: HashMap<StationIdentifier, usize>,
        summary: LoadSummary,
    ) -> Self {
        let folded_names = stations.iter().map(|s| s.name.to_lowercase()).collect();

        let mut by_id: Vec<usize> = (0..stations.len()).collect();
        by_id.sort_by(|&a, &b| stations[a].id.cmp(&stations[b].id));

        Self {
            stations,
            index,
            folded_names,
            by_id,
            summary,
        }
    }

    /// Exact lookup by identifier
    pub fn get(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&slot| &self.stations[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Case-insensitive lookup by display name.
    ///
    /// Display names are not unique. When several stations share a name the
    /// first one in insertion order wins; use [`find_all_by_name`] and pick by
    /// identifier when that matters.
    ///
    /// [`find_all_by_name`]: TransitGraph::find_all_by_name
    pub fn find_by_name(&self, name: &str) -> Option<&Station> {
        self.find_all_by_name(name).next()
    }

    /// Every station whose display name matches `name`, case-insensitively
    pub fn find_all_by_name<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Station> + 'a {
        let needle = name.to_lowercase();
        self.folded_names
            .iter()
            .zip(&self.stations)
            .filter(move |(folded, _)| **folded == needle)
            .map(|(_, station)| station)
    }

    /// All stations in insertion order
    pub fn stations(&self) -> impl ExactSizeIterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    /// All stations sorted by identifier.
    ///
    /// The iterator is cheap to clone, so it can be walked more than once.
    pub fn stations_ordered_by_id(&self) -> impl ExactSizeIterator<Item = &Station> + Clone + '_ {
        self.by_id.iter().map(move |&slot| &self.stations[slot])
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.stations.iter().map(|s| s.out_degree()).sum()
    }

    /// Counters recorded while the graph was built
    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    // ---- Arena access for the router ----

    pub(crate) fn slot_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn station_at(&self, slot: usize) -> &Station {
        &self.stations[slot]
    }
}
