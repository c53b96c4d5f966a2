//! Shortest-path queries over the transit graph.
//!
//! Single-source Dijkstra with early exit once the destination is settled.
//! Two frontier strategies are available:
//!
//! - [`Selection::LinearScan`]: scan every unvisited station for the minimum
//!   tentative time. O(V²), which is fine for networks of a few hundred
//!   stations and needs no extra allocation per relaxation.
//! - [`Selection::BinaryHeap`]: a min-heap with lazy deletion, O((V+E) log V).
//!
//! Both return the same total travel time. When several paths tie, which one
//! is returned is unspecified and may differ between strategies.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::TransitGraph;
use crate::models::{Minutes, Result, Station, TransitError, TransitStation};

const UNREACHED: u64 = u64::MAX;

/// How the router picks the next station to settle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    LinearScan,
    #[default]
    BinaryHeap,
}

/// A minimum-time path between two stations
#[derive(Clone, Debug)]
pub struct Journey<'g> {
    /// Sum of edge weights along `stations`
    pub total_minutes: u64,
    /// Visited stations from origin to destination, both inclusive
    pub stations: Vec<&'g Station>,
}

impl<'g> Journey<'g> {
    pub fn origin(&self) -> &'g Station {
        self.stations[0]
    }

    pub fn destination(&self) -> &'g Station {
        self.stations[self.stations.len() - 1]
    }

    /// Number of edges travelled
    pub fn hops(&self) -> usize {
        self.stations.len() - 1
    }

    /// Each travelled edge with its weight
    pub fn legs(&self) -> impl Iterator<Item = (&'g Station, &'g Station, Minutes)> + '_ {
        self.stations.windows(2).map(|pair| {
            let minutes = pair[0].minutes_to(&pair[1].id).unwrap_or_default();
            (pair[0], pair[1], minutes)
        })
    }
}

/// Settled distances and predecessors from one search
struct SearchTree {
    distance: Vec<u64>,
    previous: Vec<Option<usize>>,
}

impl SearchTree {
    fn new(size: usize, start: usize) -> Self {
        let mut distance = vec![UNREACHED; size];
        distance[start] = 0;
        Self {
            distance,
            previous: vec![None; size],
        }
    }

    /// Walk predecessors back from `target`; `None` if it was never reached.
    fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if self.distance[target] == UNREACHED {
            return None;
        }

        let mut path = vec![target];
        let mut cursor = target;
        while let Some(prev) = self.previous[cursor] {
            path.push(prev);
            cursor = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Answers shortest-path queries against a built graph
#[derive(Clone, Copy, Debug)]
pub struct Router<'g> {
    graph: &'g TransitGraph,
    selection: Selection,
}

impl<'g> Router<'g> {
    pub fn new(graph: &'g TransitGraph) -> Self {
        Self {
            graph,
            selection: Selection::default(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Fastest journey between two stations given by display name.
    ///
    /// Names resolve through [`TransitGraph::find_by_name`], so with duplicate
    /// display names the first loaded station is used.
    pub fn shortest_path(&self, start_name: &str, end_name: &str) -> Result<Journey<'g>> {
        let start = self
            .graph
            .find_by_name(start_name)
            .ok_or_else(|| TransitError::StationNotFound(start_name.to_string()))?;
        let end = self
            .graph
            .find_by_name(end_name)
            .ok_or_else(|| TransitError::StationNotFound(end_name.to_string()))?;

        self.shortest_path_between_ids(start.id.as_str(), end.id.as_str())
    }

    /// Fastest journey between two stations given by identifier
    pub fn shortest_path_between_ids(&self, start_id: &str, end_id: &str) -> Result<Journey<'g>> {
        let start = self.resolve_id(start_id)?;
        let end = self.resolve_id(end_id)?;

        let tree = self.search(start, Some(end));
        let path = tree.path_to(end).ok_or_else(|| TransitError::NoPathExists {
            start: self.graph.station_at(start).name.to_string(),
            end: self.graph.station_at(end).name.to_string(),
        })?;

        Ok(Journey {
            total_minutes: tree.distance[end],
            stations: path
                .into_iter()
                .map(|slot| self.graph.station_at(slot))
                .collect(),
        })
    }

    /// Minimum travel time from `start_id` to every reachable station,
    /// ordered by station identifier.
    pub fn travel_times_from(&self, start_id: &str) -> Result<Vec<(&'g Station, u64)>> {
        let start = self.resolve_id(start_id)?;
        let tree = self.search(start, None);

        Ok(self
            .graph
            .stations_ordered_by_id()
            .filter_map(|station| {
                let slot = self.graph.slot_of(station.id.as_str())?;
                let distance = tree.distance[slot];
                (distance != UNREACHED).then_some((station, distance))
            })
            .collect())
    }

    fn resolve_id(&self, id: &str) -> Result<usize> {
        self.graph
            .slot_of(id)
            .ok_or_else(|| TransitError::StationNotFound(id.to_string()))
    }

    fn search(&self, start: usize, target: Option<usize>) -> SearchTree {
        match self.selection {
            Selection::LinearScan => self.search_linear(start, target),
            Selection::BinaryHeap => self.search_heap(start, target),
        }
    }

    fn search_linear(&self, start: usize, target: Option<usize>) -> SearchTree {
        let size = self.graph.len();
        let mut tree = SearchTree::new(size, start);
        let mut unvisited = vec![true; size];

        loop {
            // Unreached stations can never be selected; stop once only they remain.
            let current = (0..size)
                .filter(|&slot| unvisited[slot] && tree.distance[slot] != UNREACHED)
                .min_by_key(|&slot| tree.distance[slot]);
            let Some(current) = current else { break };

            unvisited[current] = false;
            if Some(current) == target {
                break;
            }

            self.relax(current, &mut tree, |_, _| {});
        }

        tree
    }

    fn search_heap(&self, start: usize, target: Option<usize>) -> SearchTree {
        let size = self.graph.len();
        let mut tree = SearchTree::new(size, start);
        let mut settled = vec![false; size];

        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
        heap.push(Reverse((0, start)));

        while let Some(Reverse((_, current))) = heap.pop() {
            if settled[current] {
                continue;
            }
            settled[current] = true;
            if Some(current) == target {
                break;
            }

            self.relax(current, &mut tree, |slot, distance| {
                heap.push(Reverse((distance, slot)));
            });
        }

        tree
    }

    /// Relax every outgoing edge of `current`, reporting each improvement
    fn relax(&self, current: usize, tree: &mut SearchTree, mut improved: impl FnMut(usize, u64)) {
        let base = tree.distance[current];
        for connection in self.graph.station_at(current).connections() {
            // Edges only ever point at loaded stations.
            let Some(next) = self.graph.slot_of(connection.to.as_str()) else {
                continue;
            };

            let alt = base + u64::from(connection.minutes);
            if alt < tree.distance[next] {
                tree.distance[next] = alt;
                tree.previous[next] = Some(current);
                improved(next, alt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NetworkAnalyzer;
    use crate::graph::TransitGraphBuilder;
    use crate::identifiers::LineIdentifier;

    const STRATEGIES: [Selection; 2] = [Selection::LinearScan, Selection::BinaryHeap];

    fn graph_from(stations: &[&str], edges: &[(&str, &str, Minutes)]) -> TransitGraph {
        let mut builder = TransitGraphBuilder::new();
        for id in stations {
            builder.add_station(*id, *id, [], [LineIdentifier::new("L1")]);
        }
        for (from, to, minutes) in edges {
            builder.add_edge(from, to, *minutes);
        }
        builder.build()
    }

    fn abc() -> TransitGraph {
        graph_from(
            &["A", "B", "C", "Z"],
            &[("A", "B", 5), ("B", "C", 3), ("A", "C", 10)],
        )
    }

    fn ids(journey: &Journey<'_>) -> Vec<String> {
        journey.stations.iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn test_prefers_cheaper_indirect_path() {
        let graph = abc();
        for selection in STRATEGIES {
            let journey = Router::new(&graph)
                .with_selection(selection)
                .shortest_path("A", "C")
                .unwrap();

            assert_eq!(journey.total_minutes, 8);
            assert_eq!(ids(&journey), vec!["A", "B", "C"]);
            assert_eq!(journey.hops(), 2);

            let legs: Vec<Minutes> = journey.legs().map(|(_, _, m)| m).collect();
            assert_eq!(legs, vec![5, 3]);
        }
    }

    #[test]
    fn test_names_resolve_case_insensitively() {
        let graph = abc();
        let journey = Router::new(&graph).shortest_path("a", "c").unwrap();
        assert_eq!(journey.total_minutes, 8);
    }

    #[test]
    fn test_unknown_station() {
        let graph = abc();
        let router = Router::new(&graph);

        match router.shortest_path("A", "D") {
            Err(TransitError::StationNotFound(name)) => assert_eq!(name, "D"),
            other => panic!("expected StationNotFound, got {:?}", other),
        }
        match router.shortest_path("Q", "A") {
            Err(TransitError::StationNotFound(name)) => assert_eq!(name, "Q"),
            other => panic!("expected StationNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_isolated_destination_has_no_path() {
        let graph = abc();
        let isolated = NetworkAnalyzer::new(&graph).hub_classification().isolated;
        assert!(isolated.iter().any(|s| s.id.as_str() == "Z"));

        for selection in STRATEGIES {
            let router = Router::new(&graph).with_selection(selection);
            for start in ["A", "B", "C"] {
                match router.shortest_path(start, "Z") {
                    Err(TransitError::NoPathExists { start: s, end }) => {
                        assert_eq!(s, start);
                        assert_eq!(end, "Z");
                    }
                    other => panic!("expected NoPathExists, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_direction_matters() {
        let graph = abc();
        let router = Router::new(&graph);
        assert!(router.shortest_path("A", "C").is_ok());
        assert!(matches!(
            router.shortest_path("C", "A"),
            Err(TransitError::NoPathExists { .. })
        ));
    }

    #[test]
    fn test_same_station_is_free() {
        let graph = abc();
        for selection in STRATEGIES {
            let router = Router::new(&graph).with_selection(selection);
            for name in ["A", "Z"] {
                let journey = router.shortest_path(name, name).unwrap();
                assert_eq!(journey.total_minutes, 0);
                assert_eq!(journey.stations.len(), 1);
                assert_eq!(journey.origin().id, journey.destination().id);
            }
        }
    }

    #[test]
    fn test_ties_give_same_weight() {
        // Two equal-cost routes from S to T
        let graph = graph_from(
            &["S", "L", "R", "T"],
            &[("S", "L", 2), ("L", "T", 2), ("S", "R", 1), ("R", "T", 3)],
        );
        for selection in STRATEGIES {
            let journey = Router::new(&graph)
                .with_selection(selection)
                .shortest_path("S", "T")
                .unwrap();
            assert_eq!(journey.total_minutes, 4);
            assert_eq!(journey.origin().id.as_str(), "S");
            assert_eq!(journey.destination().id.as_str(), "T");
            assert_eq!(journey.stations.len(), 3);
        }
    }

    #[test]
    fn test_zero_weight_edges() {
        let graph = graph_from(
            &["A", "B", "C"],
            &[("A", "B", 0), ("B", "C", 0), ("A", "C", 1)],
        );
        let journey = Router::new(&graph).shortest_path("A", "C").unwrap();
        assert_eq!(journey.total_minutes, 0);
    }

    #[test]
    fn test_lookup_by_id_disambiguates_duplicate_names() {
        let mut builder = TransitGraphBuilder::new();
        builder.add_station("allende_metro", "Allende", [], []);
        builder.add_station("allende_bus", "Allende", [], []);
        builder.add_station("zocalo", "Zócalo", [], []);
        builder.add_edge("allende_bus", "zocalo", 6);
        let graph = builder.build();
        let router = Router::new(&graph);

        // By name the metro station wins and it has no outgoing edges
        assert!(matches!(
            router.shortest_path("Allende", "Zócalo"),
            Err(TransitError::NoPathExists { .. })
        ));

        let journey = router
            .shortest_path_between_ids("allende_bus", "zocalo")
            .unwrap();
        assert_eq!(journey.total_minutes, 6);

        assert!(matches!(
            router.shortest_path_between_ids("allende", "zocalo"),
            Err(TransitError::StationNotFound(_))
        ));
    }

    /// Deterministic pseudo-random graph, so the property tests need no extra crates
    fn lattice(size: usize, seed: u64) -> (Vec<String>, Vec<(String, String, Minutes)>) {
        let names: Vec<String> = (0..size).map(|i| format!("s{:02}", i)).collect();
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as usize
        };

        let mut edges = Vec::new();
        for _ in 0..size * 3 {
            let from = next() % size;
            let to = next() % size;
            let minutes = (next() % 12) as Minutes;
            edges.push((names[from].clone(), names[to].clone(), minutes));
        }
        (names, edges)
    }

    fn build(names: &[String], edges: &[(String, String, Minutes)]) -> TransitGraph {
        let mut builder = TransitGraphBuilder::new();
        for name in names {
            builder.add_station(name.as_str(), name.as_str(), [], []);
        }
        for (from, to, minutes) in edges {
            builder.add_edge(from, to, *minutes);
        }
        builder.build()
    }

    #[test]
    fn test_strategies_agree_on_weights() {
        for seed in 1..=8 {
            let (names, edges) = lattice(20, seed);
            let graph = build(&names, &edges);
            let linear = Router::new(&graph).with_selection(Selection::LinearScan);
            let heap = Router::new(&graph).with_selection(Selection::BinaryHeap);

            for start in &names {
                for end in &names {
                    let a = linear.shortest_path(start, end).map(|j| j.total_minutes);
                    let b = heap.shortest_path(start, end).map(|j| j.total_minutes);
                    match (a, b) {
                        (Ok(x), Ok(y)) => assert_eq!(x, y, "{} -> {}", start, end),
                        (Err(_), Err(_)) => {}
                        (x, y) => panic!("{} -> {}: {:?} vs {:?}", start, end, x, y),
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_path_iff_unreachable() {
        for seed in 1..=8 {
            let (names, edges) = lattice(15, seed);
            let graph = build(&names, &edges);
            let router = Router::new(&graph);

            for start in &names {
                let reachable: Vec<String> = router
                    .travel_times_from(start)
                    .unwrap()
                    .into_iter()
                    .map(|(s, _)| s.id.to_string())
                    .collect();

                for end in &names {
                    let result = router.shortest_path(start, end);
                    assert_eq!(result.is_ok(), reachable.contains(end), "{} -> {}", start, end);
                }
            }
        }
    }

    #[test]
    fn test_journey_weight_matches_its_legs() {
        let (names, edges) = lattice(20, 42);
        let graph = build(&names, &edges);
        let router = Router::new(&graph);

        for end in &names {
            if let Ok(journey) = router.shortest_path("s00", end) {
                let sum: u64 = journey.legs().map(|(_, _, m)| u64::from(m)).sum();
                assert_eq!(sum, journey.total_minutes);
            }
        }
    }

    fn time_to(times: &[(&Station, u64)], id: &str) -> Option<u64> {
        times
            .iter()
            .find(|(s, _)| s.id.as_str() == id)
            .map(|&(_, d)| d)
    }

    #[test]
    fn test_adding_an_edge_respects_relaxation() {
        let (names, mut edges) = lattice(15, 7);
        edges.retain(|(from, to, _)| !(from == "s03" && to == "s11"));
        let before = build(&names, &edges);
        let times_before = Router::new(&before).travel_times_from("s00").unwrap();

        edges.push(("s03".into(), "s11".into(), 2));
        let after = build(&names, &edges);
        let times_after = Router::new(&after).travel_times_from("s00").unwrap();

        for name in &names {
            if let Some(old) = time_to(&times_before, name) {
                let new = time_to(&times_after, name).unwrap();
                assert!(new <= old, "{} got slower", name);
            }
        }
        if let Some(a) = time_to(&times_after, "s03") {
            let b = time_to(&times_after, "s11").unwrap();
            assert!(b <= a + 2);
        }
    }
}
