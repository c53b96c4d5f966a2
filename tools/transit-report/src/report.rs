use std::collections::BTreeMap;
use std::io::{self, Write};

use transit_network::prelude::*;

/// Print every station and its outgoing connections, ordered by station id
pub fn write_graph(out: &mut impl Write, graph: &TransitGraph) -> io::Result<()> {
    writeln!(out, "--- Transit Graph Structure ---")?;
    if graph.is_empty() {
        writeln!(out, "Graph is empty.")?;
        return Ok(());
    }

    for station in graph.stations_ordered_by_id() {
        writeln!(out)?;
        writeln!(out, "Node: {} ({})", station.name(), station.id())?;
        if station.connections().is_empty() {
            writeln!(out, "  -> No outgoing connections.")?;
            continue;
        }
        for connection in station.connections() {
            let neighbor = graph
                .get(connection.to.as_str())
                .map(|s| s.name())
                .unwrap_or(connection.to.as_str());
            writeln!(out, "  -> connects to {} (cost: {})", neighbor, connection.minutes)?;
        }
    }
    Ok(())
}

pub fn write_journey(out: &mut impl Write, journey: &Journey<'_>) -> io::Result<()> {
    writeln!(
        out,
        "Route from {} to {}: {} min, {} stops",
        journey.origin().name(),
        journey.destination().name(),
        journey.total_minutes,
        journey.hops()
    )?;

    writeln!(out, "  {}", journey.origin().name())?;
    for (_, to, minutes) in journey.legs() {
        writeln!(out, "  -> {} (+{} min)", to.name(), minutes)?;
    }
    Ok(())
}

pub fn write_line_roster(
    out: &mut impl Write,
    system: &str,
    roster: &BTreeMap<LineIdentifier, LineRoster<'_>>,
) -> io::Result<()> {
    writeln!(out, "--- {} Lines ---", system)?;
    if roster.is_empty() {
        writeln!(out, "No stations belong to system '{}'.", system)?;
        return Ok(());
    }

    for (line, stations) in roster {
        writeln!(out)?;
        writeln!(out, "{} ({} stations)", line, stations.len())?;
        if !stations.transfer_stations.is_empty() {
            writeln!(out, "  Transfer stations:")?;
            for station in &stations.transfer_stations {
                writeln!(out, "    * {} [{}]", station.name(), join(station.lines()))?;
            }
        }
        if !stations.regular_stations.is_empty() {
            writeln!(out, "  Stations:")?;
            for station in &stations.regular_stations {
                writeln!(out, "    - {}", station.name())?;
            }
        }
    }
    Ok(())
}

pub fn write_hubs(out: &mut impl Write, classes: &HubClassification<'_>) -> io::Result<()> {
    writeln!(out, "--- Connectivity ---")?;
    writeln!(
        out,
        "Hubs ({}+ connections): {}",
        HUB_MIN_CONNECTIONS,
        classes.hubs.len()
    )?;
    for station in &classes.hubs {
        writeln!(out, "  * {} ({} connections)", station.name(), station.out_degree())?;
    }
    writeln!(out, "Regular stations: {}", classes.regular.len())?;
    writeln!(out, "Isolated stations: {}", classes.isolated.len())?;
    for station in &classes.isolated {
        writeln!(out, "  ! {} ({})", station.name(), station.id())?;
    }
    Ok(())
}

pub fn write_audit(out: &mut impl Write, audit: &BidirectionalAudit<'_>) -> io::Result<()> {
    writeln!(out, "--- Bidirectional Audit ---")?;
    writeln!(out, "Bidirectional pairs: {}", audit.bidirectional_pairs)?;
    writeln!(out, "Asymmetric edges: {}", audit.asymmetric_edges.len())?;
    for edge in &audit.asymmetric_edges {
        match edge.reverse_minutes {
            Some(reverse) => writeln!(
                out,
                "  {} -> {} ({} min), reverse is {} min",
                edge.from.name(),
                edge.to.name(),
                edge.minutes,
                reverse
            )?,
            None => writeln!(
                out,
                "  {} -> {} ({} min), one-way",
                edge.from.name(),
                edge.to.name(),
                edge.minutes
            )?,
        }
    }
    Ok(())
}

pub fn write_totals(out: &mut impl Write, totals: &NetworkTotals) -> io::Result<()> {
    writeln!(out, "--- Network Summary ---")?;
    writeln!(out, "Stations: {}", totals.stations)?;
    writeln!(out, "Connections: {}", totals.edges)?;
    writeln!(out, "Total travel time: {} min", totals.total_minutes)?;
    Ok(())
}

pub fn log_load_summary(summary: &LoadSummary) {
    log::info!("=== Load Statistics ===");
    log::info!("Stations: {}", summary.stations);
    log::info!("Edges in graph: {}", summary.accepted_edges);
    if summary.updated_edges > 0 {
        log::info!("Edges overwritten by later rows: {}", summary.updated_edges);
    }
    if summary.replaced_stations > 0 {
        log::warn!("Stations replaced by duplicate ids: {}", summary.replaced_stations);
    }
    if summary.dropped_edges > 0 {
        log::warn!("Edges dropped (unknown station): {}", summary.dropped_edges);
    }
}

fn join(lines: &[LineIdentifier]) -> String {
    lines
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransitGraph {
        let mut builder = TransitGraphBuilder::new();
        builder.add_station(
            "pino_suarez",
            "Pino Suárez",
            [SystemIdentifier::new("Metro")],
            [LineIdentifier::new("Line 1"), LineIdentifier::new("Line 2")],
        );
        builder.add_station(
            "zocalo",
            "Zócalo",
            [SystemIdentifier::new("Metro")],
            [LineIdentifier::new("Line 2")],
        );
        builder.add_station("depot", "Depot", [], []);
        builder.add_edge("pino_suarez", "zocalo", 2);
        builder.add_edge("zocalo", "pino_suarez", 3);
        builder.build()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_graph() {
        let graph = sample();
        let text = render(|out| write_graph(out, &graph));

        assert!(text.starts_with("--- Transit Graph Structure ---"));
        assert!(text.contains("Node: Depot (depot)\n  -> No outgoing connections."));
        assert!(text.contains(
            "Node: Pino Suárez (pino_suarez)\n  -> connects to Zócalo (cost: 2)"
        ));
        // Ordered by id: depot, pino_suarez, zocalo
        let depot = text.find("(depot)").unwrap();
        let zocalo = text.find("(zocalo)").unwrap();
        assert!(depot < zocalo);
    }

    #[test]
    fn test_write_empty_graph() {
        let graph = TransitGraphBuilder::new().build();
        let text = render(|out| write_graph(out, &graph));
        assert!(text.contains("Graph is empty."));
    }

    #[test]
    fn test_write_journey() {
        let graph = sample();
        let journey = Router::new(&graph).shortest_path("zócalo", "pino suárez").unwrap();
        let text = render(|out| write_journey(out, &journey));

        assert!(text.contains("Route from Zócalo to Pino Suárez: 3 min, 1 stops"));
        assert!(text.contains("  -> Pino Suárez (+3 min)"));
    }

    #[test]
    fn test_write_line_roster() {
        let graph = sample();
        let roster = NetworkAnalyzer::new(&graph).line_roster("Metro");
        let text = render(|out| write_line_roster(out, "Metro", &roster));

        assert!(text.contains("Line 2 (2 stations)"));
        assert!(text.contains("    * Pino Suárez [Line 1, Line 2]"));
        assert!(text.contains("    - Zócalo"));

        let empty = NetworkAnalyzer::new(&graph).line_roster("Ferry");
        let text = render(|out| write_line_roster(out, "Ferry", &empty));
        assert!(text.contains("No stations belong to system 'Ferry'."));
    }

    #[test]
    fn test_write_audit_and_totals() {
        let graph = sample();
        let analyzer = NetworkAnalyzer::new(&graph);

        let text = render(|out| write_audit(out, &analyzer.bidirectional_audit()));
        assert!(text.contains("Bidirectional pairs: 0"));
        assert!(text.contains("Pino Suárez -> Zócalo (2 min), reverse is 3 min"));

        let text = render(|out| write_totals(out, &analyzer.totals()));
        assert!(text.contains("Connections: 2"));
        assert!(text.contains("Total travel time: 5 min"));
    }

    #[test]
    fn test_write_hubs() {
        let graph = sample();
        let classes = NetworkAnalyzer::new(&graph).hub_classification();
        let text = render(|out| write_hubs(out, &classes));
        assert!(text.contains("Isolated stations: 1"));
        assert!(text.contains("  ! Depot (depot)"));
    }
}
