//! CSV sources for the graph builder.
//!
//! Expected headers:
//!
//! - stations: `station_id,name,system,lines`
//! - edges: `from_station_id,to_station_id,weight`
//!
//! `system` and `lines` hold semicolon-joined lists. `weight` must be a
//! non-negative integer; anything else fails the load with the offending row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;

use crate::graph::{EdgeOutcome, EdgeRecord, StationRecord, TransitGraph, TransitGraphBuilder};
use crate::models::Result;

pub fn read_station_records<R: Read>(reader: R) -> Result<Vec<StationRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<StationRecord>() {
        records.push(row?);
    }
    Ok(records)
}

pub fn read_edge_records<R: Read>(reader: R) -> Result<Vec<EdgeRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<EdgeRecord>() {
        records.push(row?);
    }
    Ok(records)
}

/// Parse station rows and add them to `builder`. Returns the rows read.
pub fn load_stations<R: Read>(reader: R, builder: &mut TransitGraphBuilder) -> Result<usize> {
    let records = read_station_records(reader)?;
    for record in &records {
        builder.add_station_record(record)?;
    }
    log::info!("Loaded {} nodes into the graph.", builder.station_count());
    Ok(records.len())
}

/// Parse edge rows and attach them to `builder`. Returns the edges accepted.
pub fn load_edges<R: Read>(reader: R, builder: &mut TransitGraphBuilder) -> Result<usize> {
    let records = read_edge_records(reader)?;
    let mut accepted = 0;
    for record in &records {
        if builder.add_edge_record(record) != EdgeOutcome::Dropped {
            accepted += 1;
        }
    }
    log::info!("Loaded {} edges, connecting the nodes.", accepted);
    Ok(accepted)
}

/// Build a graph from a station CSV file and an edge CSV file
pub fn load_network_from_paths(
    stations_path: impl AsRef<Path>,
    edges_path: impl AsRef<Path>,
) -> Result<TransitGraph> {
    let mut builder = TransitGraphBuilder::new();

    let stations = BufReader::new(File::open(stations_path.as_ref())?);
    load_stations(stations, &mut builder)?;

    let edges = BufReader::new(File::open(edges_path.as_ref())?);
    load_edges(edges, &mut builder)?;

    Ok(builder.build())
}
