//! The station entity stored in the graph arena.

use std::sync::Arc;

use crate::identifiers::*;
use crate::models::traits::TransitStation;
use crate::models::types::*;

#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationIdentifier,
    pub name: Arc<str>,
    pub systems: Vec<SystemIdentifier>,
    pub lines: Vec<LineIdentifier>,

    // Only the graph builder attaches edges, after checking both endpoints.
    pub(crate) connections: Vec<Connection>,
}

impl Station {
    /// Create a station with no outgoing edges.
    ///
    /// Repeated systems or lines are collapsed, keeping the first occurrence,
    /// so that transfer detection counts distinct lines.
    pub fn new(
        id: StationIdentifier,
        name: impl Into<Arc<str>>,
        systems: impl IntoIterator<Item = SystemIdentifier>,
        lines: impl IntoIterator<Item = LineIdentifier>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            systems: dedup_in_order(systems),
            lines: dedup_in_order(lines),
            connections: Vec::new(),
        }
    }

    /// Insert or overwrite the edge to `to`, returning the previous weight.
    pub(crate) fn upsert_connection(
        &mut self,
        to: StationIdentifier,
        minutes: Minutes,
    ) -> Option<Minutes> {
        match self.connections.iter_mut().find(|c| c.to == to) {
            Some(existing) => Some(std::mem::replace(&mut existing.minutes, minutes)),
            None => {
                self.connections.push(Connection::new(to, minutes));
                None
            }
        }
    }
}

impl TransitStation for Station {
    fn id(&self) -> &StationIdentifier {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn systems(&self) -> &[SystemIdentifier] {
        &self.systems
    }

    fn lines(&self) -> &[LineIdentifier] {
        &self.lines
    }

    fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

fn dedup_in_order<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
