//! Core traits for transit entities.
//!
//! These traits define the public interface for a station. The analyzer and
//! the reporting code only go through them, so alternative station
//! representations can be plugged in without touching either.

use crate::identifiers::*;
use crate::models::types::*;

/// A transit station (graph node) together with its outgoing edges
pub trait TransitStation {
    fn id(&self) -> &StationIdentifier;

    /// Display name. Not unique across the network.
    fn name(&self) -> &str;

    /// Transit systems this station belongs to (e.g. "Metro", "Light Rail")
    fn systems(&self) -> &[SystemIdentifier];

    /// Lines serving this station, without duplicates
    fn lines(&self) -> &[LineIdentifier];

    /// Outgoing directed edges in insertion order
    fn connections(&self) -> &[Connection];

    fn out_degree(&self) -> usize {
        self.connections().len()
    }

    /// A station served by more than one line is a transfer point
    fn is_transfer(&self) -> bool {
        self.lines().len() > 1
    }

    fn belongs_to_system(&self, system: &str) -> bool {
        self.systems().iter().any(|s| s.as_str() == system)
    }

    /// Weight of the direct edge to `to`, if there is one
    fn minutes_to(&self, to: &StationIdentifier) -> Option<Minutes> {
        self.connections()
            .iter()
            .find(|c| &c.to == to)
            .map(|c| c.minutes)
    }
}
