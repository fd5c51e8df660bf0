use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;

use traffic_sim::types::flight::{Flight, FlightId};
use traffic_sim::types::simulation::Simulation;

/// Error of a traffic source that could not produce a snapshot. The radar
/// reports it and keeps showing the previous picture; there is nothing to
/// clean up because nothing was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficError;

impl fmt::Display for TrafficError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the traffic source could not produce a snapshot")
    }
}

/// A trait that defines the required methods for a source of traffic
/// snapshots. Once per tick the radar asks for the simulated time, the
/// flights currently present and the conflict set; all three are read-only
/// snapshots valid for that tick only.
pub trait TrafficProvider {
    fn current_time(&self) -> Result<NaiveDateTime, TrafficError>;

    fn current_flights(&self) -> Result<Vec<Flight>, TrafficError>;

    fn current_conflicts(&self) -> Result<HashSet<FlightId>, TrafficError>;
}

impl TrafficProvider for Simulation {
    fn current_time(&self) -> Result<NaiveDateTime, TrafficError> {
        Simulation::current_time(self).map_err(|_| TrafficError)
    }

    fn current_flights(&self) -> Result<Vec<Flight>, TrafficError> {
        self.active_flights().map_err(|_| TrafficError)
    }

    fn current_conflicts(&self) -> Result<HashSet<FlightId>, TrafficError> {
        self.conflict_ids().map_err(|_| TrafficError)
    }
}
