use std::fmt;

use traffic_sim::types::flight::FlightId;

use crate::scene::SceneError;
use crate::traffic::TrafficError;

/// Errors raised while keeping the radar picture aligned with the traffic.
///
/// The two registry variants signal reconciliation bugs: under a correct
/// diff a flight is never inserted twice nor looked up after removal, so
/// hosts should treat them as fatal. `Scene` and `Traffic` wrap failures of
/// the collaborators; the next tick re-diffs from scratch, which is the
/// only retry mechanism there is.
#[derive(Debug, PartialEq)]
pub enum RadarError {
    FlightNotTracked(FlightId),
    FlightAlreadyTracked(FlightId),
    Scene(SceneError),
    Traffic(TrafficError),
}

impl fmt::Display for RadarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadarError::FlightNotTracked(id) => {
                write!(f, "[FlightNotTracked]: flight {} has no marker on the radar", id)
            }
            RadarError::FlightAlreadyTracked(id) => {
                write!(
                    f,
                    "[FlightAlreadyTracked]: flight {} already has a marker on the radar",
                    id
                )
            }
            RadarError::Scene(e) => write!(f, "[Scene]: the scene rejected a call: {}", e),
            RadarError::Traffic(e) => write!(f, "[Traffic]: {}", e),
        }
    }
}

impl From<SceneError> for RadarError {
    fn from(error: SceneError) -> Self {
        RadarError::Scene(error)
    }
}

impl From<TrafficError> for RadarError {
    fn from(error: TrafficError) -> Self {
        RadarError::Traffic(error)
    }
}
