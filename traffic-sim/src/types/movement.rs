use super::sim_error::SimError;

/// Represents the movement type of a ground track.

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Movement {
    Departure,
    Arrival,
}

impl Movement {
    /// Converts the `Movement` variant to the short form used on strips and
    /// radar labels.
    pub fn as_str(&self) -> &str {
        match self {
            Movement::Departure => "DEP",
            Movement::Arrival => "ARR",
        }
    }

    /// Creates a `Movement` variant from a string slice.
    pub fn from_str(movement: &str) -> Result<Movement, SimError> {
        match movement.to_lowercase().as_str() {
            "dep" | "departure" => Ok(Movement::Departure),
            "arr" | "arrival" => Ok(Movement::Arrival),
            _ => Err(SimError::InvalidMovement(movement.to_string())),
        }
    }
}
