use std::fmt;

use chrono::NaiveDateTime;

use super::{
    movement::Movement, position::Position, sim_error::SimError,
    wake_vortex_category::WakeVortexCategory,
};

/// Stable identity of one aircraft movement, derived from its call sign.
///
/// The id stays the same for as long as the flight exists in the simulation;
/// a call sign that leaves and is added again counts as a different
/// aircraft. Consumers must key off this value, never off the flight record
/// itself, since records are cloned into per-tick snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId(String);

impl FlightId {
    pub fn new(call_sign: impl Into<String>) -> Self {
        FlightId(call_sign.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FlightId {
    fn from(call_sign: &str) -> Self {
        FlightId::new(call_sign)
    }
}

/// Represents one aircraft movement on the aerodrome: its classification,
/// runway, schedule window and scripted ground route.
///
/// The flight is visible on the radar while the current time is inside
/// `[departure_time, arrival_time)`, and its position is interpolated along
/// `route` over that window.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: FlightId,
    pub movement: Movement,
    pub category: WakeVortexCategory,
    pub qfu: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub route: Vec<Position>,
}

impl Flight {
    /// Creates a new flight.
    ///
    /// # Errors
    /// `SimError::InvalidInput` if the call sign is empty,
    /// `SimError::InvalidFlight` if the schedule window is not positive or
    /// the route has no points.
    pub fn new(
        call_sign: &str,
        movement: Movement,
        category: WakeVortexCategory,
        qfu: &str,
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
        route: Vec<Position>,
    ) -> Result<Self, SimError> {
        if call_sign.trim().is_empty() {
            return Err(SimError::InvalidInput);
        }
        if arrival_time <= departure_time {
            return Err(SimError::InvalidFlight(format!(
                "{}: arrival time must be after departure time",
                call_sign
            )));
        }
        if route.is_empty() {
            return Err(SimError::InvalidFlight(format!(
                "{}: route needs at least one point",
                call_sign
            )));
        }

        Ok(Flight {
            id: FlightId::new(call_sign.trim()),
            movement,
            category,
            qfu: qfu.trim().to_string(),
            departure_time,
            arrival_time,
            route,
        })
    }

    /// Creates a new flight from the information given from the console
    /// interface.
    pub fn new_from_console(
        call_sign: &str,
        movement_str: &str,
        category_str: &str,
        qfu: &str,
        departure_time_str: &str,
        arrival_time_str: &str,
        route: Vec<Position>,
    ) -> Result<Self, SimError> {
        let movement = Movement::from_str(movement_str)?;
        let category = WakeVortexCategory::from_str(category_str)?;
        let departure_time = parse_datetime(departure_time_str)?;
        let arrival_time = parse_datetime(arrival_time_str)?;

        Flight::new(
            call_sign,
            movement,
            category,
            qfu,
            departure_time,
            arrival_time,
            route,
        )
    }

    /// Whether the flight is present on the aerodrome at the given time.
    /// The window is half open: a flight is gone at its arrival time.
    pub fn is_active(&self, at: NaiveDateTime) -> bool {
        self.departure_time <= at && at < self.arrival_time
    }

    /// Position of the flight at the given time, interpolated linearly
    /// along the route over the schedule window and clamped to the route
    /// endpoints outside of it.
    pub fn position_at(&self, at: NaiveDateTime) -> Position {
        let first = self.route[0];
        if at <= self.departure_time || self.route.len() == 1 {
            return first;
        }

        let last = self.route[self.route.len() - 1];
        if at >= self.arrival_time {
            return last;
        }

        let total = self
            .arrival_time
            .signed_duration_since(self.departure_time)
            .num_seconds() as f64;
        let elapsed = at.signed_duration_since(self.departure_time).num_seconds() as f64;
        let progress_ratio = elapsed / total;

        // Scale progress over the route segments and interpolate inside one
        let segments = (self.route.len() - 1) as f64;
        let scaled = progress_ratio * segments;
        let segment = (scaled.floor() as usize).min(self.route.len() - 2);
        let ratio = scaled - segment as f64;

        self.route[segment].towards(&self.route[segment + 1], ratio)
    }

    /// Short description shown next to the marker: movement, call sign and
    /// runway in use.
    pub fn label(&self) -> String {
        format!("{} {} {}", self.movement.as_str(), self.id, self.qfu)
    }
}

/// Parses a datetime in the console format.
pub fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, SimError> {
    let format = "%d-%m-%Y %H:%M:%S"; // The expected format for the date input
    NaiveDateTime::parse_from_str(datetime_str, format)
        .map_err(|_| SimError::InvalidDateFormat(datetime_str.to_string()))
}
