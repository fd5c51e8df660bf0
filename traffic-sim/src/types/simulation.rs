use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::NaiveDateTime;

use super::flight::{Flight, FlightId};
use super::sim_error::SimError;
use super::timer::Timer;

/// Manages the overall state of the ground traffic simulation.
///
/// The `Simulation` owns the scheduled flights, the set of call signs
/// currently flagged as in conflict, and the timer that drives simulated
/// time. Flight records never change after they are added: where a flight
/// is at any instant follows from its route and schedule window, so readers
/// only ever take short-lived snapshots.
///
/// Conflicts are injected by the operator (or a script), never computed
/// here; this crate has no separation logic.
pub struct Simulation {
    pub flights: Arc<RwLock<HashMap<FlightId, Flight>>>,
    pub conflicts: Arc<RwLock<HashSet<FlightId>>>,
    pub timer: Arc<Timer>,
}

impl Simulation {
    /// Create a new simulation
    pub fn new(timer: Arc<Timer>) -> Self {
        Simulation {
            flights: Arc::new(RwLock::new(HashMap::new())),
            conflicts: Arc::new(RwLock::new(HashSet::new())),
            timer,
        }
    }

    /// Start the simulation clock. The callback runs once per tick on the
    /// timer thread with the new simulated time and the tick number.
    pub fn start(
        &self,
        tick_callback: impl Fn(NaiveDateTime, usize) + Send + 'static,
    ) -> Result<(), SimError> {
        Arc::clone(&self.timer).start(tick_callback)
    }

    /// Adds a flight to the simulation.
    ///
    /// # Errors
    /// `SimError::DuplicateFlight` if a flight with the same call sign is
    /// already scheduled.
    pub fn add_flight(&self, flight: Flight) -> Result<(), SimError> {
        let mut flights_lock = self
            .flights
            .write()
            .map_err(|_| SimError::LockError("Failed to lock flights".to_string()))?;

        if flights_lock.contains_key(&flight.id) {
            return Err(SimError::DuplicateFlight(flight.id.to_string()));
        }
        flights_lock.insert(flight.id.clone(), flight);

        Ok(())
    }

    /// Replaces the injected conflict set.
    pub fn set_conflicts(&self, ids: HashSet<FlightId>) -> Result<(), SimError> {
        let mut conflicts_lock = self
            .conflicts
            .write()
            .map_err(|_| SimError::LockError("Failed to lock conflicts".to_string()))?;
        *conflicts_lock = ids;
        Ok(())
    }

    /// Clears the injected conflict set.
    pub fn clear_conflicts(&self) -> Result<(), SimError> {
        self.set_conflicts(HashSet::new())
    }

    /// Current simulated time.
    pub fn current_time(&self) -> Result<NaiveDateTime, SimError> {
        let time_lock = self
            .timer
            .current_time
            .lock()
            .map_err(|_| SimError::LockError("Failed to lock current_time".to_string()))?;
        Ok(*time_lock)
    }

    /// Snapshot of the flights present on the aerodrome at the current
    /// time: those whose schedule window contains it.
    pub fn active_flights(&self) -> Result<Vec<Flight>, SimError> {
        let now = self.current_time()?;
        let flights_lock = self
            .flights
            .read()
            .map_err(|_| SimError::LockError("Failed to lock flights".to_string()))?;

        Ok(flights_lock
            .values()
            .filter(|flight| flight.is_active(now))
            .cloned()
            .collect())
    }

    /// Snapshot of the injected conflict set. Ids of flights that are no
    /// longer active may remain here until the operator clears them; the
    /// consumer is expected to ignore those.
    pub fn conflict_ids(&self) -> Result<HashSet<FlightId>, SimError> {
        let conflicts_lock = self
            .conflicts
            .read()
            .map_err(|_| SimError::LockError("Failed to lock conflicts".to_string()))?;
        Ok(conflicts_lock.clone())
    }

    /// Number of scheduled flights, active or not.
    pub fn flight_count(&self) -> Result<usize, SimError> {
        let flights_lock = self
            .flights
            .read()
            .map_err(|_| SimError::LockError("Failed to lock flights".to_string()))?;
        Ok(flights_lock.len())
    }

    /// Changes how many simulated seconds pass per tick.
    pub fn set_time_rate(&self, seconds: i64) -> Result<(), SimError> {
        self.timer.set_tick_advance(seconds)
    }

    /// Jumps the simulation clock to another time.
    pub fn set_time(&self, new_time: NaiveDateTime) -> Result<(), SimError> {
        self.timer.set_time(new_time)
    }

    pub fn pause_simulation(&self) {
        self.timer.pause();
    }

    pub fn resume_simulation(&self) {
        self.timer.resume();
    }

    /// Stop the timer.
    pub fn stop(&self) {
        self.timer.stop();
    }
}
