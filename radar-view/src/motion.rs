use std::collections::HashSet;

use chrono::NaiveDateTime;

use traffic_sim::types::flight::{Flight, FlightId};

use crate::errors::RadarError;
use crate::registry::EntityRegistry;
use crate::scene::Scene;
use crate::style::VisualStateResolver;
use crate::traffic::TrafficProvider;

/// Keeps the set of radar markers aligned with the flights the simulation
/// reports as present.
///
/// Once per tick the manager diffs the active flights against the flights
/// it already shows: new flights get a marker, flights that left lose
/// theirs, and every marker still on the radar is repositioned and restyled
/// whether or not anything about it changed. There is no dirty tracking and
/// no memory of previous snapshots; recomputing the whole picture each tick
/// is what keeps the view from drifting away from the traffic.
pub struct MotionManager {
    registry: EntityRegistry,
    resolver: VisualStateResolver,
}

impl MotionManager {
    /// Creates a manager with no tracked flights.
    pub fn new(resolver: VisualStateResolver) -> Self {
        MotionManager {
            registry: EntityRegistry::new(),
            resolver,
        }
    }

    /// Read access to the bookkeeping, for displays and tests.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Pulls the current snapshots from the traffic source and reconciles
    /// the scene against them. This is the per-tick entry point; if the
    /// source fails, nothing is touched and the previous picture stands.
    pub fn refresh<S: Scene, T: TrafficProvider>(
        &mut self,
        scene: &mut S,
        traffic: &T,
    ) -> Result<(), RadarError> {
        let now = traffic.current_time()?;
        let flights = traffic.current_flights()?;
        let conflicts = traffic.current_conflicts()?;

        self.reconcile(scene, &flights, &conflicts, now)
    }

    /// Aligns the scene with one snapshot of the traffic.
    ///
    /// `flights` must hold one record per present flight; `conflicts` marks
    /// the subset drawn in the conflict color, and ids in it that match no
    /// present flight are ignored. A scene failure is returned as is:
    /// whatever was applied before it stays applied, the registry stays
    /// consistent with exactly that, and the next tick re-diffs from
    /// scratch. An empty snapshot tears the whole picture down.
    pub fn reconcile<S: Scene>(
        &mut self,
        scene: &mut S,
        flights: &[Flight],
        conflicts: &HashSet<FlightId>,
        now: NaiveDateTime,
    ) -> Result<(), RadarError> {
        let active_ids: HashSet<FlightId> = flights.iter().map(|f| f.id.clone()).collect();
        let tracked = self.registry.tracked_flights();

        // Flights that appeared since the last tick
        for flight in flights {
            if !tracked.contains(&flight.id) {
                let handle = scene.create(flight)?;
                self.registry.insert(flight.id.clone(), handle)?;
            }
        }

        // Flights that left since the last tick: unregister first, so the
        // registry never points at an entity whose teardown already began
        for id in tracked.difference(&active_ids) {
            let handle = self.registry.remove(id)?;
            scene.destroy(handle)?;
        }

        // Reposition and restyle everything on the radar
        for flight in flights {
            let handle = self.registry.handle_for(&flight.id)?;
            let attributes = self
                .resolver
                .resolve(flight, conflicts.contains(&flight.id));
            scene.update(handle, flight.position_at(now), attributes)?;
        }

        Ok(())
    }
}
