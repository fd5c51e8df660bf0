use std::collections::{HashMap, HashSet};
use std::fmt;

use traffic_sim::types::flight::FlightId;

use crate::errors::RadarError;
use crate::scene::EntityHandle;

/// Bookkeeping of which flight is shown by which visual entity.
///
/// The registry is the single source of truth for what is currently on the
/// radar. It knows nothing about rendering: callers move handles in and out
/// and are responsible for creating and destroying the entities behind
/// them.
#[derive(Default)]
pub struct EntityRegistry {
    entities: HashMap<FlightId, EntityHandle>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        EntityRegistry {
            entities: HashMap::new(),
        }
    }

    /// Returns the identities currently tracked.
    ///
    /// # Returns
    /// An owned set of flight ids, used as the known side of the per-tick
    /// diff.
    pub fn tracked_flights(&self) -> HashSet<FlightId> {
        self.entities.keys().cloned().collect()
    }

    /// Whether the flight currently has a marker.
    pub fn contains(&self, id: &FlightId) -> bool {
        self.entities.contains_key(id)
    }

    /// Returns the handle shown for the given flight.
    ///
    /// # Errors
    /// `RadarError::FlightNotTracked` if the flight has no marker.
    pub fn handle_for(&self, id: &FlightId) -> Result<EntityHandle, RadarError> {
        self.entities
            .get(id)
            .copied()
            .ok_or_else(|| RadarError::FlightNotTracked(id.clone()))
    }

    /// Registers the handle of a newly shown flight.
    ///
    /// # Parameters
    /// - `id`: Identity of the flight that just appeared.
    /// - `handle`: Handle the scene minted for its entity.
    ///
    /// # Errors
    /// `RadarError::FlightAlreadyTracked` if the flight already has a
    /// marker. A correct reconciliation never inserts twice, so this
    /// signals a bug in the caller.
    pub fn insert(&mut self, id: FlightId, handle: EntityHandle) -> Result<(), RadarError> {
        if self.entities.contains_key(&id) {
            return Err(RadarError::FlightAlreadyTracked(id));
        }
        self.entities.insert(id, handle);
        Ok(())
    }

    /// Unregisters a flight and returns its handle so the caller can
    /// release the entity behind it.
    ///
    /// # Errors
    /// `RadarError::FlightNotTracked` if the flight has no marker.
    pub fn remove(&mut self, id: &FlightId) -> Result<EntityHandle, RadarError> {
        self.entities
            .remove(id)
            .ok_or_else(|| RadarError::FlightNotTracked(id.clone()))
    }

    /// Iterates over the tracked `(flight, handle)` pairs in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&FlightId, &EntityHandle)> {
        self.entities.iter()
    }

    /// Number of tracked flights.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<String> = self
            .entities
            .iter()
            .map(|(id, handle)| format!("{} -> {}", id, handle))
            .collect();
        entries.sort();
        write!(f, "EntityRegistry: {}", entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(call_sign: &str) -> FlightId {
        FlightId::from(call_sign)
    }

    #[test]
    fn test_insert_and_handle_for() {
        let mut registry = EntityRegistry::new();

        registry.insert(id("AFR1234"), EntityHandle::new(1)).unwrap();
        registry.insert(id("BAW88"), EntityHandle::new(2)).unwrap();

        assert_eq!(
            registry.handle_for(&id("AFR1234")).unwrap(),
            EntityHandle::new(1),
            "Handle should match the one registered"
        );
        assert_eq!(registry.len(), 2, "Both flights should be tracked");
    }

    #[test]
    fn test_insert_duplicate_flight_fails() {
        let mut registry = EntityRegistry::new();

        registry.insert(id("AFR1234"), EntityHandle::new(1)).unwrap();
        let result = registry.insert(id("AFR1234"), EntityHandle::new(2));

        assert_eq!(
            result,
            Err(RadarError::FlightAlreadyTracked(id("AFR1234"))),
            "Second insert of the same flight should be rejected"
        );
        assert_eq!(
            registry.handle_for(&id("AFR1234")).unwrap(),
            EntityHandle::new(1),
            "The original handle should be kept"
        );
    }

    #[test]
    fn test_remove_returns_the_handle() {
        let mut registry = EntityRegistry::new();
        registry.insert(id("AFR1234"), EntityHandle::new(7)).unwrap();

        let handle = registry.remove(&id("AFR1234")).unwrap();

        assert_eq!(handle, EntityHandle::new(7));
        assert!(registry.is_empty(), "Removed flight should leave the registry");
    }

    #[test]
    fn test_lookups_on_unknown_flights_fail() {
        let mut registry = EntityRegistry::new();

        assert_eq!(
            registry.handle_for(&id("GHOST")),
            Err(RadarError::FlightNotTracked(id("GHOST")))
        );
        assert_eq!(
            registry.remove(&id("GHOST")),
            Err(RadarError::FlightNotTracked(id("GHOST")))
        );
    }

    #[test]
    fn test_tracked_flights_matches_the_inserts() {
        let mut registry = EntityRegistry::new();
        registry.insert(id("AFR1234"), EntityHandle::new(1)).unwrap();
        registry.insert(id("BAW88"), EntityHandle::new(2)).unwrap();
        registry.remove(&id("AFR1234")).unwrap();

        let mut expected = HashSet::new();
        expected.insert(id("BAW88"));

        assert_eq!(registry.tracked_flights(), expected);
        assert!(registry.contains(&id("BAW88")));
        assert!(!registry.contains(&id("AFR1234")));
    }

    #[test]
    fn test_debug_trait() {
        let mut registry = EntityRegistry::new();
        registry.insert(id("AFR1234"), EntityHandle::new(1)).unwrap();
        registry.insert(id("BAW88"), EntityHandle::new(2)).unwrap();

        assert_eq!(
            format!("{:?}", registry),
            "EntityRegistry: AFR1234 -> #1, BAW88 -> #2",
            "Debug output should list the pairs in call-sign order"
        );
    }
}
