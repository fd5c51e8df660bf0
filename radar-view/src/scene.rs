use std::fmt;

use traffic_sim::types::flight::Flight;
use traffic_sim::types::position::Position;

use crate::style::VisualAttributes;

/// Opaque handle of one visual entity in the hosting scene.
///
/// Handles are minted by the scene when an entity is created and mean
/// nothing to the radar beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(u64);

impl EntityHandle {
    pub fn new(raw: u64) -> Self {
        EntityHandle(raw)
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error returned by a scene that rejected a create, destroy or update
/// call, carrying the reason for the host's diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneError(pub String);

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trait that defines the required methods for a rendering surface the
/// radar paints into. The reconciliation loop only ever talks to the scene
/// through these three calls, in the order create, destroy, update, from a
/// single thread; a scene does not need to defend against anything else.
pub trait Scene {
    /// Creates a visual entity for the flight and returns its handle. The
    /// flight's label is fixed at creation; position and styling arrive
    /// with the first update.
    fn create(&mut self, flight: &Flight) -> Result<EntityHandle, SceneError>;

    /// Removes the entity behind the handle.
    fn destroy(&mut self, handle: EntityHandle) -> Result<(), SceneError>;

    /// Moves and restyles the entity behind the handle.
    fn update(
        &mut self,
        handle: EntityHandle,
        position: Position,
        attributes: VisualAttributes,
    ) -> Result<(), SceneError>;
}
