use std::collections::HashMap;

use egui::{Pos2, Rect, Sense, Vec2};

use traffic_sim::types::flight::{Flight, FlightId};
use traffic_sim::types::position::Position;

use crate::scene::{EntityHandle, Scene, SceneError};
use crate::style::VisualAttributes;

/// One dot on the radar, owned by the scene that minted its handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub flight: FlightId,
    pub label: String,
    /// Set by the first update after creation.
    pub position: Option<Position>,
    pub attributes: Option<VisualAttributes>,
}

/// In-memory scene that keeps one [`Marker`] per live handle and can paint
/// them onto an egui surface.
///
/// Handles come from a monotonic counter and are never reused, so a stale
/// handle held after a destroy stays invalid instead of silently pointing
/// at a newer marker.
#[derive(Default)]
pub struct MarkerScene {
    markers: HashMap<EntityHandle, Marker>,
    next_handle: u64,
}

impl MarkerScene {
    pub fn new() -> Self {
        MarkerScene::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Marker> {
        self.markers.get(&handle)
    }

    /// Iterates over the live markers in no particular order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Paints every placed marker as a filled circle with its label on hover.
    ///
    /// `project` maps ground coordinates in metres to screen points and
    /// `scale` is the current metres-to-pixels factor, so the drawn radius
    /// keeps its ground size when the view zooms.
    pub fn draw(&self, ui: &mut egui::Ui, project: impl Fn(Position) -> Pos2, scale: f32) {
        for marker in self.markers.values() {
            let (position, attributes) = match (marker.position, marker.attributes) {
                (Some(position), Some(attributes)) => (position, attributes),
                // Created this tick but not placed yet
                _ => continue,
            };

            let center = project(position);
            let radius = (attributes.radius * f64::from(scale)) as f32;
            ui.painter().circle_filled(center, radius, attributes.fill);

            let hover_area = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
            let response = ui.allocate_rect(hover_area, Sense::hover());
            response.on_hover_text(marker.label.clone());
        }
    }
}

impl Scene for MarkerScene {
    fn create(&mut self, flight: &Flight) -> Result<EntityHandle, SceneError> {
        self.next_handle += 1;
        let handle = EntityHandle::new(self.next_handle);
        self.markers.insert(
            handle,
            Marker {
                flight: flight.id.clone(),
                label: flight.label(),
                position: None,
                attributes: None,
            },
        );
        Ok(handle)
    }

    fn destroy(&mut self, handle: EntityHandle) -> Result<(), SceneError> {
        match self.markers.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(SceneError(format!("no marker behind handle {}", handle))),
        }
    }

    fn update(
        &mut self,
        handle: EntityHandle,
        position: Position,
        attributes: VisualAttributes,
    ) -> Result<(), SceneError> {
        match self.markers.get_mut(&handle) {
            Some(marker) => {
                marker.position = Some(position);
                marker.attributes = Some(attributes);
                Ok(())
            }
            None => Err(SceneError(format!("no marker behind handle {}", handle))),
        }
    }
}
