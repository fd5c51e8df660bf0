use egui::Color32;

use traffic_sim::types::flight::Flight;
use traffic_sim::types::movement::Movement;
use traffic_sim::types::wake_vortex_category::WakeVortexCategory;
use traffic_sim::types::SEP;

/// Color state of a marker on the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    Departure,
    Arrival,
    Conflict,
}

impl ColorCategory {
    /// Converts the `ColorCategory` variant to its string representation.
    pub fn as_str(&self) -> &str {
        match self {
            ColorCategory::Departure => "departure",
            ColorCategory::Arrival => "arrival",
            ColorCategory::Conflict => "conflict",
        }
    }
}

/// Fixed colors of the radar display.
///
/// The palette is plain immutable data; hosts build one (or take the
/// default) and hand it to the resolver, so there is no shared styling
/// state anywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarPalette {
    pub departure: Color32,
    pub arrival: Color32,
    pub conflict: Color32,
}

impl Default for RadarPalette {
    fn default() -> Self {
        RadarPalette {
            departure: Color32::BLUE,
            arrival: Color32::from_rgb(255, 0, 255),
            conflict: Color32::RED,
        }
    }
}

/// What a marker should look like on the current tick. Derived fresh every
/// tick, never stored by the radar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualAttributes {
    pub category: ColorCategory,
    pub fill: Color32,
    pub radius: f64,
}

/// Derives the rendering attributes of a flight from its classification and
/// its conflict status for the current tick.
pub struct VisualStateResolver {
    palette: RadarPalette,
}

impl VisualStateResolver {
    /// Creates a resolver using the given palette.
    pub fn new(palette: RadarPalette) -> Self {
        VisualStateResolver { palette }
    }

    /// Resolves the marker attributes for one flight.
    ///
    /// A flight in conflict is drawn in the conflict color no matter its
    /// movement type; otherwise departures and arrivals get their palette
    /// colors. Heavy traffic is drawn at one and a half separations of
    /// radius, everything else at one separation.
    pub fn resolve(&self, flight: &Flight, in_conflict: bool) -> VisualAttributes {
        let (category, fill) = if in_conflict {
            (ColorCategory::Conflict, self.palette.conflict)
        } else {
            match flight.movement {
                Movement::Departure => (ColorCategory::Departure, self.palette.departure),
                Movement::Arrival => (ColorCategory::Arrival, self.palette.arrival),
            }
        };

        let radius = if flight.category == WakeVortexCategory::Heavy {
            1.5 * SEP
        } else {
            SEP
        };

        VisualAttributes {
            category,
            fill,
            radius,
        }
    }
}

impl Default for VisualStateResolver {
    fn default() -> Self {
        Self::new(RadarPalette::default())
    }
}
