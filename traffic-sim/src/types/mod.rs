/// Real milliseconds between two simulation ticks.
pub const TICK_FREQUENCY_MILLIS: u64 = 1000;

/// Minimum ground separation between two mobiles, in metres. Marker radii
/// are derived from this value.
pub const SEP: f64 = 90.0;

pub mod position;

pub mod movement;

pub mod wake_vortex_category;

pub mod sim_error;

pub mod timer;

pub mod simulation;

pub mod flight;
