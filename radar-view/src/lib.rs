//! Ground radar picture for the traffic simulation: bookkeeping of which
//! flight is shown by which marker, per-tick reconciliation of the markers
//! against the active traffic, and the styling rules applied to them.

pub mod errors;
pub mod markers;
pub mod motion;
pub mod registry;
pub mod scene;
pub mod style;
pub mod traffic;
