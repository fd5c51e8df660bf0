//! Scripted ground-traffic source for the radar view: flights with schedule
//! windows and taxi routes, a simulation holding the shared state, and a
//! timer that advances simulated time at a fixed real cadence.

pub mod types;
