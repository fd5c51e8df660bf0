use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use radar_view::markers::{Marker, MarkerScene};
use radar_view::motion::MotionManager;
use radar_view::style::{ColorCategory, RadarPalette, VisualStateResolver};
use traffic_sim::types::flight::{Flight, FlightId};
use traffic_sim::types::movement::Movement;
use traffic_sim::types::position::Position;
use traffic_sim::types::simulation::Simulation;
use traffic_sim::types::timer::Timer;
use traffic_sim::types::wake_vortex_category::WakeVortexCategory;
use traffic_sim::types::SEP;

// The scenarios below drive the clock with set_time instead of letting the
// timer thread run, so every tick is explicit and the outcome deterministic.

fn at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn simulation_at(hour: u32, min: u32) -> Arc<Simulation> {
    let timer = Timer::new(at(hour, min), 5);
    Arc::new(Simulation::new(timer))
}

fn radar() -> (MotionManager, MarkerScene) {
    let motion = MotionManager::new(VisualStateResolver::new(RadarPalette::default()));
    (motion, MarkerScene::new())
}

fn schedule(
    sim: &Simulation,
    call_sign: &str,
    movement: Movement,
    category: WakeVortexCategory,
    from: NaiveDateTime,
    to: NaiveDateTime,
    route: Vec<Position>,
) {
    let flight = Flight::new(call_sign, movement, category, "26R", from, to, route).unwrap();
    sim.add_flight(flight).unwrap();
}

fn taxi_route() -> Vec<Position> {
    vec![Position::new(0.0, 0.0), Position::new(600.0, 0.0)]
}

fn tracked(motion: &MotionManager) -> HashSet<FlightId> {
    motion.registry().tracked_flights()
}

fn ids(call_signs: &[&str]) -> HashSet<FlightId> {
    call_signs.iter().map(|s| FlightId::from(*s)).collect()
}

fn marker_for(motion: &MotionManager, scene: &MarkerScene, call_sign: &str) -> Marker {
    let handle = motion
        .registry()
        .handle_for(&FlightId::from(call_sign))
        .unwrap();
    scene.get(handle).unwrap().clone()
}

#[test]
fn markers_follow_the_flight_schedule() {
    let sim = simulation_at(9, 0);
    let (mut motion, mut scene) = radar();

    schedule(
        &sim,
        "AFR1234",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(11, 0),
        taxi_route(),
    );
    schedule(
        &sim,
        "BAW88",
        Movement::Arrival,
        WakeVortexCategory::Light,
        at(10, 30),
        at(11, 30),
        taxi_route(),
    );
    schedule(
        &sim,
        "KLM601",
        Movement::Departure,
        WakeVortexCategory::Heavy,
        at(12, 0),
        at(13, 0),
        taxi_route(),
    );

    sim.set_time(at(10, 15)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    assert_eq!(tracked(&motion), ids(&["AFR1234"]), "Only the early flight");

    sim.set_time(at(10, 45)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    assert_eq!(tracked(&motion), ids(&["AFR1234", "BAW88"]));
    assert_eq!(scene.len(), 2, "Scene and registry must agree");

    sim.set_time(at(11, 15)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    assert_eq!(
        tracked(&motion),
        ids(&["BAW88"]),
        "The finished flight loses its marker"
    );

    sim.set_time(at(12, 0)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    assert_eq!(
        tracked(&motion),
        ids(&["KLM601"]),
        "A flight joins exactly at its start time"
    );

    sim.set_time(at(13, 0)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    assert!(
        tracked(&motion).is_empty(),
        "A flight is gone exactly at its end time"
    );
    assert!(scene.is_empty());
}

#[test]
fn a_marker_moves_along_its_route() {
    let sim = simulation_at(9, 0);
    let (mut motion, mut scene) = radar();

    schedule(
        &sim,
        "AFR1234",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(11, 0),
        vec![Position::new(0.0, 0.0), Position::new(1000.0, 0.0)],
    );

    sim.set_time(at(10, 30)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    let marker = marker_for(&motion, &scene, "AFR1234");
    assert_eq!(marker.position, Some(Position::new(500.0, 0.0)));

    sim.set_time(at(10, 45)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    let marker = marker_for(&motion, &scene, "AFR1234");
    assert_eq!(marker.position, Some(Position::new(750.0, 0.0)));
}

#[test]
fn conflict_alerts_recolor_until_cleared() {
    let sim = simulation_at(10, 10);
    let (mut motion, mut scene) = radar();
    let palette = RadarPalette::default();

    schedule(
        &sim,
        "AFR1234",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(11, 0),
        taxi_route(),
    );
    schedule(
        &sim,
        "BAW88",
        Movement::Arrival,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(11, 0),
        taxi_route(),
    );

    sim.set_conflicts(ids(&["AFR1234"])).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();

    let alerted = marker_for(&motion, &scene, "AFR1234").attributes.unwrap();
    assert_eq!(alerted.category, ColorCategory::Conflict);
    assert_eq!(alerted.fill, palette.conflict);

    let calm = marker_for(&motion, &scene, "BAW88").attributes.unwrap();
    assert_eq!(calm.category, ColorCategory::Arrival);
    assert_eq!(calm.fill, palette.arrival, "Other flights keep their color");

    sim.clear_conflicts().unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();

    let cleared = marker_for(&motion, &scene, "AFR1234").attributes.unwrap();
    assert_eq!(
        cleared.category,
        ColorCategory::Departure,
        "The movement color returns once the alert is cleared"
    );
    assert_eq!(cleared.fill, palette.departure);
}

#[test]
fn heavy_traffic_is_drawn_wider() {
    let sim = simulation_at(10, 10);
    let (mut motion, mut scene) = radar();

    schedule(
        &sim,
        "AFR1234",
        Movement::Departure,
        WakeVortexCategory::Heavy,
        at(10, 0),
        at(11, 0),
        taxi_route(),
    );
    schedule(
        &sim,
        "BAW88",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(11, 0),
        taxi_route(),
    );

    motion.refresh(&mut scene, sim.as_ref()).unwrap();

    let heavy = marker_for(&motion, &scene, "AFR1234").attributes.unwrap();
    let medium = marker_for(&motion, &scene, "BAW88").attributes.unwrap();
    assert_eq!(heavy.radius, 1.5 * SEP);
    assert_eq!(medium.radius, SEP);
}

#[test]
fn markers_carry_the_strip_label() {
    let sim = simulation_at(10, 10);
    let (mut motion, mut scene) = radar();

    schedule(
        &sim,
        "AFR1234",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(11, 0),
        taxi_route(),
    );

    motion.refresh(&mut scene, sim.as_ref()).unwrap();

    let marker = marker_for(&motion, &scene, "AFR1234");
    assert_eq!(marker.label, "DEP AFR1234 26R");
}

#[test]
fn handles_are_not_recycled_across_churn() {
    let sim = simulation_at(9, 0);
    let (mut motion, mut scene) = radar();

    schedule(
        &sim,
        "AFR1234",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(10, 30),
        taxi_route(),
    );
    schedule(
        &sim,
        "BAW88",
        Movement::Arrival,
        WakeVortexCategory::Medium,
        at(10, 40),
        at(11, 0),
        taxi_route(),
    );

    sim.set_time(at(10, 15)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    let first = motion
        .registry()
        .handle_for(&FlightId::from("AFR1234"))
        .unwrap();

    sim.set_time(at(10, 45)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    let second = motion
        .registry()
        .handle_for(&FlightId::from("BAW88"))
        .unwrap();

    // Jump the clock backwards: the first flight becomes active again
    // and must come back as a brand new entity
    sim.set_time(at(10, 20)).unwrap();
    motion.refresh(&mut scene, sim.as_ref()).unwrap();
    let third = motion
        .registry()
        .handle_for(&FlightId::from("AFR1234"))
        .unwrap();

    let handles: HashSet<_> = [first, second, third].into();
    assert_eq!(handles.len(), 3, "Every appearance minted a fresh handle");
}

#[test]
fn stale_conflict_ids_do_not_disturb_the_radar() {
    let sim = simulation_at(10, 10);
    let (mut motion, mut scene) = radar();

    schedule(
        &sim,
        "AFR1234",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(10, 0),
        at(11, 0),
        taxi_route(),
    );

    // The second id matches no flight at all, the third not an active one
    schedule(
        &sim,
        "KLM601",
        Movement::Departure,
        WakeVortexCategory::Medium,
        at(12, 0),
        at(13, 0),
        taxi_route(),
    );
    sim.set_conflicts(ids(&["AFR1234", "GHOST", "KLM601"]))
        .unwrap();

    motion.refresh(&mut scene, sim.as_ref()).unwrap();

    assert_eq!(tracked(&motion), ids(&["AFR1234"]));
    let alerted = marker_for(&motion, &scene, "AFR1234").attributes.unwrap();
    assert_eq!(alerted.category, ColorCategory::Conflict);
}
