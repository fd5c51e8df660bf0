use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use logger::{Color, Logger};
use radar_view::markers::MarkerScene;
use radar_view::motion::MotionManager;
use radar_view::style::{RadarPalette, VisualStateResolver};
use traffic_sim::types::flight::{parse_datetime, Flight, FlightId};
use traffic_sim::types::movement::Movement;
use traffic_sim::types::position::Position;
use traffic_sim::types::sim_error::SimError;
use traffic_sim::types::simulation::Simulation;
use traffic_sim::types::timer::Timer;
use traffic_sim::types::wake_vortex_category::WakeVortexCategory;
use traffic_sim::types::TICK_FREQUENCY_MILLIS;

/// Everything the tick callback mutates: the reconciler and the scene it
/// keeps aligned with the simulation.
struct RadarState {
    motion: MotionManager,
    scene: MarkerScene,
}

fn clean_scr() {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush().unwrap();
}

fn main() -> Result<(), SimError> {
    let now = Utc::now().naive_local();
    let timer = Timer::new(now, 5);
    let sim = Arc::new(Simulation::new(timer));

    let logger = Logger::new(Path::new("logs"), "control-tower")
        .map_err(|e| SimError::Other(e.to_string()))?;

    let state = Arc::new(Mutex::new(RadarState {
        motion: MotionManager::new(VisualStateResolver::new(RadarPalette::default())),
        scene: MarkerScene::new(),
    }));

    let tick_sim = Arc::clone(&sim);
    let tick_state = Arc::clone(&state);
    let tick_logger = logger.clone();
    sim.start(move |tick_time, _tick_count| {
        let mut state_lock = match tick_state.lock() {
            Ok(lock) => lock,
            Err(_) => return,
        };
        let RadarState { motion, scene } = &mut *state_lock;
        if let Err(error) = motion.refresh(scene, tick_sim.as_ref()) {
            tick_logger
                .error(
                    &format!(
                        "Radar refresh at {} failed: {}",
                        tick_time.format("%d-%m-%Y %H:%M:%S"),
                        error
                    ),
                    false,
                )
                .ok();
        }
    })?;

    logger
        .info("Control tower radar started.", Color::Green, false)
        .ok();

    loop {
        println!("Enter command (type '-h' or '--help' for options): ");
        let mut command = String::new();
        io::stdin()
            .read_line(&mut command)
            .expect("Failed to read input");

        let args: Vec<&str> = command.split_whitespace().collect();
        if args.is_empty() {
            continue;
        }

        match args[0] {
            "add-flight" => {
                if let Err(error) = add_flight(&sim) {
                    println!("{}", error);
                }
            }

            "list-flights" => {
                display_radar(&sim, &state);
            }

            "conflict" => {
                if let Err(error) = raise_conflict(&sim, &args[1..]) {
                    println!("{}", error);
                }
            }

            "clear-conflicts" => {
                if let Err(error) = sim.clear_conflicts() {
                    println!("{}", error);
                } else {
                    println!("Conflict alerts cleared");
                }
            }

            "time-rate" => {
                clean_scr();
                if let Err(error) = set_time_rate(&sim) {
                    println!("{}", error);
                }
            }

            "set-time" => {
                clean_scr();
                if let Err(error) = set_time(&sim) {
                    println!("{}", error);
                }
            }

            "pause" => {
                sim.pause_simulation();
                println!("Simulation paused");
            }

            "resume" => {
                sim.resume_simulation();
                println!("Simulation resumed");
            }

            "test-data" => {
                clean_scr();
                if let Err(error) = add_test_data(&sim) {
                    println!("{}", error);
                }
            }

            "-h" | "--help" | "help" => print_help(),

            "exit" => break,

            _ => eprintln!("Invalid command. Use -h for help."),
        }
    }

    sim.stop();
    logger
        .info("Control tower radar stopped.", Color::Green, false)
        .ok();
    Ok(())
}

fn add_flight(sim: &Simulation) -> Result<(), SimError> {
    clean_scr();
    let call_sign = prompt_input("Enter the call sign: ");
    let movement = prompt_input("Enter the movement (DEP/ARR): ");
    let category = prompt_input("Enter the wake category (L/M/H): ");
    let qfu = prompt_input("Enter the runway in use, e.g. 26R: ");
    let departure_time = prompt_input("Enter the start time (DD-MM-YYYY HH:MM:SS): ");
    let arrival_time = prompt_input("Enter the end time (DD-MM-YYYY HH:MM:SS): ");
    let start = prompt_position("Enter the route start as 'x y' in metres: ")?;
    let end = prompt_position("Enter the route end as 'x y' in metres: ")?;

    let flight = Flight::new_from_console(
        &call_sign,
        &movement,
        &category,
        &qfu,
        &departure_time,
        &arrival_time,
        vec![start, end],
    )?;

    sim.add_flight(flight)?;
    println!("Flight added.");
    Ok(())
}

/// Marks the given call signs as being in conflict. The radar recolors
/// them on the next tick; ids that match no present flight are ignored.
fn raise_conflict(sim: &Simulation, call_signs: &[&str]) -> Result<(), SimError> {
    if call_signs.is_empty() {
        println!("Usage: conflict <call sign> [<call sign> ...]");
        return Ok(());
    }

    let ids: HashSet<FlightId> = call_signs.iter().map(|s| FlightId::from(*s)).collect();
    sim.set_conflicts(ids)?;
    println!("Conflict alert raised");
    Ok(())
}

fn set_time_rate(sim: &Simulation) -> Result<(), SimError> {
    let seconds_input = prompt_input("Enter the time rate (in simulated seconds per tick): ");
    let seconds: i64 = match seconds_input.parse() {
        Ok(s) => s,
        Err(_) => return Err(SimError::InvalidInput),
    };

    sim.set_time_rate(seconds)?;
    Ok(())
}

fn set_time(sim: &Simulation) -> Result<(), SimError> {
    let time_input = prompt_input("Enter the new time (DD-MM-YYYY HH:MM:SS): ");
    let new_time = parse_datetime(&time_input)?;

    sim.set_time(new_time)?;
    println!("Clock moved to {}", new_time.format("%d-%m-%Y %H:%M:%S"));
    Ok(())
}

/// Displays the radar picture in real time until 'q' is entered.
fn display_radar(sim: &Simulation, state: &Arc<Mutex<RadarState>>) {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut buffer = String::new();
        loop {
            buffer.clear();
            if io::stdin().read_line(&mut buffer).is_ok() && !buffer.trim().is_empty() {
                tx.send(()).ok();
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }
    });

    loop {
        io::stdout().flush().ok();

        if let Ok(state_lock) = state.try_lock() {
            print!("\x1B[2J\x1B[1;1H");
            if let Ok(time) = sim.current_time() {
                println!("Current time: {}", time.format("%d-%m-%Y %H:%M:%S"));
            }
            if state_lock.scene.is_empty() {
                println!("No flights on the radar.");
            } else {
                println!(
                    "\n{:<22} {:<12} {:<12} {:<12}",
                    "Flight", "X (m)", "Y (m)", "Color"
                );
                for marker in state_lock.scene.markers() {
                    // Markers created on the very last tick may not be
                    // placed yet
                    if let (Some(position), Some(attributes)) =
                        (marker.position, marker.attributes)
                    {
                        println!(
                            "{:<22} {:<12.1} {:<12.1} {:<12}",
                            marker.label,
                            position.x,
                            position.y,
                            attributes.category.as_str()
                        );
                    }
                }
            }
            println!("\nPress 'q' and Enter to exit list-flights mode");
        }

        if rx.try_recv().is_ok() {
            break;
        }

        thread::sleep(Duration::from_millis(TICK_FREQUENCY_MILLIS));
    }
}

fn prompt_input(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input.trim().to_string()
}

fn prompt_position(prompt: &str) -> Result<Position, SimError> {
    let input = prompt_input(prompt);
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(SimError::InvalidInput);
    }

    let x: f64 = parts[0].parse().map_err(|_| SimError::InvalidInput)?;
    let y: f64 = parts[1].parse().map_err(|_| SimError::InvalidInput)?;
    Ok(Position::new(x, y))
}

fn print_help() {
    clean_scr();
    println!("Available commands:");
    println!("  add-flight");
    println!("    Adds a new flight to the simulation. You'll be prompted for each detail.");
    println!("  list-flights");
    println!("    Shows the radar picture in real time.");
    println!("  conflict <call sign> [<call sign> ...]");
    println!("    Raises a conflict alert for the given flights.");
    println!("  clear-conflicts");
    println!("    Clears every conflict alert.");
    println!("  time-rate");
    println!("    Changes the simulation's elapsed time per tick.");
    println!("  set-time");
    println!("    Jumps the simulation clock to another time.");
    println!("  pause");
    println!("    Pauses the simulation.");
    println!("  resume");
    println!("    Resumes the simulation.");
    println!("  test-data");
    println!("    Adds a batch of random flights around the current time.");
    println!("  exit");
    println!("    Closes this application.");
}

fn add_test_data(sim: &Simulation) -> Result<(), SimError> {
    let prefixes = ["AFR", "BAW", "DLH", "IBE", "KLM"];
    let runways = ["08L", "08R", "26L", "26R"];
    let categories = [
        WakeVortexCategory::Light,
        WakeVortexCategory::Medium,
        WakeVortexCategory::Heavy,
    ];

    let now = sim.current_time()?;
    let mut rng = rand::thread_rng();

    for prefix in &prefixes {
        let flight_count = rng.gen_range(2..=4);
        for _ in 0..flight_count {
            let call_sign = format!("{}{:04}", prefix, rng.gen_range(1000..9999));

            let movement = if rng.gen_bool(0.5) {
                Movement::Departure
            } else {
                Movement::Arrival
            };
            let category = categories[rng.gen_range(0..categories.len())];
            let qfu = runways[rng.gen_range(0..runways.len())];

            // Stagger the windows so some flights are already moving, some
            // join over the next ticks and some only much later
            let departure_time = now + chrono::Duration::minutes(rng.gen_range(-10..30));
            let arrival_time = departure_time + chrono::Duration::minutes(rng.gen_range(5..40));

            let point_count = rng.gen_range(2..=4);
            let mut route = Vec::with_capacity(point_count);
            for _ in 0..point_count {
                route.push(Position::new(
                    rng.gen_range(-2000.0..2000.0),
                    rng.gen_range(-2000.0..2000.0),
                ));
            }

            let flight = Flight::new(
                &call_sign,
                movement,
                category,
                qfu,
                departure_time,
                arrival_time,
                route,
            )?;
            sim.add_flight(flight)?;
        }
    }

    println!("Test data added successfully!");
    Ok(())
}
