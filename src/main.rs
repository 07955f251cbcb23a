mod cancel;
mod config;
mod driver;
mod error;
mod grid;
mod stats;
mod surface;

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use cancel::CancelToken;
use config::{SeedParams, SimConfig};
use driver::Simulation;
use grid::Grid;
use surface::FrameBuffer;

/// Default panel dimensions, matching a single 32x16 LED module.
const MATRIX_WIDTH: u32 = 32;
const MATRIX_HEIGHT: u32 = 16;

/// How long the demo runs before shutting itself down.
const DEMO_RUNTIME_SECS: u64 = 10;

fn main() {
    env_logger::init();

    log::info!("lifematrix - Conway's Game of Life on a pixel surface");

    let mut grid = Grid::new(MATRIX_WIDTH, MATRIX_HEIGHT).expect("panel dimensions are nonzero");

    // Seed from the clock, like the classic demo, but through an explicit
    // value so a run can be reproduced.
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    grid.seed_random(&SeedParams::default(), seed);
    log::info!(
        "seeded {} of {} cells alive (seed {seed})",
        grid.population(),
        u64::from(MATRIX_WIDTH) * u64::from(MATRIX_HEIGHT)
    );

    let mut sim = Simulation::new(grid, SimConfig::default());
    let token = CancelToken::new();
    sim.start(FrameBuffer::new(MATRIX_WIDTH, MATRIX_HEIGHT), token.clone())
        .expect("fresh simulation accepts start");

    // Stand in for the external signal source: run for a fixed budget, then
    // cancel. A real frontend would cancel this token from its SIGINT path.
    thread::sleep(Duration::from_secs(DEMO_RUNTIME_SECS));
    token.cancel();
    sim.stop();

    log::info!(
        "stopped at generation {} with population {}",
        sim.stats().latest_generation(),
        sim.stats().latest_population()
    );
}
