use std::thread;
use std::time::Duration;

use crate::cancel::CancelToken;
use crate::config::SimConfig;
use crate::error::LifeError;
use crate::grid::Grid;
use crate::stats::Stats;
use crate::surface::PixelSurface;

/// Color drawn for live cells.
const LIVE_COLOR: (u8, u8, u8) = (255, 0, 0);
/// Color drawn for dead cells.
const DEAD_COLOR: (u8, u8, u8) = (0, 0, 0);

/// Owns a [`Grid`] and runs the advance/render/sleep loop on a dedicated
/// worker thread.
///
/// Lifecycle is Stopped → Running (on [`Simulation::start`]) → Stopped (on
/// [`Simulation::stop`], or when the loop observes cancellation on its own).
/// While running, the worker holds the grid and the surface exclusively;
/// `stop()` joins the worker and takes both back, so external inspection only
/// ever sees complete generations.
pub struct Simulation<S: PixelSurface + Send + 'static> {
    config: SimConfig,
    stats: Stats,
    grid: Option<Grid>,
    surface: Option<S>,
    worker: Option<Worker<S>>,
}

struct Worker<S> {
    handle: thread::JoinHandle<(Grid, S)>,
    token: CancelToken,
}

impl<S: PixelSurface + Send + 'static> Simulation<S> {
    pub fn new(grid: Grid, config: SimConfig) -> Self {
        let total_cells = u64::from(grid.width()) * u64::from(grid.height());
        Self {
            config,
            stats: Stats::new(total_cells),
            grid: Some(grid),
            surface: None,
            worker: None,
        }
    }

    /// Begin ticking against `surface` on a background thread.
    ///
    /// Fails with [`LifeError::AlreadyRunning`] while a worker is active
    /// (calling `start` twice without an intervening `stop` is an explicit
    /// error here, not a no-op) and with [`LifeError::SurfaceMismatch`] when
    /// the surface dimensions disagree with the grid. The `token` is the only
    /// stop channel: `stop()` cancels it, and external code (signal handlers,
    /// watchdogs) may cancel it directly.
    pub fn start(&mut self, surface: S, token: CancelToken) -> Result<(), LifeError> {
        if self.worker.is_some() {
            return Err(LifeError::AlreadyRunning);
        }
        // With no worker active, the grid can only be absent if a previous
        // worker panicked and took it down.
        let grid = self.grid.take().ok_or(LifeError::WorkerLost)?;

        if surface.width() != grid.width() || surface.height() != grid.height() {
            let err = LifeError::SurfaceMismatch {
                surface_width: surface.width(),
                surface_height: surface.height(),
                grid_width: grid.width(),
                grid_height: grid.height(),
            };
            self.grid = Some(grid);
            return Err(err);
        }

        let interval = self.config.tick_interval;
        let stats = self.stats.clone();
        let worker_token = token.clone();
        let handle =
            thread::spawn(move || run_loop(grid, surface, interval, worker_token, stats));

        self.surface = None;
        self.worker = Some(Worker { handle, token });
        Ok(())
    }

    /// Stop the worker and reclaim the grid and surface. Idempotent.
    ///
    /// Safe to call when already stopped and when the loop has already exited
    /// on its own (e.g. the token was cancelled externally); the worker is
    /// joined and its resources reclaimed exactly once either way. If the
    /// worker panicked, the grid is unrecoverable and later `start` calls
    /// fail with [`LifeError::WorkerLost`].
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.token.cancel();
        match worker.handle.join() {
            Ok((grid, surface)) => {
                self.grid = Some(grid);
                self.surface = Some(surface);
            }
            Err(_) => {
                log::error!("simulation worker panicked; grid state lost");
            }
        }
    }

    /// Whether the worker thread is still ticking.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.handle.is_finished())
    }

    /// The grid, available while stopped.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// The surface of the last run, available after `stop()`.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Per-tick samples recorded by the worker; readable at any time.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl<S: PixelSurface + Send + 'static> Drop for Simulation<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker body: cancel check → advance → render → sample → interruptible
/// sleep. Nothing inside a tick blocks; the sleep is the only suspension
/// point and the token cuts it short.
fn run_loop<S: PixelSurface>(
    mut grid: Grid,
    mut surface: S,
    interval: Duration,
    token: CancelToken,
    stats: Stats,
) -> (Grid, S) {
    log::info!(
        "simulation worker started: {}x{} grid, {:?} tick",
        grid.width(),
        grid.height(),
        interval
    );

    loop {
        if token.is_cancelled() {
            break;
        }
        grid.advance();
        render(&grid, &mut surface);
        stats.record(grid.generation(), grid.population());
        if token.wait_timeout(interval) {
            break;
        }
    }

    log::info!("simulation worker stopped at generation {}", grid.generation());
    (grid, surface)
}

/// Draw the whole grid: live cells in the accent color, dead cells black.
fn render<S: PixelSurface>(grid: &Grid, surface: &mut S) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let (r, g, b) = if grid.cell(x, y) { LIVE_COLOR } else { DEAD_COLOR };
            surface.set_pixel(x, y, r, g, b);
        }
    }
}
