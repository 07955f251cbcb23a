use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Maximum number of tick samples retained.
const MAX_HISTORY: usize = 512;

/// Snapshot of the simulation at the end of one tick.
#[derive(Debug, Clone)]
pub struct TickSample {
    pub generation: u64,
    pub population: u64,
    pub density: f64,
    pub recorded_at: Instant,
}

/// Thread-safe tick-sample store shared between the worker and observers.
///
/// The worker records one sample per tick, after advance and render; readers
/// on other threads get consistent whole-generation values without ever
/// touching the grid buffers mid-advance.
#[derive(Debug, Clone)]
pub struct Stats {
    inner: Arc<Mutex<StatsInner>>,
}

#[derive(Debug)]
struct StatsInner {
    /// Ring buffer of samples, oldest first.
    history: VecDeque<TickSample>,
    /// Total cell count of the grid, for density.
    total_cells: u64,
}

impl Stats {
    pub fn new(total_cells: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StatsInner {
                history: VecDeque::with_capacity(MAX_HISTORY),
                total_cells,
            })),
        }
    }

    /// Record a completed tick. Called from the worker thread.
    pub fn record(&self, generation: u64, population: u64) {
        if let Ok(mut inner) = self.inner.lock() {
            let density = if inner.total_cells > 0 {
                population as f64 / inner.total_cells as f64
            } else {
                0.0
            };
            if inner.history.len() >= MAX_HISTORY {
                inner.history.pop_front();
            }
            inner.history.push_back(TickSample {
                generation,
                population,
                density,
                recorded_at: Instant::now(),
            });
        }
    }

    /// Generation of the most recent sample, 0 before the first tick.
    pub fn latest_generation(&self) -> u64 {
        self.inner
            .lock()
            .ok()
            .and_then(|i| i.history.back().map(|s| s.generation))
            .unwrap_or(0)
    }

    /// Population of the most recent sample.
    pub fn latest_population(&self) -> u64 {
        self.inner
            .lock()
            .ok()
            .and_then(|i| i.history.back().map(|s| s.population))
            .unwrap_or(0)
    }

    /// Density of the most recent sample.
    pub fn latest_density(&self) -> f64 {
        self.inner
            .lock()
            .ok()
            .and_then(|i| i.history.back().map(|s| s.density))
            .unwrap_or(0.0)
    }

    /// Snapshot of the retained history as (generation, population) pairs.
    pub fn population_history(&self) -> Vec<(u64, u64)> {
        self.inner
            .lock()
            .map(|i| i.history.iter().map(|s| (s.generation, s.population)).collect())
            .unwrap_or_default()
    }
}
