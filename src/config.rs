use std::time::Duration;

/// Default duration between generations.
const DEFAULT_TICK_MILLIS: u64 = 500;

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Wall-clock delay between generations.
    pub tick_interval: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MILLIS),
        }
    }
}

/// Quantized random-seeding parameters.
///
/// Each cell takes one uniform draw `d` from `[0, draws)` and starts alive iff
/// `floor(d * scale) > 0`. The defaults reproduce the classic LED-matrix
/// demo's `floor((rand() % 4) * 0.34)` truthy test: draws 0, 1 and 2 floor to
/// zero and only the top draw of four maps to a live cell, so roughly one
/// cell in four starts alive. That 1-in-4 falls out of the quantization, not
/// a plain Bernoulli probability.
#[derive(Debug, Clone, Copy)]
pub struct SeedParams {
    /// Size of the uniform draw space.
    pub draws: u32,
    /// Scale applied to the draw before the floor-and-truthy test.
    pub scale: f64,
}

impl SeedParams {
    /// Whether a given draw maps to a live cell.
    pub fn quantize(&self, draw: u32) -> bool {
        (f64::from(draw) * self.scale).floor() > 0.0
    }
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            draws: 4,
            scale: 0.34,
        }
    }
}
