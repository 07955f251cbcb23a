use thiserror::Error;

/// Precondition violations surfaced by the grid and driver APIs.
///
/// All of these are detected synchronously at the offending call site and
/// never retried internally. Stopping via cancellation is a normal lifecycle
/// transition, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("grid dimensions must be nonzero, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error(
        "surface is {surface_width}x{surface_height} but grid is {grid_width}x{grid_height}"
    )]
    SurfaceMismatch {
        surface_width: u32,
        surface_height: u32,
        grid_width: u32,
        grid_height: u32,
    },

    #[error("simulation is already running")]
    AlreadyRunning,

    #[error("simulation worker panicked and its grid state was lost")]
    WorkerLost,
}
