//! Default simulation parameters.

pub const DEFAULT_ROWS: i32 = 10;
pub const DEFAULT_COLUMNS: i32 = 10;
pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_MAX_MOVES: u32 = 10;
pub const DEFAULT_MUTATION_CHANCE: f64 = 0.2; // Reserved, no operator reads it yet
pub const DEFAULT_INTERVAL: f64 = 0.5; // Seconds between ticks

/// Smallest even grid side that still has a well-defined 2x2 centre.
pub const MIN_GRID_SIDE: i32 = 4;
/// Each blocked move costs `1 / PENALTY_DIVISOR` fitness.
pub const PENALTY_DIVISOR: f32 = 5.0;
