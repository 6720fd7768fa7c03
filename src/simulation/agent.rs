use crate::simulation::carver::Maze;
use crate::simulation::grid::{Coord, WallSide};
use crate::simulation::history::MoveHistory;
use crate::simulation::params::PENALTY_DIVISOR;
use crate::simulation::render::VisualHandle;
use log::warn;
use rand::Rng;

/// Movement codes an agent draws from (0 = up, 1 = down, 2 = left, 3 = right).
///
/// These are numbered independently of [`WallSide`]; the two only meet in
/// [`MoveDirection::wall_side`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl MoveDirection {
    #[must_use]
    pub const fn all() -> [MoveDirection; 4] {
        [Self::Up, Self::Down, Self::Left, Self::Right]
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Up),
            1 => Some(Self::Down),
            2 => Some(Self::Left),
            3 => Some(Self::Right),
            _ => None,
        }
    }

    /// Uniformly random direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.random_range(0..4)]
    }

    /// The wall that blocks this move on the agent's current cell.
    #[must_use]
    pub const fn wall_side(self) -> WallSide {
        match self {
            Self::Up => WallSide::Up,
            Self::Down => WallSide::Down,
            Self::Left => WallSide::Left,
            Self::Right => WallSide::Right,
        }
    }

    /// Coordinate one step away in this direction.
    #[must_use]
    pub const fn apply(self, from: Coord) -> Coord {
        let (dx, dy) = self.wall_side().delta();
        from.offset(dx, dy)
    }
}

/// Fitness of an agent at `position` with `penalty` blocked moves.
///
/// Computed as `|dx + |dy|| - penalty / 5`. The outer absolute value wraps
/// the sum, so this is not a true Manhattan distance: opposite-signed
/// offsets cancel. Higher is better.
#[must_use]
pub fn fitness_score(position: Coord, exit: Coord, penalty: f32) -> f32 {
    let dx = (position.x - exit.x) as f32;
    let dy = (position.y - exit.y) as f32;
    (dx + dy.abs()).abs() - penalty / PENALTY_DIVISOR
}

/// What happened to an agent during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentTick {
    /// Move budget already spent; nothing changed.
    Skipped,
    /// The agent started the tick on the exit cell.
    ReachedExit,
    Moved(MoveDirection),
    Blocked(MoveDirection),
    /// The agent stands on a coordinate with no cell.
    Lost,
}

/// A single search individual.
#[derive(Debug, Clone)]
pub struct Agent {
    pub grid_position: Coord,
    pub visual: Option<VisualHandle>,
    pub moves_taken: u32,
    pub max_moves: u32,
    /// Blocked move attempts.
    pub penalty: f32,
    pub fitness: f32,
    pub history: MoveHistory,
}

impl Agent {
    /// Creates an agent on `spawn` with an empty history of `max_moves` slots.
    #[must_use]
    pub fn new(spawn: Coord, max_moves: u32) -> Self {
        Self {
            grid_position: spawn,
            visual: None,
            moves_taken: 0,
            max_moves,
            penalty: 0.0,
            fitness: 0.0,
            history: MoveHistory::with_capacity(max_moves as usize),
        }
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.moves_taken >= self.max_moves
    }

    /// Advances the agent by one tick.
    ///
    /// Once the history holds `max_moves` entries the next direction is
    /// replayed from it instead of drawn at random.
    pub fn update<R: Rng + ?Sized>(&mut self, maze: &Maze, rng: &mut R) -> AgentTick {
        if self.is_exhausted() {
            return AgentTick::Skipped;
        }
        self.moves_taken += 1;

        let Some(cell) = maze.cell_at(self.grid_position) else {
            warn!(
                "Agent at ({}, {}) is outside the maze",
                self.grid_position.x, self.grid_position.y
            );
            return AgentTick::Lost;
        };

        if cell.is_end && cell.position() == self.grid_position {
            return AgentTick::ReachedExit;
        }

        let direction = if self.history.is_full() {
            self.history
                .pop_front()
                .unwrap_or_else(|| MoveDirection::random(rng))
        } else {
            MoveDirection::random(rng)
        };

        let outcome = if cell.has_wall(direction.wall_side()) {
            self.penalty += 1.0;
            AgentTick::Blocked(direction)
        } else {
            self.grid_position = direction.apply(self.grid_position);
            AgentTick::Moved(direction)
        };

        self.history.push(direction);
        self.update_fitness(maze.exit());
        outcome
    }

    pub fn update_fitness(&mut self, exit: Coord) {
        self.fitness = fitness_score(self.grid_position, exit, self.penalty);
    }

    /// Puts the agent back on `spawn` for another run, keeping its history.
    ///
    /// A full history is replayed move by move on the next run.
    pub fn restart(&mut self, spawn: Coord) {
        self.grid_position = spawn;
        self.moves_taken = 0;
        self.penalty = 0.0;
        self.fitness = 0.0;
    }
}
