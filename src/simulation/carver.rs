//! Randomized depth-first maze carving with a sealed 2x2 centre room.
//!
//! The carver walks the grid with an explicit stack (recursive backtracker),
//! knocking down the wall pair between each cell and a random unvisited
//! neighbour. Before the walk starts three of the four centre cells are
//! taken out of the unvisited set, so the only way into the room is through
//! the fourth one, which also becomes the spawn cell.

use crate::simulation::grid::{Cell, Coord, Grid, WallSide};
use crate::simulation::params::MIN_GRID_SIDE;
use crate::simulation::render::Renderer;
use log::{debug, info, trace, warn};
use rand::Rng;

/// Forces requested dimensions to even values of at least [`MIN_GRID_SIDE`].
///
/// Returns `(rows, columns)`.
#[must_use]
pub fn normalize_dimensions(rows: i32, columns: i32) -> (i32, i32) {
    (normalize_side(rows), normalize_side(columns))
}

fn normalize_side(mut side: i32) -> i32 {
    if side % 2 != 0 {
        side -= 1;
    }
    if side < MIN_GRID_SIDE {
        side = MIN_GRID_SIDE;
    }
    side
}

/// The 2x2 centre block of a normalized grid, in the order
/// top-left, top-right, bottom-left, bottom-right.
#[must_use]
pub const fn centre_cells(rows: i32, columns: i32) -> [Coord; 4] {
    let c = columns / 2;
    let r = rows / 2;
    [
        Coord::new(c, r + 1),
        Coord::new(c + 1, r + 1),
        Coord::new(c, r),
        Coord::new(c + 1, r),
    ]
}

/// Walls knocked out of each centre cell to merge the four into one room.
const CENTRE_OPENINGS: [[WallSide; 2]; 4] = [
    [WallSide::Down, WallSide::Right],
    [WallSide::Down, WallSide::Left],
    [WallSide::Up, WallSide::Right],
    [WallSide::Up, WallSide::Left],
];

/// Outcome of one iteration of the carving loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarveStep {
    /// A passage was opened and the cursor moved to a new cell.
    Advanced { from: Coord, to: Coord },
    /// No unvisited neighbour; the cursor returned to this stacked cell.
    Backtracked(Coord),
    /// Nothing left to carve.
    Finished,
}

/// A fully generated maze. Walls never change after construction.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    rows: i32,
    columns: i32,
    spawn: Coord,
    exit: Coord,
}

impl Maze {
    /// Wraps a hand-built grid, flagging the spawn and exit cells.
    #[must_use]
    pub fn from_grid(mut grid: Grid, rows: i32, columns: i32, spawn: Coord, exit: Coord) -> Self {
        if let Some(cell) = grid.cell_at_mut(spawn) {
            cell.is_spawn = true;
        }
        if let Some(cell) = grid.cell_at_mut(exit) {
            cell.is_end = true;
        }
        Self {
            grid,
            rows,
            columns,
            spawn,
            exit,
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Entry cell of the centre room; agents start here.
    #[must_use]
    pub const fn spawn(&self) -> Coord {
        self.spawn
    }

    /// Boundary cell with its outward wall removed.
    #[must_use]
    pub const fn exit(&self) -> Coord {
        self.exit
    }

    #[must_use]
    pub const fn centre(&self) -> [Coord; 4] {
        centre_cells(self.rows, self.columns)
    }

    #[must_use]
    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.grid.cell_at(coord)
    }

    #[must_use]
    pub const fn is_edge(&self, coord: Coord) -> bool {
        coord.x == 1 || coord.x == self.columns || coord.y == 1 || coord.y == self.rows
    }
}

/// Stateful carver over a freshly laid-out grid.
///
/// Every wall change is forwarded to the renderer through the cell's handle.
pub struct MazeCarver<'a, R: Rng> {
    grid: Grid,
    rows: i32,
    columns: i32,
    current: Option<Coord>,
    rng: &'a mut R,
    renderer: &'a mut dyn Renderer,
}

impl<'a, R: Rng> MazeCarver<'a, R> {
    /// Normalizes the dimensions and creates one fully walled cell per coordinate.
    pub fn new(rows: i32, columns: i32, rng: &'a mut R, renderer: &'a mut dyn Renderer) -> Self {
        let (rows, columns) = normalize_dimensions(rows, columns);
        let mut grid = Grid::new();
        for x in 1..=columns {
            for y in 1..=rows {
                let coord = Coord::new(x, y);
                grid.create_cell(coord);
                if let Some(cell) = grid.cell_at_mut(coord) {
                    cell.visual = Some(renderer.instantiate_cell_visual(coord));
                }
            }
        }
        debug!("Laid out {columns}x{rows} grid ({} cells)", grid.len());

        Self {
            grid,
            rows,
            columns,
            current: None,
            rng,
            renderer,
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Current position of the carving cursor.
    #[must_use]
    pub const fn current(&self) -> Option<Coord> {
        self.current
    }

    /// Clears a wall on the grid and hides it on the cell's visual.
    pub fn remove_wall(&mut self, coord: Coord, side: WallSide) {
        if !self.grid.remove_wall(coord, side) {
            return;
        }
        if let Some(handle) = self.grid.cell_at(coord).and_then(|c| c.visual) {
            self.renderer.set_wall_visible(handle, side, false);
        }
    }

    /// Removes the wall pair shared by two adjacent cells.
    pub fn open_passage(&mut self, from: Coord, to: Coord) {
        let side = if to.x < from.x {
            WallSide::Left
        } else if to.x > from.x {
            WallSide::Right
        } else if to.y > from.y {
            WallSide::Up
        } else if to.y < from.y {
            WallSide::Down
        } else {
            return;
        };
        self.remove_wall(to, side.opposite());
        self.remove_wall(from, side);
    }

    /// Merges the centre block into one room and picks its single entrance.
    ///
    /// The other three room cells are withdrawn from the unvisited set so the
    /// walk can never attach them to the maze. The entrance is flagged as the
    /// spawn cell and becomes the carving start.
    pub fn carve_centre(&mut self) -> Coord {
        let centre = centre_cells(self.rows, self.columns);
        for (coord, openings) in centre.iter().zip(CENTRE_OPENINGS) {
            for side in openings {
                self.remove_wall(*coord, side);
            }
        }

        let entrance = self.rng.random_range(0..centre.len());
        for (i, coord) in centre.iter().enumerate() {
            if i != entrance {
                self.grid.mark_visited(*coord);
            }
        }

        let spawn = centre[entrance];
        if let Some(cell) = self.grid.cell_at_mut(spawn) {
            cell.is_spawn = true;
        }
        self.start(spawn);
        debug!("Centre room entrance at ({}, {})", spawn.x, spawn.y);
        spawn
    }

    /// Places the carving cursor on `seed` and marks it visited.
    pub fn start(&mut self, seed: Coord) {
        self.current = Some(seed);
        self.grid.mark_visited(seed);
    }

    /// Runs one iteration of the depth-first loop.
    pub fn step(&mut self) -> CarveStep {
        let Some(current) = self.current else {
            return CarveStep::Finished;
        };
        if self.grid.unvisited_count() == 0 {
            return CarveStep::Finished;
        }

        let candidates = self.grid.unvisited_neighbors(current);
        if !candidates.is_empty() {
            let next = candidates[self.rng.random_range(0..candidates.len())];
            self.grid.push_visit(current);
            self.open_passage(current, next);
            self.current = Some(next);
            self.grid.mark_visited(next);
            trace!("carve ({}, {}) -> ({}, {})", current.x, current.y, next.x, next.y);
            CarveStep::Advanced {
                from: current,
                to: next,
            }
        } else if let Some(previous) = self.grid.pop_visit() {
            self.current = Some(previous);
            CarveStep::Backtracked(previous)
        } else {
            warn!(
                "Carving stalled with {} unreachable unvisited cells",
                self.grid.unvisited_count()
            );
            CarveStep::Finished
        }
    }

    /// Carves until every reachable cell joins the spanning tree.
    ///
    /// Returns the number of passages opened.
    pub fn run(&mut self) -> usize {
        let mut opened = 0;
        let mut backtracks = 0;
        loop {
            match self.step() {
                CarveStep::Advanced { .. } => opened += 1,
                CarveStep::Backtracked(_) => backtracks += 1,
                CarveStep::Finished => break,
            }
        }
        debug!("Carving done: {opened} passages, {backtracks} backtracks");
        opened
    }

    /// Picks a random boundary cell as the exit and opens its outward wall.
    ///
    /// Edge precedence for the opened wall: left, right, top, then bottom.
    pub fn make_exit(&mut self) -> Coord {
        let (rows, columns) = (self.rows, self.columns);
        let edge: Vec<Coord> = self
            .grid
            .iter()
            .map(Cell::position)
            .filter(|c| c.x == 1 || c.x == columns || c.y == 1 || c.y == rows)
            .collect();

        let exit = edge[self.rng.random_range(0..edge.len())];
        if let Some(cell) = self.grid.cell_at_mut(exit) {
            cell.is_end = true;
        }

        let side = if exit.x == 1 {
            WallSide::Left
        } else if exit.x == columns {
            WallSide::Right
        } else if exit.y == rows {
            WallSide::Up
        } else {
            WallSide::Down
        };
        self.remove_wall(exit, side);
        exit
    }

    fn into_maze(self, spawn: Coord, exit: Coord) -> Maze {
        Maze {
            grid: self.grid,
            rows: self.rows,
            columns: self.columns,
            spawn,
            exit,
        }
    }
}

/// Builds a complete maze: layout, centre room, spanning tree, exit.
pub fn generate<R: Rng>(
    rows: i32,
    columns: i32,
    rng: &mut R,
    renderer: &mut dyn Renderer,
) -> Maze {
    let mut carver = MazeCarver::new(rows, columns, rng, renderer);
    let spawn = carver.carve_centre();
    carver.run();
    let exit = carver.make_exit();
    info!(
        "Generated {}x{} maze: spawn ({}, {}), exit ({}, {})",
        carver.columns, carver.rows, spawn.x, spawn.y, exit.x, exit.y
    );
    carver.into_maze(spawn, exit)
}
