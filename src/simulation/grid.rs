//! Maze grid: cells keyed by 1-indexed coordinates, each with four wall flags.

use crate::simulation::render::VisualHandle;
use std::collections::{BTreeMap, BTreeSet};

/// Integer grid coordinate, 1-indexed within `[1, columns] x [1, rows]`.
///
/// `y` grows upward: the top row is `y == rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Wall identifiers as the maze stores them (1 = left, 2 = right, 3 = up, 4 = down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallSide {
    Left = 1,
    Right = 2,
    Up = 3,
    Down = 4,
}

impl WallSide {
    #[must_use]
    pub const fn all() -> [WallSide; 4] {
        [WallSide::Left, WallSide::Right, WallSide::Up, WallSide::Down]
    }

    /// The wall the neighbouring cell has on the shared edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Grid offset of the neighbour behind this wall.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    const fn index(self) -> usize {
        self as usize - 1
    }
}

/// Presence flags for the four walls of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walls([bool; 4]);

impl Default for Walls {
    fn default() -> Self {
        Self([true; 4])
    }
}

impl Walls {
    #[must_use]
    pub const fn has(&self, side: WallSide) -> bool {
        self.0[side.index()]
    }

    pub fn remove(&mut self, side: WallSide) {
        self.0[side.index()] = false;
    }

    /// Number of walls still standing.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|present| **present).count()
    }
}

/// One maze cell.
#[derive(Clone, Debug)]
pub struct Cell {
    position: Coord,
    pub walls: Walls,
    pub is_spawn: bool,
    pub is_end: bool,
    /// Renderer handle, if a visual was created for this cell.
    pub visual: Option<VisualHandle>,
}

impl Cell {
    #[must_use]
    pub fn new(position: Coord) -> Self {
        Self {
            position,
            walls: Walls::default(),
            is_spawn: false,
            is_end: false,
            visual: None,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    #[must_use]
    pub const fn has_wall(&self, side: WallSide) -> bool {
        self.walls.has(side)
    }
}

/// Cell storage plus the working sets used while carving.
///
/// Cells live in a `BTreeMap` so iteration order (and therefore any seeded
/// random choice over it) is reproducible.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: BTreeMap<Coord, Cell>,
    unvisited: BTreeSet<Coord>,
    visit_stack: Vec<Coord>,
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully walled cell at `coord` and marks it unvisited.
    ///
    /// Returns `false` if a cell already existed there (nothing changes).
    pub fn create_cell(&mut self, coord: Coord) -> bool {
        if self.cells.contains_key(&coord) {
            return false;
        }
        self.cells.insert(coord, Cell::new(coord));
        self.unvisited.insert(coord);
        true
    }

    #[must_use]
    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    pub fn cell_at_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.cells.get_mut(&coord)
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Clears one wall flag. Missing cells are ignored.
    ///
    /// Returns whether a cell was found.
    pub fn remove_wall(&mut self, coord: Coord, side: WallSide) -> bool {
        match self.cells.get_mut(&coord) {
            Some(cell) => {
                cell.walls.remove(side);
                true
            }
            None => false,
        }
    }

    /// Existing orthogonal neighbours, in left, right, up, down order.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        WallSide::all()
            .into_iter()
            .map(|side| {
                let (dx, dy) = side.delta();
                coord.offset(dx, dy)
            })
            .filter(|n| self.cells.contains_key(n))
            .collect()
    }

    /// Neighbours that have not yet joined the spanning tree.
    #[must_use]
    pub fn unvisited_neighbors(&self, coord: Coord) -> Vec<Coord> {
        self.neighbors(coord)
            .into_iter()
            .filter(|n| self.unvisited.contains(n))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn is_unvisited(&self, coord: Coord) -> bool {
        self.unvisited.contains(&coord)
    }

    /// Marks a cell visited. Returns whether it was unvisited before.
    pub fn mark_visited(&mut self, coord: Coord) -> bool {
        self.unvisited.remove(&coord)
    }

    #[must_use]
    pub fn unvisited_count(&self) -> usize {
        self.unvisited.len()
    }

    pub fn push_visit(&mut self, coord: Coord) {
        self.visit_stack.push(coord);
    }

    pub fn pop_visit(&mut self) -> Option<Coord> {
        self.visit_stack.pop()
    }

    #[must_use]
    pub fn visit_depth(&self) -> usize {
        self.visit_stack.len()
    }

    /// The coordinate of the cell flagged as spawn, if any.
    #[must_use]
    pub fn spawn(&self) -> Option<Coord> {
        self.iter().find(|c| c.is_spawn).map(Cell::position)
    }

    /// The coordinate of the cell flagged as exit, if any.
    #[must_use]
    pub fn end(&self) -> Option<Coord> {
        self.iter().find(|c| c.is_end).map(Cell::position)
    }

    /// Whether an agent standing on `from` can step through `side`.
    ///
    /// A missing cell counts as blocked.
    #[must_use]
    pub fn is_open(&self, from: Coord, side: WallSide) -> bool {
        self.cell_at(from).is_some_and(|cell| !cell.has_wall(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for side in WallSide::all() {
            assert_eq!(side.opposite().opposite(), side);
            let (dx, dy) = side.delta();
            let (ox, oy) = side.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_wall_ids_match_maze_numbering() {
        assert_eq!(WallSide::Left.id(), 1);
        assert_eq!(WallSide::Right.id(), 2);
        assert_eq!(WallSide::Up.id(), 3);
        assert_eq!(WallSide::Down.id(), 4);
    }

    #[test]
    fn test_walls_remove_and_count() {
        let mut walls = Walls::default();
        assert_eq!(walls.count(), 4);
        walls.remove(WallSide::Up);
        assert!(!walls.has(WallSide::Up));
        assert!(walls.has(WallSide::Down));
        assert_eq!(walls.count(), 3);
    }
}
