use crate::simulation::grid::{Coord, WallSide};
use crate::simulation::render::{Renderer, VisualHandle};
use rayon::prelude::*;
use std::collections::HashMap;

pub const CORNER: char = '+';
pub const WALL_H: char = '-';
pub const WALL_V: char = '|';
pub const FLOOR: char = '.';
pub const AGENT: char = 'o';
pub const CROWD: char = '@';

#[derive(Clone, Debug)]
enum Visual {
    Cell { walls: [bool; 4] },
    Agent { coord: Coord },
}

const fn wall_slot(side: WallSide) -> usize {
    side.id() as usize - 1
}

/// Terminal renderer: mirrors wall visibility and agent positions and
/// rasterizes them as ASCII.
///
/// Cell `(x, y)` is drawn at text row `2 * (rows - y) + 1`, column
/// `2 * (x - 1) + 1`, so `y == rows` is the top line.
#[derive(Clone, Debug, Default)]
pub struct MazeCanvas {
    visuals: Vec<Visual>,
    cells: HashMap<Coord, usize>,
    show_cells: bool,
    rows: i32,
    columns: i32,
}

impl MazeCanvas {
    /// `show_cells == false` leaves cell interiors blank.
    #[must_use]
    pub fn new(show_cells: bool) -> Self {
        Self {
            show_cells,
            ..Self::default()
        }
    }

    /// Grid size inferred from the cells created so far, as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.columns)
    }

    #[must_use]
    pub fn wall_visible(&self, coord: Coord, side: WallSide) -> bool {
        match self.cells.get(&coord).map(|&i| &self.visuals[i]) {
            Some(Visual::Cell { walls }) => walls[wall_slot(side)],
            _ => false,
        }
    }

    /// Current position of an agent visual.
    #[must_use]
    pub fn agent_position(&self, handle: VisualHandle) -> Option<Coord> {
        match self.visuals.get(handle.0 as usize) {
            Some(Visual::Agent { coord }) => Some(*coord),
            _ => None,
        }
    }

    fn occupancy(&self) -> HashMap<Coord, usize> {
        let mut counts = HashMap::new();
        for visual in &self.visuals {
            if let Visual::Agent { coord } = visual {
                *counts.entry(*coord).or_insert(0) += 1;
            }
        }
        counts
    }

    fn glyph(&self, r: i32, c: i32, occupancy: &HashMap<Coord, usize>) -> char {
        let rows = self.rows;
        match (r % 2 == 1, c % 2 == 1) {
            (true, true) => {
                let coord = Coord::new((c + 1) / 2, rows - (r - 1) / 2);
                match occupancy.get(&coord).copied().unwrap_or(0) {
                    0 if self.show_cells => FLOOR,
                    0 => ' ',
                    1 => AGENT,
                    _ => CROWD,
                }
            }
            (false, true) => {
                let x = (c + 1) / 2;
                let above = Coord::new(x, rows - r / 2 + 1);
                let below = Coord::new(x, rows - r / 2);
                if self.wall_visible(above, WallSide::Down)
                    || self.wall_visible(below, WallSide::Up)
                {
                    WALL_H
                } else {
                    ' '
                }
            }
            (true, false) => {
                let y = rows - (r - 1) / 2;
                let left = Coord::new(c / 2, y);
                let right = Coord::new(c / 2 + 1, y);
                if self.wall_visible(left, WallSide::Right)
                    || self.wall_visible(right, WallSide::Left)
                {
                    WALL_V
                } else {
                    ' '
                }
            }
            (false, false) => CORNER,
        }
    }

    /// Renders the maze as `2 * rows + 1` lines of `2 * columns + 1` characters.
    #[must_use]
    pub fn rasterize(&self) -> Vec<String> {
        if self.rows == 0 || self.columns == 0 {
            return Vec::new();
        }
        let occupancy = self.occupancy();
        let width = 2 * self.columns + 1;

        // Lines are independent; build them in parallel
        (0..=2 * self.rows)
            .into_par_iter()
            .map(|r| {
                (0..width)
                    .map(|c| self.glyph(r, c, &occupancy))
                    .collect::<String>()
            })
            .collect()
    }

    fn push(&mut self, visual: Visual) -> VisualHandle {
        self.visuals.push(visual);
        VisualHandle(self.visuals.len() as u64 - 1)
    }
}

impl Renderer for MazeCanvas {
    fn instantiate_cell_visual(&mut self, coord: Coord) -> VisualHandle {
        let handle = self.push(Visual::Cell { walls: [true; 4] });
        self.cells.insert(coord, handle.0 as usize);
        self.rows = self.rows.max(coord.y);
        self.columns = self.columns.max(coord.x);
        handle
    }

    fn instantiate_agent_visual(&mut self, coord: Coord) -> VisualHandle {
        self.push(Visual::Agent { coord })
    }

    fn set_wall_visible(&mut self, handle: VisualHandle, side: WallSide, visible: bool) {
        if let Some(Visual::Cell { walls }) = self.visuals.get_mut(handle.0 as usize) {
            walls[wall_slot(side)] = visible;
        }
    }

    fn set_position(&mut self, handle: VisualHandle, coord: Coord) {
        if let Some(Visual::Agent { coord: current }) = self.visuals.get_mut(handle.0 as usize) {
            *current = coord;
        }
    }
}
