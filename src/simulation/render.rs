//! Capability interface the simulation uses to mirror its state onto visuals.
//!
//! The maze and search never inspect what a visual is. They keep the
//! [`VisualHandle`] returned at creation and pass it back on updates.

use crate::simulation::grid::{Coord, WallSide};

/// Opaque identifier for a renderer-owned visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

/// Rendering collaborator consumed by the carver and the search driver.
pub trait Renderer {
    /// Creates the visual for a fully walled cell at `coord`.
    fn instantiate_cell_visual(&mut self, coord: Coord) -> VisualHandle;

    /// Creates the visual for an agent standing on `coord`.
    fn instantiate_agent_visual(&mut self, coord: Coord) -> VisualHandle;

    fn set_wall_visible(&mut self, handle: VisualHandle, side: WallSide, visible: bool);

    fn set_position(&mut self, handle: VisualHandle, coord: Coord);
}

/// Renderer that draws nothing and hands out sequential handles.
#[derive(Debug, Default, Clone)]
pub struct NullRenderer {
    next: u64,
}

impl NullRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next
    }

    fn issue(&mut self) -> VisualHandle {
        let handle = VisualHandle(self.next);
        self.next += 1;
        handle
    }
}

impl Renderer for NullRenderer {
    fn instantiate_cell_visual(&mut self, _coord: Coord) -> VisualHandle {
        self.issue()
    }

    fn instantiate_agent_visual(&mut self, _coord: Coord) -> VisualHandle {
        self.issue()
    }

    fn set_wall_visible(&mut self, _handle: VisualHandle, _side: WallSide, _visible: bool) {}

    fn set_position(&mut self, _handle: VisualHandle, _coord: Coord) {}
}
