//! Bounded move history that doubles as a replay queue.

use crate::simulation::agent::MoveDirection;
use std::collections::VecDeque;

/// FIFO of the moves an agent has made, capped at `capacity`.
///
/// While filling, moves are appended. Once full, the owner replays by
/// popping the oldest move and pushing it back after use, so the buffer
/// rotates through the recorded path. Pushing onto a full buffer drops the
/// oldest entry.
#[derive(Debug, Clone)]
pub struct MoveHistory {
    moves: VecDeque<MoveDirection>,
    capacity: usize,
}

impl MoveHistory {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, direction: MoveDirection) {
        if self.capacity == 0 {
            return;
        }
        if self.moves.len() == self.capacity {
            self.moves.pop_front();
        }
        self.moves.push_back(direction);
    }

    /// Removes and returns the oldest recorded move.
    pub fn pop_front(&mut self) -> Option<MoveDirection> {
        self.moves.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once the history holds `capacity` moves and turns into a replay queue.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.moves.len() == self.capacity
    }

    /// Gets a move by index (0 = oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<MoveDirection> {
        self.moves.get(index).copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<MoveDirection> {
        self.moves.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = MoveDirection> + '_ {
        self.moves.iter().copied()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}
