//! Push-to-goal reference game.
//!
//! A deliberately tiny deterministic game used by the search-engine tests:
//! seven cells in a row, the maximizing piece starting on cell 3, the
//! minimizing piece on cell 5. Each side may move its piece one step
//! toward the center cell 4. The game ends when the pieces collide
//! (become adjacent); the maximizing side scores +1 if its piece occupies
//! the center, -1 otherwise.
//!
//! A piece already on the center has no moves, which exercises the
//! engines' stalemate-leaf handling.

use std::fmt;

use gambit_core::{Board, EvalConfig};

/// The goal cell.
pub const CENTER: u8 = 4;

/// Number of cells, numbered 1 through 7.
pub const CELLS: u8 = 7;

/// One step of a piece between adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub from: u8,
    pub to: u8,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Game state: the two piece positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushGoal {
    max_pos: u8,
    min_pos: u8,
}

impl PushGoal {
    /// Starting position: maximizer on 3, minimizer on 5.
    pub fn new() -> Self {
        Self {
            max_pos: 3,
            min_pos: 5,
        }
    }

    /// Arbitrary position, for tests.
    pub fn with_positions(max_pos: u8, min_pos: u8) -> Self {
        Self { max_pos, min_pos }
    }

    pub fn max_pos(&self) -> u8 {
        self.max_pos
    }

    pub fn min_pos(&self) -> u8 {
        self.min_pos
    }
}

impl Default for PushGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for PushGoal {
    type Move = Step;

    fn legal_moves(&self, max_to_move: bool) -> Vec<Step> {
        if self.is_terminal() {
            return Vec::new();
        }
        let (pos, other) = if max_to_move {
            (self.max_pos, self.min_pos)
        } else {
            (self.min_pos, self.max_pos)
        };
        if pos == CENTER {
            return Vec::new();
        }
        let to = if pos < CENTER { pos + 1 } else { pos - 1 };
        if to == other {
            return Vec::new();
        }
        vec![Step { from: pos, to }]
    }

    fn apply(&mut self, mv: &Step) {
        if self.max_pos == mv.from {
            self.max_pos = mv.to;
        } else {
            self.min_pos = mv.to;
        }
    }

    fn undo(&mut self, mv: &Step) {
        if self.max_pos == mv.to {
            self.max_pos = mv.from;
        } else {
            self.min_pos = mv.from;
        }
    }

    fn is_terminal(&self) -> bool {
        self.max_pos.abs_diff(self.min_pos) <= 1
    }

    fn hash(&self) -> u64 {
        (u64::from(self.max_pos) << 8) | u64::from(self.min_pos)
    }

    fn evaluate(&self, _config: &EvalConfig) -> f64 {
        if self.max_pos == CENTER {
            1.0
        } else {
            -1.0
        }
    }
}
