use crate::logic::position::BoardPosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A run of `count` discs flipped along one direction from a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlipSet {
    pub row_delta: i8,
    pub col_delta: i8,
    pub count: u8,
}

/// An Othello action. `flips` is empty until the game applies the move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OthelloMove {
    Place {
        position: BoardPosition,
        flips: Vec<FlipSet>,
    },
    Pass,
}

impl OthelloMove {
    #[must_use]
    pub const fn place(position: BoardPosition) -> Self {
        Self::Place {
            position,
            flips: Vec::new(),
        }
    }

    #[must_use]
    pub const fn position(&self) -> Option<BoardPosition> {
        match self {
            Self::Place { position, .. } => Some(*position),
            Self::Pass => None,
        }
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The recorded flips; empty for a pass or an unapplied placement.
    #[must_use]
    pub fn flips(&self) -> &[FlipSet] {
        match self {
            Self::Place { flips, .. } => flips,
            Self::Pass => &[],
        }
    }
}

// Flip records are derived, so identity is the placement square alone.
impl PartialEq for OthelloMove {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl Eq for OthelloMove {}

impl fmt::Display for OthelloMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place { position, .. } => write!(f, "({}, {})", position.row, position.col),
            Self::Pass => write!(f, "pass"),
        }
    }
}
