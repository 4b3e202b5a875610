use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows and columns on every board in this crate.
pub const BOARD_SIZE: i8 = 8;

/// Total number of squares on a board.
pub const NUM_SQUARES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// The player number exposed to callers: 1 or 2.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Sign applied to material when summing a board value. Player one counts positive.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::One => 1,
            Self::Two => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// A (row, column) pair on an 8x8 grid. Row 0 is the top of the board.
///
/// A position may lie outside the grid: `translate` never checks bounds, so
/// callers stepping along a ray test `in_bounds` (or go through a board's
/// checked accessor) before touching the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardPosition {
    pub row: i8,
    pub col: i8,
}

impl BoardPosition {
    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    #[must_use]
    pub const fn translate(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row.wrapping_add(d_row),
            col: self.col.wrapping_add(d_col),
        }
    }

    /// Index into a row-major 64-cell grid, or `None` when off the board.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn square_index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row as usize * BOARD_SIZE as usize + self.col as usize)
        } else {
            None
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn from_index(sq: usize) -> Self {
        let size = BOARD_SIZE as usize;
        Self {
            row: (sq / size) as i8,
            col: (sq % size) as i8,
        }
    }

    /// Iterates all 64 on-board positions in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_SQUARES).map(Self::from_index)
    }
}

/// Algebraic form: column letter then rank, with row 0 printed as rank 8.
impl fmt::Display for BoardPosition {
    #[allow(clippy::cast_sign_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_bounds() {
            return write!(f, "({}, {})", self.row, self.col);
        }
        let file = char::from(b'a' + self.col as u8);
        write!(f, "{}{}", file, BOARD_SIZE - self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_does_not_clamp() {
        let pos = BoardPosition::new(0, 7).translate(-1, 1);
        assert_eq!(pos, BoardPosition::new(-1, 8));
        assert!(!pos.in_bounds());
        assert_eq!(pos.square_index(), None);
    }

    #[test]
    fn bounds_cover_exactly_the_grid() {
        assert!(BoardPosition::new(0, 0).in_bounds());
        assert!(BoardPosition::new(7, 7).in_bounds());
        assert!(!BoardPosition::new(8, 0).in_bounds());
        assert!(!BoardPosition::new(0, -1).in_bounds());
        assert_eq!(BoardPosition::all().count(), NUM_SQUARES);
    }

    #[test]
    fn index_round_trips_for_corners() {
        for pos in [BoardPosition::new(0, 0), BoardPosition::new(7, 7), BoardPosition::new(3, 5)] {
            let sq = pos.square_index().unwrap();
            assert_eq!(BoardPosition::from_index(sq), pos);
        }
    }

    #[test]
    fn algebraic_display() {
        assert_eq!(BoardPosition::new(0, 0).to_string(), "a8");
        assert_eq!(BoardPosition::new(6, 6).to_string(), "g2");
        assert_eq!(BoardPosition::new(7, 4).to_string(), "e1");
    }

    #[test]
    fn players_alternate() {
        assert_eq!(Player::One.opposite(), Player::Two);
        assert_eq!(Player::Two.opposite().number(), 1);
        assert_eq!(Player::Two.sign(), -1);
    }
}
