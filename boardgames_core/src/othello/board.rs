use crate::logic::error::GameError;
use crate::logic::position::{BoardPosition, Player, NUM_SQUARES};

pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello grid. Each cell is empty or owned; `value` is player one's disc
/// count minus player two's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<Player>; NUM_SQUARES],
    value: i32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates the initial board: d4=player two, e4=player one,
    /// d5=player one, e5=player two.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (row, col, player) in [
            (3, 3, Player::Two),
            (4, 4, Player::Two),
            (3, 4, Player::One),
            (4, 3, Player::One),
        ] {
            board.set(BoardPosition::new(row, col), Some(player));
        }
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; NUM_SQUARES],
            value: 0,
        }
    }

    fn square(pos: BoardPosition) -> Result<usize, GameError> {
        pos.square_index().ok_or(GameError::OutOfBounds(pos))
    }

    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn disc_at(&self, pos: BoardPosition) -> Result<Option<Player>, GameError> {
        let sq = Self::square(pos)?;
        Ok(self.grid.get(sq).copied().flatten())
    }

    /// Sets one cell, keeping `value` in step. Off-grid positions are ignored.
    fn set(&mut self, pos: BoardPosition, disc: Option<Player>) {
        let Some(cell) = pos.square_index().and_then(|sq| self.grid.get_mut(sq)) else {
            return;
        };
        if let Some(old) = cell.take() {
            self.value -= old.sign();
        }
        if let Some(new) = disc {
            self.value += new.sign();
        }
        *cell = disc;
    }

    /// Puts a `player` disc on `pos`, replacing whatever was there.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn place(&mut self, pos: BoardPosition, player: Player) -> Result<(), GameError> {
        Self::square(pos)?;
        self.set(pos, Some(player));
        Ok(())
    }

    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn clear_square(&mut self, pos: BoardPosition) -> Result<(), GameError> {
        Self::square(pos)?;
        self.set(pos, None);
        Ok(())
    }

    /// Length of the opponent run that `player` would bracket by placing on
    /// `from` and walking along `(dr, dc)`. Zero when the walk does not end
    /// on one of `player`'s discs after at least one opponent disc.
    #[must_use]
    pub fn bracketed_run(&self, from: BoardPosition, player: Player, dr: i8, dc: i8) -> u8 {
        let mut pos = from.translate(dr, dc);
        let mut run = 0u8;
        while let Ok(Some(owner)) = self.disc_at(pos) {
            if owner == player {
                return run;
            }
            run += 1;
            pos = pos.translate(dr, dc);
        }
        0
    }

    /// An empty square where `player` brackets at least one run.
    #[must_use]
    pub fn is_legal_placement(&self, pos: BoardPosition, player: Player) -> bool {
        matches!(self.disc_at(pos), Ok(None))
            && DIRECTIONS
                .iter()
                .any(|&(dr, dc)| self.bracketed_run(pos, player, dr, dc) > 0)
    }

    /// Every legal placement for `player`, in row-major order.
    #[must_use]
    pub fn legal_placements(&self, player: Player) -> Vec<BoardPosition> {
        BoardPosition::all()
            .filter(|&pos| self.is_legal_placement(pos, player))
            .collect()
    }

    /// Sets the `count` discs after `from` along `(dr, dc)` to `owner`.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` if the run leaves the grid; cells already
    /// walked stay changed, so callers validate runs beforehand.
    pub fn flip_run(
        &mut self,
        from: BoardPosition,
        dr: i8,
        dc: i8,
        count: u8,
        owner: Player,
    ) -> Result<(), GameError> {
        let mut pos = from;
        for _ in 0..count {
            pos = pos.translate(dr, dc);
            self.place(pos, owner)?;
        }
        Ok(())
    }

    /// Returns `(player_one_count, player_two_count)`.
    #[must_use]
    pub fn count(&self) -> (u8, u8) {
        self.grid.iter().flatten().fold((0, 0), |(one, two), disc| match disc {
            Player::One => (one + 1, two),
            Player::Two => (one, two + 1),
        })
    }

    /// Returns the number of empty squares.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.grid.iter().filter(|cell| cell.is_none()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Disc difference summed from the grid, ignoring the running total.
    #[must_use]
    pub fn calculate_value(&self) -> i32 {
        self.grid.iter().flatten().map(|disc| disc.sign()).sum()
    }
}
