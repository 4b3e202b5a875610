use crate::logic::error::GameError;
use crate::logic::game::GameBoard;
use crate::logic::position::{BoardPosition, Player};
use crate::othello::board::{Board, DIRECTIONS};
use crate::othello::moves::{FlipSet, OthelloMove};
use log::{debug, info, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OthelloGame {
    board: Board,
    turn: Player,
    /// Passes applied in a row; two means neither side can place.
    pass_count: u8,
    history: Vec<OthelloMove>,
}

impl Default for OthelloGame {
    fn default() -> Self {
        Self::new()
    }
}

impl OthelloGame {
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// A board holding only the given discs, player one to move.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` if a position is off the grid.
    pub fn with_discs<I>(discs: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (BoardPosition, Player)>,
    {
        let mut board = Board::empty();
        for (pos, player) in discs {
            board.place(pos, player)?;
        }
        Ok(Self::from_board(board))
    }

    const fn from_board(board: Board) -> Self {
        Self {
            board,
            turn: Player::One,
            pass_count: 0,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn disc_at(&self, pos: BoardPosition) -> Result<Option<Player>, GameError> {
        self.board.disc_at(pos)
    }

    #[must_use]
    pub const fn pass_count(&self) -> u8 {
        self.pass_count
    }

    /// Returns `(player_one_count, player_two_count)`.
    #[must_use]
    pub fn disc_counts(&self) -> (u8, u8) {
        self.board.count()
    }

    /// The player with more discs once the game is over. `None` while play
    /// continues or on a draw.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        if !self.is_finished() {
            return None;
        }
        match self.board.value() {
            v if v > 0 => Some(Player::One),
            v if v < 0 => Some(Player::Two),
            _ => None,
        }
    }

    /// Every run the current player brackets from `position`.
    fn flips_from(&self, position: BoardPosition) -> Vec<FlipSet> {
        DIRECTIONS
            .iter()
            .filter_map(|&(row_delta, col_delta)| {
                let count = self
                    .board
                    .bracketed_run(position, self.turn, row_delta, col_delta);
                (count > 0).then_some(FlipSet {
                    row_delta,
                    col_delta,
                    count,
                })
            })
            .collect()
    }

    fn log_terminal_status(&self) {
        if !self.is_finished() {
            return;
        }
        let (one, two) = self.disc_counts();
        match self.winner() {
            Some(winner) => info!("game over {one}-{two}, {winner} wins"),
            None => info!("game over {one}-{two}, draw"),
        }
    }
}

impl GameBoard for OthelloGame {
    type Move = OthelloMove;
    type Record = OthelloMove;

    fn current_player(&self) -> Player {
        self.turn
    }

    fn value(&self) -> i32 {
        self.board.value()
    }

    fn move_history(&self) -> &[OthelloMove] {
        &self.history
    }

    fn possible_moves(&self) -> Vec<OthelloMove> {
        let mut moves: Vec<OthelloMove> = self
            .board
            .legal_placements(self.turn)
            .into_iter()
            .map(OthelloMove::place)
            .collect();
        if moves.is_empty() {
            moves.push(OthelloMove::Pass);
        }
        trace!("{} legal moves for {}", moves.len(), self.turn);
        moves
    }

    fn apply_move(&mut self, mv: &OthelloMove) -> Result<(), GameError> {
        if let Some(position) = mv.position() {
            if !position.in_bounds() {
                return Err(GameError::OutOfBounds(position));
            }
        }
        if !self.possible_moves().contains(mv) {
            debug!("rejected {mv} for {}", self.turn);
            return Err(GameError::InvalidMove(mv.to_string()));
        }

        let applied = match mv.position() {
            None => {
                self.pass_count = self.pass_count.saturating_add(1);
                OthelloMove::Pass
            }
            Some(position) => {
                // All runs are measured before the first disc changes
                let flips = self.flips_from(position);
                self.board.place(position, self.turn)?;
                for flip in &flips {
                    self.board.flip_run(
                        position,
                        flip.row_delta,
                        flip.col_delta,
                        flip.count,
                        self.turn,
                    )?;
                }
                self.pass_count = 0;
                OthelloMove::Place { position, flips }
            }
        };

        debug!("{} played {applied}, value {}", self.turn, self.board.value());
        self.history.push(applied);
        self.turn = self.turn.opposite();

        self.log_terminal_status();
        Ok(())
    }

    fn undo_last_move(&mut self) -> Result<(), GameError> {
        let last = self.history.last().ok_or(GameError::EmptyHistory)?;
        let mover = self.turn.opposite();

        match last {
            OthelloMove::Pass => {
                self.pass_count = self.pass_count.saturating_sub(1);
            }
            OthelloMove::Place { position, flips } => {
                self.board.clear_square(*position)?;
                for flip in flips {
                    self.board.flip_run(
                        *position,
                        flip.row_delta,
                        flip.col_delta,
                        flip.count,
                        self.turn,
                    )?;
                }
                let before = self.history.len().checked_sub(2);
                let passed_before = before
                    .and_then(|idx| self.history.get(idx))
                    .is_some_and(OthelloMove::is_pass);
                self.pass_count = u8::from(passed_before);
            }
        }
        debug!("undid {last} by {mover}");

        self.turn = mover;
        self.history.pop();
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.pass_count >= 2 || self.board.is_full()
    }

    fn recompute_value(&self) -> i32 {
        self.board.calculate_value()
    }
}
