use crate::logic::error::GameError;
use crate::logic::position::Player;
use std::fmt;

/// The contract shared by every two-player board in this crate.
///
/// `possible_moves` borrows the board immutably, so enumerating moves can
/// never disturb the grid, the value, the player to move or the history.
/// `apply_move` and `undo_last_move` form an exact push/pop pair, which lets
/// a caller walk a move tree on a single board without cloning it per node.
pub trait GameBoard {
    type Move: Clone + PartialEq + fmt::Debug + fmt::Display;
    /// What the history stores for each applied move: the move plus whatever
    /// derived data undo needs.
    type Record: fmt::Debug;

    fn current_player(&self) -> Player;

    /// Material or disc balance, positive in favour of player one.
    fn value(&self) -> i32;

    /// Applied moves, oldest first.
    fn move_history(&self) -> &[Self::Record];

    /// Every move legal for `current_player` in the present state.
    fn possible_moves(&self) -> Vec<Self::Move>;

    /// Applies `mv` if it equals one of the legal moves.
    ///
    /// # Errors
    /// `GameError::InvalidMove` when the move is not legal here, or
    /// `GameError::OutOfBounds` when it names a square off the grid. The board
    /// is unchanged in both cases.
    fn apply_move(&mut self, mv: &Self::Move) -> Result<(), GameError>;

    /// Reverses the most recent `apply_move`.
    ///
    /// # Errors
    /// `GameError::EmptyHistory` when nothing has been applied.
    fn undo_last_move(&mut self) -> Result<(), GameError>;

    /// True once the game has reached a terminal state.
    fn is_finished(&self) -> bool;

    /// The value summed from scratch over the grid. Always equal to `value()`.
    fn recompute_value(&self) -> i32;
}
