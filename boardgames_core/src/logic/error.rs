use crate::logic::position::BoardPosition;

/// Recoverable failures reported by board operations. A call that returns
/// one of these leaves the board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("no moves to undo")]
    EmptyHistory,

    #[error("position {0:?} is outside the board")]
    OutOfBounds(BoardPosition),
}
