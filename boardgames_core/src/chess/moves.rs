use crate::chess::piece::PromotionKind;
use crate::logic::position::BoardPosition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Moves one piece by its normal rules, possibly capturing on `end`.
    Normal,
    /// King two squares toward the king-side rook, rook jumps over.
    CastleKingSide,
    /// King two squares toward the queen-side rook, rook jumps over.
    CastleQueenSide,
    /// Pawn captures the pawn beside it that just advanced two squares.
    EnPassant,
    /// Pawn reaches the last rank and becomes the chosen kind.
    PawnPromote(PromotionKind),
}

/// A chess move. `start`/`end` always name real squares, including for
/// castling (the king's squares) and promotion (where the pawn lands).
///
/// Equality looks only at the squares, never at the kind tag: a move typed
/// as a plain `(e1, g1)` equals the canonical king-side castle, so parsed
/// input can be matched against the legal-move list. The promotion choice
/// only separates two moves that are both promotions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChessMove {
    pub start: BoardPosition,
    pub end: BoardPosition,
    pub kind: MoveKind,
}

impl ChessMove {
    #[must_use]
    pub const fn new(start: BoardPosition, end: BoardPosition) -> Self {
        Self {
            start,
            end,
            kind: MoveKind::Normal,
        }
    }

    #[must_use]
    pub const fn with_kind(start: BoardPosition, end: BoardPosition, kind: MoveKind) -> Self {
        Self { start, end, kind }
    }

    #[must_use]
    pub const fn promotion(start: BoardPosition, end: BoardPosition, chosen: PromotionKind) -> Self {
        Self {
            start,
            end,
            kind: MoveKind::PawnPromote(chosen),
        }
    }

    #[must_use]
    pub const fn chosen_kind(&self) -> Option<PromotionKind> {
        match self.kind {
            MoveKind::PawnPromote(chosen) => Some(chosen),
            _ => None,
        }
    }
}

impl PartialEq for ChessMove {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && match (self.chosen_kind(), other.chosen_kind()) {
                (Some(mine), Some(theirs)) => mine == theirs,
                _ => true,
            }
    }
}

impl Eq for ChessMove {}

impl Hash for ChessMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::PawnPromote(chosen) if self.start.col == self.end.col => {
                write!(f, "({}, {})", self.start, chosen)
            }
            MoveKind::PawnPromote(chosen) => {
                write!(f, "({}, {}, {})", self.start, self.end, chosen)
            }
            _ => write!(f, "({}, {})", self.start, self.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i8, col: i8) -> BoardPosition {
        BoardPosition::new(row, col)
    }

    #[test]
    fn typed_move_matches_special_kind_on_same_squares() {
        let castle = ChessMove::with_kind(pos(7, 4), pos(7, 6), MoveKind::CastleKingSide);
        assert_eq!(ChessMove::new(pos(7, 4), pos(7, 6)), castle);

        let ep = ChessMove::with_kind(pos(3, 4), pos(2, 3), MoveKind::EnPassant);
        assert_eq!(ChessMove::new(pos(3, 4), pos(2, 3)), ep);
    }

    #[test]
    fn promotion_choice_only_separates_two_promotions() {
        let queen = ChessMove::promotion(pos(1, 4), pos(0, 4), PromotionKind::Queen);
        let knight = ChessMove::promotion(pos(1, 4), pos(0, 4), PromotionKind::Knight);
        assert_ne!(queen, knight);
        assert_eq!(queen, ChessMove::promotion(pos(1, 4), pos(0, 4), PromotionKind::Queen));

        // A plain move on the same squares matches any promotion choice
        let plain = ChessMove::new(pos(1, 4), pos(0, 4));
        assert_eq!(plain, queen);
        assert_eq!(plain, knight);
        assert_ne!(plain, ChessMove::new(pos(1, 4), pos(0, 3)));
    }

    #[test]
    fn equal_moves_hash_alike() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(mv: &ChessMove) -> u64 {
            let mut hasher = DefaultHasher::new();
            mv.hash(&mut hasher);
            hasher.finish()
        }

        let plain = ChessMove::new(pos(1, 4), pos(0, 4));
        let rook = ChessMove::promotion(pos(1, 4), pos(0, 4), PromotionKind::Rook);
        assert_eq!(hash_of(&plain), hash_of(&rook));
    }

    #[test]
    fn display_uses_algebraic_squares() {
        assert_eq!(ChessMove::new(pos(6, 6), pos(4, 6)).to_string(), "(g2, g4)");
        let promote = ChessMove::promotion(pos(1, 4), pos(0, 4), PromotionKind::Queen);
        assert_eq!(promote.to_string(), "(e7, queen)");
    }
}
