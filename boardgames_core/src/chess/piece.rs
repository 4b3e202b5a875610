use crate::logic::position::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

// Default material weights
pub const VAL_PAWN: i32 = 1;
pub const VAL_KNIGHT: i32 = 3;
pub const VAL_BISHOP: i32 = 3;
pub const VAL_ROOK: i32 = 5;
pub const VAL_QUEEN: i32 = 9;

/// Kind of a chess piece. Rooks are split by origin: the two starting rooks
/// carry their side so castling eligibility can be tracked per rook, and a
/// rook produced by promotion never castles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    RookQueenSide,
    RookKingSide,
    RookPromoted,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    #[must_use]
    pub const fn is_rook(self) -> bool {
        matches!(
            self,
            Self::RookQueenSide | Self::RookKingSide | Self::RookPromoted
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::RookQueenSide | Self::RookKingSide | Self::RookPromoted => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The replacement a pawn may become on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionKind {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionKind {
    pub const ALL: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    #[must_use]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            Self::Queen => PieceKind::Queen,
            Self::Rook => PieceKind::RookPromoted,
            Self::Bishop => PieceKind::Bishop,
            Self::Knight => PieceKind::Knight,
        }
    }
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.piece_kind().name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, player: Player) -> Self {
        Self { kind, player }
    }
}
