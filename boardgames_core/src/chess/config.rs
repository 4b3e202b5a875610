use crate::chess::piece::{PieceKind, VAL_BISHOP, VAL_KNIGHT, VAL_PAWN, VAL_QUEEN, VAL_ROOK};
use serde::{Deserialize, Serialize};

/// Material weights used for a chess board's running value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            pawn: VAL_PAWN,
            knight: VAL_KNIGHT,
            bishop: VAL_BISHOP,
            rook: VAL_ROOK,
            queen: VAL_QUEEN,
        }
    }
}

impl MaterialConfig {
    /// Parses weights from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns the `serde_json` error for malformed input.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Weight of one piece of `kind`. The king is never captured and carries none.
    #[must_use]
    pub const fn value_of(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::RookQueenSide | PieceKind::RookKingSide | PieceKind::RookPromoted => {
                self.rook
            }
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Queen => self.queen,
            PieceKind::King => 0,
        }
    }
}
