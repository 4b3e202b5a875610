use crate::chess::board::{pawn_direction, Board};
use crate::chess::moves::ChessMove;
use crate::chess::piece::{Piece, PieceKind};
use crate::logic::position::{BoardPosition, Player};
use serde::{Deserialize, Serialize};

/// One bit per square, row-major.
pub type Bitboard = u64;

pub const ORTHOGONAL: &[(i8, i8)] = &[(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL: &[(i8, i8)] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ALL_DIRECTIONS: &[(i8, i8)] = &[
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub const KNIGHT_OFFSETS: &[(i8, i8)] = &[
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

pub const LEAPER_RANGE: u8 = 1;
pub const SLIDER_RANGE: u8 = 7;

#[must_use]
pub fn bit(pos: BoardPosition) -> Bitboard {
    pos.square_index().map_or(0, |sq| 1u64 << sq)
}

/// Steps from `from` along each direction, at most `max_steps` times.
/// Empty squares are collected and the walk continues; an enemy piece is
/// collected and stops the walk; a friendly piece or the board edge stops it
/// without collecting.
pub fn ray_cast(
    board: &Board,
    from: BoardPosition,
    owner: Player,
    directions: &[(i8, i8)],
    max_steps: u8,
    targets: &mut Vec<BoardPosition>,
) {
    for &(dr, dc) in directions {
        let mut pos = from;
        for _ in 0..max_steps {
            pos = pos.translate(dr, dc);
            let Ok(cell) = board.piece_at(pos) else {
                break;
            };
            match cell {
                None => targets.push(pos),
                Some(other) => {
                    if other.player != owner {
                        targets.push(pos);
                    }
                    break;
                }
            }
        }
    }
}

/// Direction set and reach for a piece kind. Pawns move asymmetrically and
/// have none.
#[must_use]
pub const fn movement(kind: PieceKind) -> Option<(&'static [(i8, i8)], u8)> {
    match kind {
        PieceKind::Pawn => None,
        PieceKind::Knight => Some((KNIGHT_OFFSETS, LEAPER_RANGE)),
        PieceKind::King => Some((ALL_DIRECTIONS, LEAPER_RANGE)),
        PieceKind::Bishop => Some((DIAGONAL, SLIDER_RANGE)),
        PieceKind::RookQueenSide | PieceKind::RookKingSide | PieceKind::RookPromoted => {
            Some((ORTHOGONAL, SLIDER_RANGE))
        }
        PieceKind::Queen => Some((ALL_DIRECTIONS, SLIDER_RANGE)),
    }
}

/// The two forward diagonals a pawn on `from` attacks (possibly off-board).
#[must_use]
pub const fn pawn_attacks(from: BoardPosition, player: Player) -> [BoardPosition; 2] {
    let dir = pawn_direction(player);
    [from.translate(dir, -1), from.translate(dir, 1)]
}

/// Squares the piece on `from` attacks. Never includes castling or pawn pushes.
pub fn piece_threats(board: &Board, from: BoardPosition, piece: Piece, out: &mut Vec<BoardPosition>) {
    match movement(piece.kind) {
        Some((directions, range)) => ray_cast(board, from, piece.player, directions, range, out),
        None => out.extend(
            pawn_attacks(from, piece.player)
                .into_iter()
                .filter(|pos| pos.in_bounds()),
        ),
    }
}

/// Every square `by` attacks, as a bitboard.
#[must_use]
pub fn threat_map(board: &Board, by: Player) -> Bitboard {
    let mut targets = Vec::with_capacity(64);
    for (from, piece) in board.pieces().filter(|(_, piece)| piece.player == by) {
        piece_threats(board, from, piece, &mut targets);
    }
    targets.into_iter().fold(0, |map, pos| map | bit(pos))
}

/// Every square `by` attacks, in row-major order.
#[must_use]
pub fn threatened_positions(board: &Board, by: Player) -> Vec<BoardPosition> {
    let map = threat_map(board, by);
    BoardPosition::all().filter(|pos| map & bit(*pos) != 0).collect()
}

/// Checks if `player`'s king is attacked. A board without that king is never in check.
#[must_use]
pub fn is_in_check(board: &Board, player: Player) -> bool {
    board
        .find_king(player)
        .is_some_and(|king| threat_map(board, player.opposite()) & bit(king) != 0)
}

/// Simulates `mv` and reports whether `player`'s king survives it unattacked.
#[must_use]
pub fn leaves_king_safe(board: &Board, mv: &ChessMove, player: Player) -> bool {
    let mut next_board = board.clone();
    next_board.apply_move(mv).is_ok() && !is_in_check(&next_board, player)
}

/// Whether a side's king and starting rooks have moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideRights {
    pub king_moved: bool,
    pub queen_rook_moved: bool,
    pub king_rook_moved: bool,
}

impl SideRights {
    #[must_use]
    pub const fn can_castle_king_side(self) -> bool {
        !self.king_moved && !self.king_rook_moved
    }

    #[must_use]
    pub const fn can_castle_queen_side(self) -> bool {
        !self.king_moved && !self.queen_rook_moved
    }
}

/// Castling eligibility for both sides, tracked per king and per rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    pub one: SideRights,
    pub two: SideRights,
}

impl CastlingRights {
    #[must_use]
    pub const fn side(&self, player: Player) -> SideRights {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    fn side_mut(&mut self, player: Player) -> &mut SideRights {
        match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        }
    }

    /// Marks `piece` as having left its square, either by moving or by being captured.
    pub fn touch(&mut self, piece: Piece) {
        let side = self.side_mut(piece.player);
        match piece.kind {
            PieceKind::King => side.king_moved = true,
            PieceKind::RookQueenSide => side.queen_rook_moved = true,
            PieceKind::RookKingSide => side.king_rook_moved = true,
            _ => {}
        }
    }
}
