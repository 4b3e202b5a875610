use crate::chess::config::MaterialConfig;
use crate::chess::moves::{ChessMove, MoveKind};
use crate::chess::piece::{Piece, PieceKind};
use crate::logic::error::GameError;
use crate::logic::position::{BoardPosition, Player, NUM_SQUARES};
use serde::{Deserialize, Serialize};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::RookQueenSide,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::RookKingSide,
];

pub const KING_COL: i8 = 4;
pub const QUEEN_ROOK_COL: i8 = 0;
pub const KING_ROOK_COL: i8 = 7;

/// Row a player's pieces start on. Player one sits at the bottom (row 7).
#[must_use]
pub const fn home_row(player: Player) -> i8 {
    match player {
        Player::One => 7,
        Player::Two => 0,
    }
}

/// Row delta of one pawn step for `player`.
#[must_use]
pub const fn pawn_direction(player: Player) -> i8 {
    match player {
        Player::One => -1,
        Player::Two => 1,
    }
}

#[must_use]
pub const fn pawn_start_row(player: Player) -> i8 {
    match player {
        Player::One => 6,
        Player::Two => 1,
    }
}

/// The farthest rank, where a pawn promotes.
#[must_use]
pub const fn promotion_row(player: Player) -> i8 {
    home_row(player.opposite())
}

/// A piece removed by a move, and the square it was removed from (which
/// differs from the move's end square for en passant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub position: BoardPosition,
    pub piece: Piece,
}

/// Piece placement plus the running material value.
///
/// Every write goes through `place`/`take`, which keep `value` in step with
/// the grid, and every access is bounds-checked through `square`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<Piece>; NUM_SQUARES],
    value: i32,
    config: MaterialConfig,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MaterialConfig::default())
    }

    /// Standard starting arrangement valued with `config`.
    #[must_use]
    pub fn with_config(config: MaterialConfig) -> Self {
        let mut board = Self::empty(config);
        board.setup_pieces(Player::Two);
        board.setup_pieces(Player::One);
        board
    }

    #[must_use]
    pub const fn empty(config: MaterialConfig) -> Self {
        Self {
            grid: [None; NUM_SQUARES],
            value: 0,
            config,
        }
    }

    fn setup_pieces(&mut self, player: Player) {
        let back_row = home_row(player);
        let pawn_row = pawn_start_row(player);
        for (col, kind) in (0i8..).zip(BACK_RANK) {
            self.put(BoardPosition::new(back_row, col), Piece::new(kind, player));
            self.put(
                BoardPosition::new(pawn_row, col),
                Piece::new(PieceKind::Pawn, player),
            );
        }
    }

    fn put(&mut self, pos: BoardPosition, piece: Piece) {
        if let Err(err) = self.place(pos, piece) {
            log::warn!("setup skipped {pos}: {err}");
        }
    }

    fn square(pos: BoardPosition) -> Result<usize, GameError> {
        pos.square_index().ok_or(GameError::OutOfBounds(pos))
    }

    fn cell_mut(&mut self, pos: BoardPosition) -> Result<&mut Option<Piece>, GameError> {
        let sq = Self::square(pos)?;
        self.grid.get_mut(sq).ok_or(GameError::OutOfBounds(pos))
    }

    /// The piece on `pos`, or `None` when the square is empty.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn piece_at(&self, pos: BoardPosition) -> Result<Option<Piece>, GameError> {
        let sq = Self::square(pos)?;
        self.grid.get(sq).copied().ok_or(GameError::OutOfBounds(pos))
    }

    /// Puts `piece` on `pos`, replacing (and un-valuing) whatever stood there.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn place(&mut self, pos: BoardPosition, piece: Piece) -> Result<(), GameError> {
        self.take(pos)?;
        *self.cell_mut(pos)? = Some(piece);
        self.value += piece.player.sign() * self.config.value_of(piece.kind);
        Ok(())
    }

    /// Empties `pos`, returning the piece that stood there.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn take(&mut self, pos: BoardPosition) -> Result<Option<Piece>, GameError> {
        let removed = self.cell_mut(pos)?.take();
        if let Some(piece) = removed {
            self.value -= piece.player.sign() * self.config.value_of(piece.kind);
        }
        Ok(removed)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub const fn config(&self) -> &MaterialConfig {
        &self.config
    }

    /// Sums material over the grid without using the running value.
    #[must_use]
    pub fn calculate_value(&self) -> i32 {
        self.pieces()
            .map(|(_, piece)| piece.player.sign() * self.config.value_of(piece.kind))
            .sum()
    }

    /// Every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (BoardPosition, Piece)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter_map(|(sq, cell)| cell.map(|piece| (BoardPosition::from_index(sq), piece)))
    }

    #[must_use]
    pub fn find_king(&self, player: Player) -> Option<BoardPosition> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.player == player)
            .map(|(pos, _)| pos)
    }

    /// Moves pieces for `mv`, returning whatever it captured. The move is
    /// trusted to be legal; only square validity is checked, and the grid is
    /// untouched when that check fails.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` for an off-grid square, `GameError::InvalidMove`
    /// when there is nothing to move on `start` (or no rook to castle with).
    pub fn apply_move(&mut self, mv: &ChessMove) -> Result<Option<Capture>, GameError> {
        let piece = self
            .piece_at(mv.start)?
            .ok_or_else(|| GameError::InvalidMove(format!("no piece on {}", mv.start)))?;
        Self::square(mv.end)?;

        let rook_hop = castle_rook_squares(mv);
        if let Some((rook_from, _)) = rook_hop {
            if self.piece_at(rook_from)?.is_none() {
                return Err(GameError::InvalidMove(format!("no rook on {rook_from}")));
            }
        }

        // 1. Remove captured piece (if any)
        let victim_pos = match mv.kind {
            MoveKind::EnPassant => BoardPosition::new(mv.start.row, mv.end.col),
            _ => mv.end,
        };
        let captured = self.take(victim_pos)?.map(|victim| Capture {
            position: victim_pos,
            piece: victim,
        });

        // 2. Lift the mover and put it (or its promotion) down on `end`
        self.take(mv.start)?;
        let landed = match mv.kind {
            MoveKind::PawnPromote(chosen) => Piece::new(chosen.piece_kind(), piece.player),
            _ => piece,
        };
        self.place(mv.end, landed)?;

        // 3. Castling also moves the rook
        if let Some((rook_from, rook_to)) = rook_hop {
            if let Some(rook) = self.take(rook_from)? {
                self.place(rook_to, rook)?;
            }
        }

        Ok(captured)
    }

    /// Exact inverse of `apply_move` given the capture it returned.
    ///
    /// # Errors
    /// `GameError::InvalidMove` when `end` is empty, which means `mv` was not
    /// the last move applied.
    pub fn undo_move(&mut self, mv: &ChessMove, captured: Option<Capture>) -> Result<(), GameError> {
        let landed = self
            .piece_at(mv.end)?
            .ok_or_else(|| GameError::InvalidMove(format!("no piece on {} to undo", mv.end)))?;
        Self::square(mv.start)?;

        if let Some((rook_from, rook_to)) = castle_rook_squares(mv) {
            if let Some(rook) = self.take(rook_to)? {
                self.place(rook_from, rook)?;
            }
        }

        self.take(mv.end)?;
        let original = match mv.kind {
            MoveKind::PawnPromote(_) => Piece::new(PieceKind::Pawn, landed.player),
            _ => landed,
        };
        self.place(mv.start, original)?;

        if let Some(cap) = captured {
            self.place(cap.position, cap.piece)?;
        }
        Ok(())
    }
}

/// Origin and destination of the rook that accompanies a castling move.
#[must_use]
pub const fn castle_rook_squares(mv: &ChessMove) -> Option<(BoardPosition, BoardPosition)> {
    let row = mv.start.row;
    match mv.kind {
        MoveKind::CastleKingSide => Some((
            BoardPosition::new(row, KING_ROOK_COL),
            BoardPosition::new(row, KING_COL + 1),
        )),
        MoveKind::CastleQueenSide => Some((
            BoardPosition::new(row, QUEEN_ROOK_COL),
            BoardPosition::new(row, KING_COL - 1),
        )),
        _ => None,
    }
}
