use crate::chess::board::{Board, Capture};
use crate::chess::config::MaterialConfig;
use crate::chess::generator::MoveGenerator;
use crate::chess::moves::ChessMove;
use crate::chess::piece::{Piece, PieceKind};
use crate::chess::rules::{is_in_check, threatened_positions, CastlingRights};
use crate::logic::error::GameError;
use crate::logic::game::GameBoard;
use crate::logic::position::{BoardPosition, Player};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Checkmate(Player), // Winner
    Stalemate,
}

/// One applied move plus what undo needs to reverse it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: ChessMove,
    pub piece: Piece,
    pub captured: Option<Capture>,
    rights_before: CastlingRights,
    en_passant_before: Option<BoardPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessGame {
    board: Board,
    turn: Player,
    rights: CastlingRights,
    /// The pawn that advanced two squares on the previous move, if any.
    en_passant: Option<BoardPosition>,
    history: Vec<MoveRecord>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MaterialConfig::default())
    }

    #[must_use]
    pub fn with_config(config: MaterialConfig) -> Self {
        Self::from_board(Board::with_config(config))
    }

    /// A board holding only the given pieces, player one to move. Every king
    /// and rook counts as unmoved.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` if a position is off the grid.
    pub fn with_pieces<I>(pieces: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (BoardPosition, Piece)>,
    {
        Self::with_pieces_and_config(pieces, MaterialConfig::default())
    }

    /// Like `with_pieces`, valued with `config`.
    ///
    /// # Errors
    /// `GameError::OutOfBounds` if a position is off the grid.
    pub fn with_pieces_and_config<I>(pieces: I, config: MaterialConfig) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (BoardPosition, Piece)>,
    {
        let mut board = Board::empty(config);
        for (pos, piece) in pieces {
            board.place(pos, piece)?;
        }
        Ok(Self::from_board(board))
    }

    fn from_board(board: Board) -> Self {
        Self {
            board,
            turn: Player::One,
            rights: CastlingRights::default(),
            en_passant: None,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Material weights this game is valued with.
    #[must_use]
    pub const fn config(&self) -> &MaterialConfig {
        self.board.config()
    }

    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn piece_at(&self, pos: BoardPosition) -> Result<Option<Piece>, GameError> {
        self.board.piece_at(pos)
    }

    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn player_at(&self, pos: BoardPosition) -> Result<Option<Player>, GameError> {
        Ok(self.board.piece_at(pos)?.map(|piece| piece.player))
    }

    /// # Errors
    /// `GameError::OutOfBounds` when `pos` is off the grid.
    pub fn is_empty(&self, pos: BoardPosition) -> Result<bool, GameError> {
        Ok(self.board.piece_at(pos)?.is_none())
    }

    #[must_use]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.rights
    }

    #[must_use]
    pub const fn en_passant_target(&self) -> Option<BoardPosition> {
        self.en_passant
    }

    /// Every square `by` currently attacks.
    #[must_use]
    pub fn threatened_positions(&self, by: Player) -> Vec<BoardPosition> {
        threatened_positions(&self.board, by)
    }

    #[must_use]
    pub fn is_check(&self) -> bool {
        is_in_check(&self.board, self.turn)
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.status() == GameStatus::Checkmate(self.turn.opposite())
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        let generator = MoveGenerator::new();
        if generator.has_legal_moves(&self.board, self.turn, &self.rights, self.en_passant) {
            GameStatus::Playing
        } else if self.is_check() {
            GameStatus::Checkmate(self.turn.opposite())
        } else {
            GameStatus::Stalemate
        }
    }

    fn check_squares(mv: &ChessMove) -> Result<(), GameError> {
        for pos in [mv.start, mv.end] {
            if !pos.in_bounds() {
                return Err(GameError::OutOfBounds(pos));
            }
        }
        Ok(())
    }

    fn log_terminal_status(&self) {
        if !log::log_enabled!(log::Level::Info) {
            return;
        }
        match self.status() {
            GameStatus::Checkmate(winner) => info!("checkmate, {winner} wins"),
            GameStatus::Stalemate => info!("stalemate"),
            GameStatus::Playing => {}
        }
    }
}

impl GameBoard for ChessGame {
    type Move = ChessMove;
    type Record = MoveRecord;

    fn current_player(&self) -> Player {
        self.turn
    }

    fn value(&self) -> i32 {
        self.board.value()
    }

    fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    fn possible_moves(&self) -> Vec<ChessMove> {
        let moves = MoveGenerator::new().generate_moves(
            &self.board,
            self.turn,
            &self.rights,
            self.en_passant,
        );
        trace!("{} legal moves for {}", moves.len(), self.turn);
        moves
    }

    fn apply_move(&mut self, mv: &ChessMove) -> Result<(), GameError> {
        Self::check_squares(mv)?;

        // Play the canonical move so a typed (e1, g1) castles. Promotions are
        // generated queen first, so a plain (e7, e8) promotes to a queen.
        let Some(canonical) = self.possible_moves().into_iter().find(|legal| legal == mv) else {
            debug!("rejected {mv} for {}", self.turn);
            return Err(GameError::InvalidMove(mv.to_string()));
        };

        let piece = self
            .board
            .piece_at(canonical.start)?
            .ok_or_else(|| GameError::InvalidMove(canonical.to_string()))?;
        let captured = self.board.apply_move(&canonical)?;

        let record = MoveRecord {
            mv: canonical,
            piece,
            captured,
            rights_before: self.rights,
            en_passant_before: self.en_passant,
        };

        self.rights.touch(piece);
        if let Some(cap) = captured {
            self.rights.touch(cap.piece);
        }
        self.en_passant = (piece.kind == PieceKind::Pawn
            && (canonical.end.row - canonical.start.row).abs() == 2)
            .then_some(canonical.end);

        debug!("{} played {canonical}, value {}", self.turn, self.board.value());
        self.history.push(record);
        self.turn = self.turn.opposite();

        self.log_terminal_status();
        Ok(())
    }

    fn undo_last_move(&mut self) -> Result<(), GameError> {
        let record = self.history.last().ok_or(GameError::EmptyHistory)?;
        self.board.undo_move(&record.mv, record.captured)?;

        self.rights = record.rights_before;
        self.en_passant = record.en_passant_before;
        self.turn = record.piece.player;
        debug!("undid {} by {}", record.mv, record.piece.player);

        self.history.pop();
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.status() != GameStatus::Playing
    }

    fn recompute_value(&self) -> i32 {
        self.board.calculate_value()
    }
}
