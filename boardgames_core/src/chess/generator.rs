use crate::chess::board::{
    home_row, pawn_direction, pawn_start_row, promotion_row, Board, KING_COL, KING_ROOK_COL,
    QUEEN_ROOK_COL,
};
use crate::chess::moves::{ChessMove, MoveKind};
use crate::chess::piece::{Piece, PieceKind, PromotionKind};
use crate::chess::rules::{bit, leaves_king_safe, movement, ray_cast, threat_map, CastlingRights};
use crate::logic::position::{BoardPosition, Player};

/// Produces legal chess moves for one side.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// All legal moves for `turn`: candidates for every piece it owns, with
    /// any move that would leave its own king attacked filtered out.
    #[must_use]
    pub fn generate_moves(
        &self,
        board: &Board,
        turn: Player,
        rights: &CastlingRights,
        en_passant: Option<BoardPosition>,
    ) -> Vec<ChessMove> {
        let mut moves = Vec::with_capacity(64);

        for (from, piece) in board.pieces().filter(|(_, piece)| piece.player == turn) {
            self.generate_piece_moves(board, from, piece, rights, en_passant, &mut moves);
        }

        moves.retain(|mv| leaves_king_safe(board, mv, turn));
        moves
    }

    /// Checks if `turn` has at least one legal move, stopping at the first found.
    #[must_use]
    pub fn has_legal_moves(
        &self,
        board: &Board,
        turn: Player,
        rights: &CastlingRights,
        en_passant: Option<BoardPosition>,
    ) -> bool {
        let mut candidates = Vec::with_capacity(32);
        for (from, piece) in board.pieces().filter(|(_, piece)| piece.player == turn) {
            candidates.clear();
            self.generate_piece_moves(board, from, piece, rights, en_passant, &mut candidates);
            if candidates.iter().any(|mv| leaves_king_safe(board, mv, turn)) {
                return true;
            }
        }
        false
    }

    /// Candidate moves for the piece on `from`, before the check-safety filter.
    pub fn generate_piece_moves(
        &self,
        board: &Board,
        from: BoardPosition,
        piece: Piece,
        rights: &CastlingRights,
        en_passant: Option<BoardPosition>,
        moves: &mut Vec<ChessMove>,
    ) {
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(board, from, piece.player, en_passant, moves),
            PieceKind::King => {
                self.generate_stepping_moves(board, from, piece, moves);
                self.generate_castles(board, from, piece.player, rights, moves);
            }
            _ => self.generate_stepping_moves(board, from, piece, moves),
        }
    }

    /// Leapers and sliders share one ray-cast, differing only in reach.
    fn generate_stepping_moves(
        &self,
        board: &Board,
        from: BoardPosition,
        piece: Piece,
        moves: &mut Vec<ChessMove>,
    ) {
        let Some((directions, range)) = movement(piece.kind) else {
            return;
        };
        let mut targets = Vec::with_capacity(28);
        ray_cast(board, from, piece.player, directions, range, &mut targets);
        moves.extend(targets.into_iter().map(|to| ChessMove::new(from, to)));
    }

    fn generate_pawn_moves(
        &self,
        board: &Board,
        from: BoardPosition,
        player: Player,
        en_passant: Option<BoardPosition>,
        moves: &mut Vec<ChessMove>,
    ) {
        let dir = pawn_direction(player);

        // Pushes
        let one = from.translate(dir, 0);
        if matches!(board.piece_at(one), Ok(None)) {
            self.push_pawn_move(from, one, player, moves);

            let two = one.translate(dir, 0);
            if from.row == pawn_start_row(player) && matches!(board.piece_at(two), Ok(None)) {
                moves.push(ChessMove::new(from, two));
            }
        }

        // Diagonal captures onto enemy pieces only
        for dc in [-1, 1] {
            let to = from.translate(dir, dc);
            if let Ok(Some(target)) = board.piece_at(to) {
                if target.player != player {
                    self.push_pawn_move(from, to, player, moves);
                }
            }
        }

        // En passant against the pawn that just advanced two squares beside us
        if let Some(passed) = en_passant {
            if passed.row == from.row && (passed.col - from.col).abs() == 1 {
                if let Ok(Some(target)) = board.piece_at(passed) {
                    if target.player != player && target.kind == PieceKind::Pawn {
                        moves.push(ChessMove::with_kind(
                            from,
                            passed.translate(dir, 0),
                            MoveKind::EnPassant,
                        ));
                    }
                }
            }
        }
    }

    fn push_pawn_move(
        &self,
        from: BoardPosition,
        to: BoardPosition,
        player: Player,
        moves: &mut Vec<ChessMove>,
    ) {
        if to.row == promotion_row(player) {
            moves.extend(
                PromotionKind::ALL
                    .into_iter()
                    .map(|chosen| ChessMove::promotion(from, to, chosen)),
            );
        } else {
            moves.push(ChessMove::new(from, to));
        }
    }

    /// Castling needs an unmoved king and rook, empty squares between them, and
    /// a king that is not in check and does not cross an attacked square. The
    /// landing square is covered by the check-safety filter.
    fn generate_castles(
        &self,
        board: &Board,
        from: BoardPosition,
        player: Player,
        rights: &CastlingRights,
        moves: &mut Vec<ChessMove>,
    ) {
        let row = home_row(player);
        if from != BoardPosition::new(row, KING_COL) {
            return;
        }
        let side = rights.side(player);
        if !side.can_castle_king_side() && !side.can_castle_queen_side() {
            return;
        }

        let threats = threat_map(board, player.opposite());
        if threats & bit(from) != 0 {
            return;
        }

        let castle_ready = |rook_col: i8, rook_kind: PieceKind, between: &[i8], crossed: i8| {
            let rook_home = board.piece_at(BoardPosition::new(row, rook_col));
            matches!(rook_home, Ok(Some(rook)) if rook == Piece::new(rook_kind, player))
                && between
                    .iter()
                    .all(|&col| matches!(board.piece_at(BoardPosition::new(row, col)), Ok(None)))
                && threats & bit(BoardPosition::new(row, crossed)) == 0
        };

        if side.can_castle_king_side()
            && castle_ready(KING_ROOK_COL, PieceKind::RookKingSide, &[5, 6], KING_COL + 1)
        {
            moves.push(ChessMove::with_kind(
                from,
                BoardPosition::new(row, KING_COL + 2),
                MoveKind::CastleKingSide,
            ));
        }
        if side.can_castle_queen_side()
            && castle_ready(QUEEN_ROOK_COL, PieceKind::RookQueenSide, &[1, 2, 3], KING_COL - 1)
        {
            moves.push(ChessMove::with_kind(
                from,
                BoardPosition::new(row, KING_COL - 2),
                MoveKind::CastleQueenSide,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::config::MaterialConfig;

    fn pos(row: i8, col: i8) -> BoardPosition {
        BoardPosition::new(row, col)
    }

    fn board_with(pieces: &[(i8, i8, PieceKind, Player)]) -> Board {
        let mut board = Board::empty(MaterialConfig::default());
        for &(row, col, kind, player) in pieces {
            board.place(pos(row, col), Piece::new(kind, player)).unwrap();
        }
        board
    }

    fn moves_from(moves: &[ChessMove], from: BoardPosition) -> Vec<ChessMove> {
        moves.iter().copied().filter(|mv| mv.start == from).collect()
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let board = Board::new();
        let moves =
            MoveGenerator::new().generate_moves(&board, Player::One, &CastlingRights::default(), None);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn initial_pawn_has_single_and_double_push_only() {
        let board = Board::new();
        let moves =
            MoveGenerator::new().generate_moves(&board, Player::One, &CastlingRights::default(), None);
        let pawn = moves_from(&moves, pos(6, 6));
        assert_eq!(pawn.len(), 2);
        assert!(pawn.contains(&ChessMove::new(pos(6, 6), pos(5, 6))));
        assert!(pawn.contains(&ChessMove::new(pos(6, 6), pos(4, 6))));
    }

    #[test]
    fn blocked_pawn_cannot_double_step() {
        let board = board_with(&[
            (6, 3, PieceKind::Pawn, Player::One),
            (4, 3, PieceKind::Knight, Player::Two),
        ]);
        let moves =
            MoveGenerator::new().generate_moves(&board, Player::One, &CastlingRights::default(), None);
        assert_eq!(moves, vec![ChessMove::new(pos(6, 3), pos(5, 3))]);
    }

    #[test]
    fn promotion_offers_four_kinds_per_square() {
        let board = board_with(&[
            (1, 1, PieceKind::Pawn, Player::One),
            (0, 2, PieceKind::Knight, Player::Two),
        ]);
        let moves =
            MoveGenerator::new().generate_moves(&board, Player::One, &CastlingRights::default(), None);
        // Straight push and capture onto c8, four kinds each
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|mv| mv.chosen_kind().is_some()));
        assert!(moves.contains(&ChessMove::promotion(pos(1, 1), pos(0, 2), PromotionKind::Knight)));
    }

    #[test]
    fn en_passant_only_against_the_passed_pawn() {
        let board = board_with(&[
            (3, 4, PieceKind::Pawn, Player::One),
            (3, 3, PieceKind::Pawn, Player::Two),
            (3, 5, PieceKind::Pawn, Player::Two),
        ]);
        let generator = MoveGenerator::new();
        let rights = CastlingRights::default();

        let with_target = generator.generate_moves(&board, Player::One, &rights, Some(pos(3, 3)));
        let ep: Vec<_> = with_target
            .iter()
            .filter(|mv| mv.kind == MoveKind::EnPassant)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].end, pos(2, 3));

        let without = generator.generate_moves(&board, Player::One, &rights, None);
        assert!(without.iter().all(|mv| mv.kind != MoveKind::EnPassant));
    }

    #[test]
    fn castling_requires_clear_and_safe_path() {
        let base = [
            (7, 4, PieceKind::King, Player::One),
            (7, 0, PieceKind::RookQueenSide, Player::One),
            (7, 7, PieceKind::RookKingSide, Player::One),
            (0, 4, PieceKind::King, Player::Two),
        ];
        let generator = MoveGenerator::new();
        let rights = CastlingRights::default();

        let board = board_with(&base);
        let moves = generator.generate_moves(&board, Player::One, &rights, None);
        assert!(moves.iter().any(|mv| mv.kind == MoveKind::CastleKingSide));
        assert!(moves.iter().any(|mv| mv.kind == MoveKind::CastleQueenSide));

        // An enemy rook on the f-file covers f1, which the king would cross
        let mut attacked = base.to_vec();
        attacked.push((0, 5, PieceKind::RookPromoted, Player::Two));
        let board = board_with(&attacked);
        let moves = generator.generate_moves(&board, Player::One, &rights, None);
        assert!(moves.iter().all(|mv| mv.kind != MoveKind::CastleKingSide));
        assert!(moves.iter().any(|mv| mv.kind == MoveKind::CastleQueenSide));

        // A knight between king and queen-side rook blocks that side only
        let mut blocked = base.to_vec();
        blocked.push((7, 1, PieceKind::Knight, Player::One));
        let board = board_with(&blocked);
        let moves = generator.generate_moves(&board, Player::One, &rights, None);
        assert!(moves.iter().any(|mv| mv.kind == MoveKind::CastleKingSide));
        assert!(moves.iter().all(|mv| mv.kind != MoveKind::CastleQueenSide));
    }

    #[test]
    fn no_castling_out_of_check() {
        let board = board_with(&[
            (7, 4, PieceKind::King, Player::One),
            (7, 7, PieceKind::RookKingSide, Player::One),
            (0, 4, PieceKind::RookPromoted, Player::Two),
        ]);
        let moves =
            MoveGenerator::new().generate_moves(&board, Player::One, &CastlingRights::default(), None);
        assert!(moves.iter().all(|mv| mv.kind != MoveKind::CastleKingSide));
    }

    #[test]
    fn moved_rook_disables_only_its_side() {
        let board = board_with(&[
            (7, 4, PieceKind::King, Player::One),
            (7, 0, PieceKind::RookQueenSide, Player::One),
            (7, 7, PieceKind::RookKingSide, Player::One),
        ]);
        let mut rights = CastlingRights::default();
        rights.touch(Piece::new(PieceKind::RookKingSide, Player::One));

        let moves = MoveGenerator::new().generate_moves(&board, Player::One, &rights, None);
        assert!(moves.iter().all(|mv| mv.kind != MoveKind::CastleKingSide));
        assert!(moves.iter().any(|mv| mv.kind == MoveKind::CastleQueenSide));
    }

    #[test]
    fn king_may_not_step_into_attack() {
        let board = board_with(&[
            (7, 4, PieceKind::King, Player::One),
            (0, 3, PieceKind::RookPromoted, Player::Two),
            (0, 5, PieceKind::RookPromoted, Player::Two),
        ]);
        let moves =
            MoveGenerator::new().generate_moves(&board, Player::One, &CastlingRights::default(), None);
        // d- and f-files are covered, only e2 remains (e1 itself is safe)
        assert_eq!(moves, vec![ChessMove::new(pos(7, 4), pos(6, 4))]);
    }

    #[test]
    fn has_legal_moves_agrees_with_generation() {
        let generator = MoveGenerator::new();
        let rights = CastlingRights::default();
        assert!(generator.has_legal_moves(&Board::new(), Player::One, &rights, None));

        // Back-rank mate: no legal move
        let mated = board_with(&[
            (7, 7, PieceKind::King, Player::One),
            (6, 6, PieceKind::Pawn, Player::One),
            (6, 7, PieceKind::Pawn, Player::One),
            (7, 0, PieceKind::RookPromoted, Player::Two),
        ]);
        assert!(!generator.has_legal_moves(&mated, Player::One, &rights, None));
        assert!(generator.generate_moves(&mated, Player::One, &rights, None).is_empty());
    }
}
