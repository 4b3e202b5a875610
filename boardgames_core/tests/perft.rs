//! Perft: leaf-node counts for well-known positions. A wrong count at any
//! depth points at move generation, apply/undo, or the check filter.
//!
//! Reference: <https://www.chessprogramming.org/Perft_Results>

use boardgames_core::chess::piece::{Piece, PieceKind};
use boardgames_core::{BoardPosition, ChessGame, GameBoard, Player};

/// Counts leaves at `depth`, walking the tree with apply/undo on one game.
fn perft(game: &mut ChessGame, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.possible_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        game.apply_move(&mv).unwrap();
        nodes += perft(game, depth - 1);
        game.undo_last_move().unwrap();
    }
    nodes
}

/// Reads the placement field of a FEN string; player one (white) moves
/// first. Rooks on the a and h files count as unmoved corner rooks.
fn from_fen(fen: &str) -> ChessGame {
    let placement = fen.split_whitespace().next().unwrap();
    let mut pieces = Vec::new();
    for (row, rank) in placement.split('/').enumerate() {
        let mut col = 0i8;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as i8;
                continue;
            }
            let player = if c.is_ascii_uppercase() {
                Player::One
            } else {
                Player::Two
            };
            let kind = match c.to_ascii_lowercase() {
                'p' => PieceKind::Pawn,
                'n' => PieceKind::Knight,
                'b' => PieceKind::Bishop,
                'q' => PieceKind::Queen,
                'k' => PieceKind::King,
                'r' if col == 0 => PieceKind::RookQueenSide,
                'r' if col == 7 => PieceKind::RookKingSide,
                'r' => PieceKind::RookPromoted,
                other => panic!("unexpected FEN piece {other}"),
            };
            pieces.push((
                BoardPosition::new(row as i8, col),
                Piece::new(kind, player),
            ));
            col += 1;
        }
    }
    ChessGame::with_pieces(pieces).unwrap()
}

// =====================================================================
// Position 1 — Starting position
// =====================================================================

#[test]
fn perft_start_depth_1() {
    assert_eq!(perft(&mut ChessGame::new(), 1), 20);
}

#[test]
fn perft_start_depth_2() {
    assert_eq!(perft(&mut ChessGame::new(), 2), 400);
}

#[test]
fn perft_start_depth_3() {
    let mut game = ChessGame::new();
    assert_eq!(perft(&mut game, 3), 8_902);
    // The walk must leave the game exactly where it started
    assert_eq!(game, ChessGame::new());
}

#[test]
fn fen_start_matches_constructor() {
    let game = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(game.board(), ChessGame::new().board());
}

// =====================================================================
// Position 2 — "Kiwipete" (castling, en passant, pins, promotions)
// =====================================================================

fn kiwipete() -> ChessGame {
    from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
}

#[test]
fn perft_kiwipete_depth_1() {
    assert_eq!(perft(&mut kiwipete(), 1), 48);
}

#[test]
fn perft_kiwipete_depth_2() {
    assert_eq!(perft(&mut kiwipete(), 2), 2_039);
}

// =====================================================================
// Position 3 — endgame with en passant pins along the rank
// =====================================================================

fn position_3() -> ChessGame {
    from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")
}

#[test]
fn perft_position_3_depth_1() {
    assert_eq!(perft(&mut position_3(), 1), 14);
}

#[test]
fn perft_position_3_depth_2() {
    assert_eq!(perft(&mut position_3(), 2), 191);
}

#[test]
fn perft_position_3_depth_3() {
    assert_eq!(perft(&mut position_3(), 3), 2_812);
}
