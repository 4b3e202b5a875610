//! Rule engines for two-player board games behind one `GameBoard` contract:
//! chess and Othello on a fixed 8x8 grid.

pub mod chess;
pub mod logic;
pub mod othello;

pub use chess::game::{ChessGame, GameStatus};
pub use chess::moves::{ChessMove, MoveKind};
pub use logic::error::GameError;
pub use logic::game::GameBoard;
pub use logic::position::{BoardPosition, Player};
pub use othello::game::OthelloGame;
pub use othello::moves::{FlipSet, OthelloMove};
