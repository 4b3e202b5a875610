pub mod error;
pub mod game;
pub mod position;
