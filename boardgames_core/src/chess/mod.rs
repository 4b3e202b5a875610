pub mod board;
pub mod config;
pub mod game;
pub mod generator;
pub mod moves;
pub mod piece;
pub mod rules;
