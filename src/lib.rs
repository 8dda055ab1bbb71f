//! Agatha - American checkers engine
//!
//! A checkers rules engine and search core written in Rust with support for:
//! - Full American checkers rules (mandatory captures, multi-jumps, kings)
//! - Promotion ending a capture chain
//! - Heuristic evaluation (material, position, mobility)
//! - Minimax search with alpha-beta pruning and move ordering
//! - Iterative deepening under a time budget

pub mod types;
pub mod error;
pub mod board;
pub mod move_generator;
pub mod evaluation;
pub mod search;
pub mod config;
pub mod game;

pub use board::{Board, Move, MoveRecord};
pub use error::{CheckersError, CheckersResult};
pub use types::{Piece, Player, Position, Rank};
