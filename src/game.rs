//! Agatha - Game record
//!
//! The authoritative board for a game in progress: whose turn it is and the
//! append-only move history.

use tracing::warn;

use crate::board::{Board, Move, MoveRecord};
use crate::error::{CheckersError, CheckersResult};
use crate::evaluation::{evaluate_end_game, WIN_SCORE};
use crate::move_generator::MoveGenerator;
use crate::types::Player;

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<MoveRecord>,
    move_generator: MoveGenerator,
}

impl Game {
    /// A new game from the starting position, Human to move
    pub fn new() -> Self {
        Game::from_position(Board::new(), Player::Human)
    }

    /// Continue from an arbitrary position
    pub fn from_position(board: Board, to_move: Player) -> Self {
        Game {
            board,
            to_move,
            history: Vec::new(),
            move_generator: MoveGenerator::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        self.move_generator.all_valid_moves(&self.board, self.to_move)
    }

    /// Play a move for the side to move and record it
    pub fn play(&mut self, mv: &Move) -> CheckersResult<&MoveRecord> {
        if !self.legal_moves().contains(mv) {
            warn!(player = %self.to_move, "rejected illegal move {}", mv);
            return Err(CheckersError::IllegalMove(mv.to_string()));
        }

        let was_king = self.board.piece_at(mv.from).is_some_and(|p| p.is_king());
        self.move_generator.execute_move(&mut self.board, mv)?;
        let promoted = !was_king && self.board.piece_at(mv.to).is_some_and(|p| p.is_king());

        self.history.push(MoveRecord {
            ply: self.history.len() as u32 + 1,
            player: self.to_move,
            from: mv.from,
            to: mv.to,
            captured: mv.is_capture(),
            promoted,
        });
        self.to_move = self.to_move.opponent();

        Ok(&self.history[self.history.len() - 1])
    }

    /// The winner, once the game is decided
    pub fn winner(&self) -> Option<Player> {
        match evaluate_end_game(&self.board, self.to_move)? {
            WIN_SCORE => Some(Player::Agatha),
            _ => Some(Player::Human),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
