//! Agatha - Move Generator Module
//!
//! This module is the single source of truth for legality: simple moves,
//! captures, multi-jump chains (a crowning jump ends the chain), the
//! mandatory-capture rule, and checked move execution.

use tracing::trace;

use crate::board::{Board, Move};
use crate::error::{CheckersError, CheckersResult};
use crate::types::*;

/// Diagonal directions as (row delta, col delta)
const KING_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const AGATHA_MAN_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const HUMAN_MAN_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

/// Move generator for checkers positions
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    /// Create a new move generator
    pub fn new() -> Self {
        MoveGenerator
    }

    /// Directions a piece may move or capture in
    fn directions(piece: &Piece) -> &'static [(i8, i8)] {
        match (piece.rank, piece.player) {
            (Rank::King, _) => &KING_DIRECTIONS,
            (Rank::Man, Player::Agatha) => &AGATHA_MAN_DIRECTIONS,
            (Rank::Man, Player::Human) => &HUMAN_MAN_DIRECTIONS,
        }
    }

    fn crowns_on(piece: &Piece, to: Position) -> bool {
        piece.rank == Rank::Man && to.row == piece.player.promotion_row()
    }

    /// One-step diagonal moves onto empty squares
    pub fn simple_moves(&self, board: &Board, piece: &Piece) -> Vec<Move> {
        let from = piece.position;
        Self::directions(piece)
            .iter()
            .map(|&(dr, dc)| from.offset(dr, dc, 1))
            .filter(|to| to.is_valid() && board.piece_at(*to).is_none())
            .map(|to| Move::step(from, to, Self::crowns_on(piece, to)))
            .collect()
    }

    /// Single jumps available to `piece`, as (jumped square, landing square)
    fn single_captures(&self, board: &Board, piece: &Piece) -> Vec<(Position, Position)> {
        let from = piece.position;
        let mut jumps = Vec::new();

        for &(dr, dc) in Self::directions(piece) {
            let over = from.offset(dr, dc, 1);
            let landing = from.offset(dr, dc, 2);
            if !landing.is_valid() || board.piece_at(landing).is_some() {
                continue;
            }
            if let Some(victim) = board.piece_at(over) {
                if victim.player != piece.player {
                    jumps.push((over, landing));
                }
            }
        }

        jumps
    }

    /// Every complete capture sequence `piece` can make
    pub fn capture_moves(&self, board: &Board, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut captured = Vec::new();
        self.collect_jumps(board, piece.position, piece.position, &mut captured, &mut moves);
        moves
    }

    /// Extend the chain that started at `origin` and now stands on `at`.
    ///
    /// Each hop is played on its own clone. A man crowned by a hop ends the
    /// chain there even if the new king could keep jumping.
    fn collect_jumps(
        &self,
        board: &Board,
        at: Position,
        origin: Position,
        captured: &mut Vec<Position>,
        moves: &mut Vec<Move>,
    ) {
        let Some(piece) = board.piece_at(at).copied() else {
            return;
        };
        let mut extended = false;

        for (jumped, landing) in self.single_captures(board, &piece) {
            if captured.contains(&jumped) {
                continue;
            }

            let mut next = board.clone();
            let Ok(Some(_)) = next.remove_piece(jumped) else {
                continue;
            };
            let Ok(promoted) = next.move_piece(at, landing) else {
                continue;
            };

            extended = true;
            captured.push(jumped);
            if promoted {
                moves.push(Move::jump(origin, landing, captured.clone(), true));
            } else {
                self.collect_jumps(&next, landing, origin, captured, moves);
            }
            captured.pop();
        }

        if !extended && !captured.is_empty() {
            moves.push(Move::jump(origin, at, captured.clone(), false));
        }
    }

    /// True if any piece of `player` has a capture available
    pub fn has_captures(&self, board: &Board, player: Player) -> bool {
        board
            .pieces(player)
            .any(|piece| !self.single_captures(board, piece).is_empty())
    }

    /// Legal moves for the piece on `pos`, honouring mandatory capture for
    /// its whole side. Empty if the square is empty or off the board.
    pub fn valid_moves_for_piece(&self, board: &Board, pos: Position) -> Vec<Move> {
        let Some(piece) = board.piece_at(pos) else {
            return Vec::new();
        };

        if self.has_captures(board, piece.player) {
            self.capture_moves(board, piece)
        } else {
            self.simple_moves(board, piece)
        }
    }

    /// All legal moves for `player`. Captures are mandatory: if any exist,
    /// nothing else is returned.
    pub fn all_valid_moves(&self, board: &Board, player: Player) -> Vec<Move> {
        let captures: Vec<Move> = board
            .pieces(player)
            .flat_map(|piece| self.capture_moves(board, piece))
            .collect();

        if !captures.is_empty() {
            return captures;
        }

        board
            .pieces(player)
            .flat_map(|piece| self.simple_moves(board, piece))
            .collect()
    }

    /// True if `player` can make at least one move
    pub fn has_valid_moves(&self, board: &Board, player: Player) -> bool {
        self.has_captures(board, player)
            || board
                .pieces(player)
                .any(|piece| !self.simple_moves(board, piece).is_empty())
    }

    /// Reject moves whose shape cannot be a real step or jump chain
    fn check_move(&self, board: &Board, mv: &Move) -> CheckersResult<()> {
        let piece = board.square(mv.from)?.ok_or(CheckersError::EmptySquare(mv.from))?;
        board.square(mv.to)?;

        let jumps = mv.captures.len() as i8;
        let dr = mv.to.row - mv.from.row;
        let dc = mv.to.col - mv.from.col;
        let geometry_ok = if jumps == 0 {
            dr.abs() == 1 && dc.abs() == 1
        } else {
            // Each hop moves (+-2, +-2)
            let half_ok = |d: i8| d % 2 == 0 && (d / 2).abs() <= jumps && (d / 2 - jumps) % 2 == 0;
            half_ok(dr) && half_ok(dc)
        };
        if !geometry_ok {
            return Err(CheckersError::IllegalGeometry {
                from: mv.from,
                to: mv.to,
                captures: mv.captures.len(),
            });
        }

        // A king's chain may end on the square it started from
        if mv.to != mv.from && board.piece_at(mv.to).is_some() {
            return Err(CheckersError::DestinationOccupied(mv.to));
        }

        for (i, &pos) in mv.captures.iter().enumerate() {
            if mv.captures[..i].contains(&pos) {
                return Err(CheckersError::RepeatedCapture(pos));
            }
            match board.square(pos)? {
                Some(victim) if victim.player != piece.player => {}
                _ => return Err(CheckersError::InvalidCapture(pos)),
            }
        }

        Ok(())
    }

    /// Apply `mv` to `board`. The board is left untouched if the move is
    /// malformed.
    pub fn execute_move(&self, board: &mut Board, mv: &Move) -> CheckersResult<()> {
        if let Err(err) = self.check_move(board, mv) {
            trace!(%err, "rejected move {}", mv);
            return Err(err);
        }

        // Clear the jumped pieces before relocating the mover
        for &pos in &mv.captures {
            board.remove_piece(pos)?;
        }
        board.move_piece(mv.from, mv.to)?;

        Ok(())
    }

    /// Return a copy of `board` with `mv` applied
    pub fn simulate_move(&self, board: &Board, mv: &Move) -> CheckersResult<Board> {
        let mut next = board.clone();
        self.execute_move(&mut next, mv)?;
        Ok(next)
    }
}
