//! Agatha - Board Representation Module
//!
//! This module provides the core data structures for representing a checkers
//! board and moves: initial setup, piece access, piece relocation with
//! promotion, material counts and integrity validation.

use std::fmt;

use crate::error::{CheckersError, CheckersResult};
use crate::types::*;

/// Represents a checkers move, possibly a multi-jump
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Squares of the pieces jumped, in chain order
    pub captures: Vec<Position>,
    pub is_promotion: bool,
}

impl Move {
    /// Create a simple (non-capturing) move
    pub fn step(from: Position, to: Position, is_promotion: bool) -> Self {
        Move {
            from,
            to,
            captures: Vec::new(),
            is_promotion,
        }
    }

    /// Create a capturing move
    pub fn jump(from: Position, to: Position, captures: Vec<Position>, is_promotion: bool) -> Self {
        Move {
            from,
            to,
            captures,
            is_promotion,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_move(self.from, self.to, self.is_capture()))
    }
}

/// One entry of a game's move history. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub ply: u32,
    pub player: Player,
    pub from: Position,
    pub to: Position,
    pub captured: bool,
    pub promoted: bool,
}

/// Checkers board representation
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// 8x8 grid indexed `[row][col]`, row 0 at the top
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Create a board with the starting position
    pub fn new() -> Self {
        let mut board = Board::empty();

        for row in 0..BOARD_SIZE {
            let owner = match row {
                0..=2 => Player::Agatha,
                5..=7 => Player::Human,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if pos.is_playable() {
                    board.squares[row as usize][col as usize] = Some(Piece::man(owner, pos));
                }
            }
        }

        board
    }

    /// Create a board with no pieces
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Piece at `pos`; `None` for an empty or off-board square
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.row as usize][pos.col as usize].as_ref()
    }

    /// Like [`Board::piece_at`], but an off-board coordinate is an error
    pub fn square(&self, pos: Position) -> CheckersResult<Option<&Piece>> {
        if !pos.is_valid() {
            return Err(out_of_bounds(pos));
        }
        Ok(self.squares[pos.row as usize][pos.col as usize].as_ref())
    }

    /// Place a piece, rewriting its stored position to `pos`
    pub fn set_piece(&mut self, pos: Position, piece: Piece) -> CheckersResult<()> {
        if !pos.is_valid() {
            return Err(out_of_bounds(pos));
        }
        self.squares[pos.row as usize][pos.col as usize] = Some(Piece { position: pos, ..piece });
        Ok(())
    }

    /// Remove and return whatever stands on `pos`
    pub fn remove_piece(&mut self, pos: Position) -> CheckersResult<Option<Piece>> {
        if !pos.is_valid() {
            return Err(out_of_bounds(pos));
        }
        Ok(self.squares[pos.row as usize][pos.col as usize].take())
    }

    /// Relocate the piece on `from` to `to`, crowning a man that lands on the
    /// opponent's back rank. Returns whether a promotion happened.
    pub fn move_piece(&mut self, from: Position, to: Position) -> CheckersResult<bool> {
        if !to.is_valid() {
            return Err(out_of_bounds(to));
        }
        let mut piece = self.remove_piece(from)?.ok_or(CheckersError::EmptySquare(from))?;

        let promoted = piece.rank == Rank::Man && to.row == piece.player.promotion_row();
        if promoted {
            piece.rank = Rank::King;
        }

        self.set_piece(to, piece)?;
        Ok(promoted)
    }

    /// Iterate over every piece on the board, top row first
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten().flatten()
    }

    /// Iterate over the pieces belonging to `player`
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = &Piece> + '_ {
        self.all_pieces().filter(move |p| p.player == player)
    }

    /// Number of pieces (men and kings) `player` has left
    pub fn count_pieces(&self, player: Player) -> usize {
        self.pieces(player).count()
    }

    /// Number of kings `player` has
    pub fn count_kings(&self, player: Player) -> usize {
        self.pieces(player).filter(|p| p.is_king()).count()
    }

    /// Check the board's structural invariants.
    ///
    /// The grid type fixes the dimensions; this verifies that light squares
    /// are empty and that every piece knows its own square.
    pub fn validate(&self) -> CheckersResult<()> {
        for (row, cells) in self.squares.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(piece) = cell else { continue };
                let cell_pos = Position::new(row as i8, col as i8);
                if !cell_pos.is_playable() {
                    return Err(CheckersError::LightSquareOccupied(cell_pos));
                }
                if piece.position != cell_pos {
                    return Err(CheckersError::PositionMismatch {
                        cell: cell_pos,
                        stored: piece.position,
                    });
                }
            }
        }
        Ok(())
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for (row, cells) in self.squares.iter().enumerate() {
            let mut line = format!("{} |", RANK_NAMES[7 - row] as char);
            for cell in cells {
                match cell {
                    Some(piece) => line.push_str(&format!(" {} |", piece.symbol())),
                    None => line.push_str("   |"),
                }
            }
            lines.push(line);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

fn out_of_bounds(pos: Position) -> CheckersError {
    CheckersError::OutOfBounds {
        row: pos.row,
        col: pos.col,
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}", self.display())
    }
}
