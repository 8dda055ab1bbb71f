//! Agatha - Type definitions and constants
//!
//! This module provides the core type definitions and constants for
//! representing checkers pieces, players, squares and square notation.

use std::fmt;
use std::str::FromStr;

use crate::error::CheckersError;

/// Board edge length
pub const BOARD_SIZE: i8 = 8;

/// File names for algebraic notation, left to right
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
/// Rank names for algebraic notation, bottom to top
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// The two sides of the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Starts on rows 5-7, men move toward row 0
    Human,
    /// The engine's side. Starts on rows 0-2, men move toward row 7
    Agatha,
}

impl Player {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Agatha,
            Player::Agatha => Player::Human,
        }
    }

    /// Row delta a man of this player advances by
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Player::Human => -1,
            Player::Agatha => 1,
        }
    }

    /// Row this player's men start from and defend
    #[inline]
    pub fn home_row(self) -> i8 {
        match self {
            Player::Human => BOARD_SIZE - 1,
            Player::Agatha => 0,
        }
    }

    /// Row on which this player's men are crowned
    #[inline]
    pub fn promotion_row(self) -> i8 {
        self.opponent().home_row()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "Human"),
            Player::Agatha => write!(f, "Agatha"),
        }
    }
}

/// Man or king
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

/// A square on the board, 0-indexed from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// True if both coordinates are inside the 8x8 grid
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Dark squares are the only ones pieces may stand on
    #[inline]
    pub fn is_playable(&self) -> bool {
        self.is_valid() && (self.row + self.col) % 2 == 1
    }

    /// Square reached by stepping `steps` times along `(dr, dc)`
    #[inline]
    pub fn offset(&self, dr: i8, dc: i8, steps: i8) -> Position {
        Position::new(self.row + dr * steps, self.col + dc * steps)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match position_to_notation(*self) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// Parses square notation such as `"c3"`
impl FromStr for Position {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        notation_to_position(s).ok_or_else(|| CheckersError::InvalidNotation(s.to_string()))
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub rank: Rank,
    pub position: Position,
}

impl Piece {
    pub fn man(player: Player, position: Position) -> Self {
        Piece { player, rank: Rank::Man, position }
    }

    pub fn king(player: Player, position: Position) -> Self {
        Piece { player, rank: Rank::King, position }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// Character used by the board display
    pub fn symbol(&self) -> char {
        match (self.player, self.rank) {
            (Player::Agatha, Rank::Man) => 'a',
            (Player::Agatha, Rank::King) => 'A',
            (Player::Human, Rank::Man) => 'h',
            (Player::Human, Rank::King) => 'H',
        }
    }
}

/// Convert a position to algebraic notation (e.g., "a3").
/// Row 7 is rank 1 and row 0 is rank 8.
pub fn position_to_notation(pos: Position) -> Option<String> {
    if !pos.is_valid() {
        return None;
    }
    let file = FILE_NAMES[pos.col as usize] as char;
    let rank = RANK_NAMES[(BOARD_SIZE - 1 - pos.row) as usize] as char;
    Some(format!("{}{}", file, rank))
}

/// Convert algebraic notation to a position
pub fn notation_to_position(name: &str) -> Option<Position> {
    let bytes = name.trim().as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let col = match bytes[0].to_ascii_lowercase() {
        c @ b'a'..=b'h' => (c - b'a') as i8,
        _ => return None,
    };

    let row = match bytes[1] {
        r @ b'1'..=b'8' => BOARD_SIZE - 1 - (r - b'1') as i8,
        _ => return None,
    };

    Some(Position::new(row, col))
}

/// Compact map key for a position ("row,col")
pub fn position_to_key(pos: Position) -> String {
    format!("{},{}", pos.row, pos.col)
}

/// Inverse of [`position_to_key`]
pub fn key_to_position(key: &str) -> Option<Position> {
    let (row, col) = key.split_once(',')?;
    let pos = Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?);
    pos.is_valid().then_some(pos)
}

/// Human-readable move text: "a3 -> b4" for a step, "a3 x c5" for a capture
pub fn format_move(from: Position, to: Position, is_capture: bool) -> String {
    let separator = if is_capture { "x" } else { "->" };
    format!("{} {} {}", from, separator, to)
}
