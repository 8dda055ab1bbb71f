//! Agatha - Error types
//!
//! Errors raised by board accessors, move execution, the game record and
//! engine option parsing. Search never fails; a missing move is `None`.

use thiserror::Error;

use crate::types::Position;

/// Errors that can occur in the checkers core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    /// Coordinate outside the 8x8 grid
    #[error("Coordinate ({row}, {col}) is off the board")]
    OutOfBounds { row: i8, col: i8 },

    /// No piece where one was required
    #[error("No piece at {0}")]
    EmptySquare(Position),

    /// Landing square already holds a piece
    #[error("Destination {0} is occupied")]
    DestinationOccupied(Position),

    /// Displacement does not match the number of captures
    #[error("Move {from} -> {to} is not a diagonal path for {captures} capture(s)")]
    IllegalGeometry {
        from: Position,
        to: Position,
        captures: usize,
    },

    /// Captured square is empty or holds a friendly piece
    #[error("No opposing piece to capture at {0}")]
    InvalidCapture(Position),

    /// The same square appears twice in one capture chain
    #[error("Square {0} captured twice in one move")]
    RepeatedCapture(Position),

    /// Board integrity: a piece sits on a light square
    #[error("Piece on non-playable square {0}")]
    LightSquareOccupied(Position),

    /// Board integrity: stored piece position disagrees with its cell
    #[error("Piece in cell {cell} believes it is at {stored}")]
    PositionMismatch { cell: Position, stored: Position },

    /// Move is well-formed but not legal for the side to move
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// Square name could not be parsed
    #[error("Invalid square notation: {0:?}")]
    InvalidNotation(String),

    /// Engine option name or value rejected
    #[error("Invalid option {name}={value}")]
    InvalidOption { name: String, value: String },
}

/// Result type alias for checkers operations
pub type CheckersResult<T> = Result<T, CheckersError>;
