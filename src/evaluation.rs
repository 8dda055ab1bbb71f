//! Agatha - Position Evaluation Module
//!
//! This module provides static evaluation of checkers positions considering:
//! - Material (men and kings)
//! - Center control, advancement and back-row defense
//! - King edge penalty and protected pieces
//! - Mobility (number of legal moves)
//!
//! Scores are from Agatha's perspective: positive favours Agatha.

use crate::board::Board;
use crate::move_generator::MoveGenerator;
use crate::types::*;

/// Magnitude of a decided game
pub const WIN_SCORE: i32 = 10_000;

/// Bonus for a piece with a friendly piece diagonally behind it
pub const PROTECTED_BONUS: i32 = 3;

/// Coefficients of the evaluation terms
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvaluationWeights {
    pub piece_value: i32,
    pub king_value: i32,
    pub center_control: i32,
    pub advancement: i32,
    pub back_row: i32,
    pub mobility: i32,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        EvaluationWeights {
            piece_value: 100,
            king_value: 160,
            center_control: 4,
            advancement: 3,
            back_row: 6,
            mobility: 2,
        }
    }
}

/// Evaluation split into its terms; `material + positional + mobility == total`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluationBreakdown {
    pub total: i32,
    pub material: i32,
    pub positional: i32,
    pub mobility: i32,
    pub agatha_men: usize,
    pub agatha_kings: usize,
    pub human_men: usize,
    pub human_kings: usize,
}

#[derive(Default)]
struct SideScore {
    material: i32,
    positional: i32,
    mobility: i32,
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Score `player` wins with
#[inline]
pub fn win_for(player: Player) -> i32 {
    match player {
        Player::Agatha => WIN_SCORE,
        Player::Human => -WIN_SCORE,
    }
}

fn is_edge(pos: Position) -> bool {
    pos.row == 0 || pos.row == BOARD_SIZE - 1 || pos.col == 0 || pos.col == BOARD_SIZE - 1
}

fn center_bonus(col: i8, weights: &EvaluationWeights) -> i32 {
    match col {
        3 | 4 => 2 * weights.center_control,
        2 | 5 => weights.center_control,
        _ => 0,
    }
}

fn is_protected(board: &Board, piece: &Piece) -> bool {
    let back = -piece.player.forward();
    [-1, 1].iter().any(|&dc| {
        board
            .piece_at(piece.position.offset(back, dc, 1))
            .is_some_and(|p| p.player == piece.player)
    })
}

/// Positional terms for a single piece
fn positional_value(board: &Board, piece: &Piece, weights: &EvaluationWeights) -> i32 {
    let pos = piece.position;
    let mut score = center_bonus(pos.col, weights);

    match piece.rank {
        Rank::Man => {
            let travelled = (pos.row - piece.player.home_row()).abs() as i32;
            score += weights.advancement * travelled;
            if pos.row == piece.player.home_row() {
                score += weights.back_row;
            }
        }
        Rank::King => {
            if is_edge(pos) {
                score -= weights.center_control / 2;
            }
        }
    }

    if is_protected(board, piece) {
        score += PROTECTED_BONUS;
    }

    score
}

fn score_side(board: &Board, player: Player, weights: &EvaluationWeights) -> SideScore {
    let mut side = SideScore::default();

    for piece in board.pieces(player) {
        side.material += match piece.rank {
            Rank::Man => weights.piece_value,
            Rank::King => weights.king_value,
        };
        side.positional += positional_value(board, piece, weights);
    }

    let moves = MoveGenerator::new().all_valid_moves(board, player).len() as i32;
    side.mobility = weights.mobility * moves;

    side
}

// ============================================================================
// MAIN EVALUATION FUNCTIONS
// ============================================================================

/// Evaluate the position from Agatha's perspective
pub fn evaluate(board: &Board, weights: &EvaluationWeights) -> i32 {
    detailed_evaluation(board, weights).total
}

/// Evaluation with each term reported separately
pub fn detailed_evaluation(board: &Board, weights: &EvaluationWeights) -> EvaluationBreakdown {
    let agatha = score_side(board, Player::Agatha, weights);
    let human = score_side(board, Player::Human, weights);

    let material = agatha.material - human.material;
    let positional = agatha.positional - human.positional;
    let mobility = agatha.mobility - human.mobility;

    let agatha_kings = board.count_kings(Player::Agatha);
    let human_kings = board.count_kings(Player::Human);

    EvaluationBreakdown {
        total: material + positional + mobility,
        material,
        positional,
        mobility,
        agatha_men: board.count_pieces(Player::Agatha) - agatha_kings,
        agatha_kings,
        human_men: board.count_pieces(Player::Human) - human_kings,
        human_kings,
    }
}

/// Score of a decided game, or `None` if play goes on.
///
/// A side with no pieces, or with no legal move on its turn, has lost.
pub fn evaluate_end_game(board: &Board, side_to_move: Player) -> Option<i32> {
    if board.count_pieces(Player::Agatha) == 0 {
        return Some(win_for(Player::Human));
    }
    if board.count_pieces(Player::Human) == 0 {
        return Some(win_for(Player::Agatha));
    }
    if !MoveGenerator::new().has_valid_moves(board, side_to_move) {
        return Some(win_for(side_to_move.opponent()));
    }
    None
}
