//! Agatha - Search Engine Module
//!
//! This module implements move selection using:
//! - Minimax with alpha-beta pruning (Agatha maximises, Human minimises)
//! - Move ordering (captures, promotions, central destinations first)
//! - Depth-adjusted terminal scores (quicker wins, slower losses)
//! - Iterative deepening under a wall-clock budget
//!
//! Every node works on its own cloned board. The node counter belongs to the
//! engine instance and is reset by each top-level call.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{Board, Move};
use crate::config::EngineConfig;
use crate::error::{CheckersError, CheckersResult};
use crate::evaluation::{evaluate, evaluate_end_game, win_for};
use crate::move_generator::MoveGenerator;
use crate::types::*;

// Constants for search
pub const INFINITY: i32 = 1_000_000;

/// Outcome of a top-level search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score from Agatha's perspective
    pub score: i32,
    pub nodes: u64,
    /// Deepest completed depth
    pub depth: u32,
}

/// A candidate move with its score from the mover's perspective
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Push terminal scores away from zero by the remaining depth, so a win
/// found with more depth left (sooner) scores higher and a loss found
/// sooner scores lower.
#[inline]
fn adjust_for_depth(score: i32, depth: u32) -> i32 {
    if score > 0 {
        score + depth as i32
    } else {
        score - depth as i32
    }
}

/// Sort so alpha-beta sees the likely best moves first: more captures,
/// then promotions, then destinations nearer the centre columns. The sort
/// is stable, so generation order breaks ties.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|m| {
        (
            Reverse(m.captures.len()),
            !m.is_promotion,
            (2 * m.to.col as i32 - (BOARD_SIZE as i32 - 1)).abs(),
        )
    });
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

pub struct SearchEngine {
    move_generator: MoveGenerator,
    config: EngineConfig,
    nodes_searched: u64,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        SearchEngine {
            move_generator: MoveGenerator::new(),
            config,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Nodes visited by the most recent top-level call
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_searched
    }

    /// Agatha's best move at the configured depth
    pub fn best_move(&mut self, board: &Board) -> SearchResult {
        self.best_move_for(board, Player::Agatha, self.config.search_depth)
    }

    /// Agatha's best move at an explicit depth
    pub fn best_move_with_depth(&mut self, board: &Board, depth: u32) -> SearchResult {
        self.best_move_for(board, Player::Agatha, depth)
    }

    /// Best move for either side
    pub fn best_move_for(&mut self, board: &Board, player: Player, depth: u32) -> SearchResult {
        let start = Instant::now();
        self.nodes_searched = 0;

        let result = self.search_root(board, player, depth);
        debug!(
            %player,
            depth = result.depth,
            score = result.score,
            nodes = result.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );
        result
    }

    /// Search increasing even depths until `max_depth` or until `max_time`
    /// has passed. The clock is only checked between iterations, so the
    /// result always comes from a fully searched depth.
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        player: Player,
        max_depth: u32,
        max_time: Duration,
    ) -> SearchResult {
        let start = Instant::now();
        let first_depth = if max_depth >= 2 { 2 } else { max_depth.max(1) };

        self.nodes_searched = 0;
        let mut result = self.search_root(board, player, first_depth);
        let mut total_nodes = result.nodes;
        debug!(depth = first_depth, score = result.score, nodes = result.nodes, "iteration complete");

        for depth in (first_depth + 2..=max_depth).step_by(2) {
            if result.best_move.is_none() || start.elapsed() >= max_time {
                break;
            }

            self.nodes_searched = 0;
            let iteration = self.search_root(board, player, depth);
            total_nodes += iteration.nodes;
            debug!(
                depth,
                score = iteration.score,
                nodes = iteration.nodes,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "iteration complete"
            );
            result = iteration;
        }

        self.nodes_searched = total_nodes;
        result.nodes = total_nodes;
        result
    }

    /// Score a proposed move at the configured evaluation depth
    pub fn evaluate_move(&mut self, board: &Board, mv: &Move) -> CheckersResult<i32> {
        self.evaluate_move_with_depth(board, mv, self.config.evaluation_depth)
    }

    /// Apply `mv`, let the opponent search its reply at `depth - 1`, and
    /// report the score so that positive is good for whoever moved.
    pub fn evaluate_move_with_depth(
        &mut self,
        board: &Board,
        mv: &Move,
        depth: u32,
    ) -> CheckersResult<i32> {
        let mover = board
            .piece_at(mv.from)
            .map(|p| p.player)
            .ok_or(CheckersError::EmptySquare(mv.from))?;
        let child = self.move_generator.simulate_move(board, mv)?;

        self.nodes_searched = 0;
        let score = self.minimax(
            &child,
            depth.saturating_sub(1),
            -INFINITY,
            INFINITY,
            mover.opponent(),
        );

        Ok(perspective(score, mover))
    }

    /// Up to `count` legal moves for `player`, best first, scored from
    /// `player`'s perspective at the configured evaluation depth
    pub fn top_moves(&mut self, board: &Board, player: Player, count: usize) -> Vec<ScoredMove> {
        let mut moves = self.move_generator.all_valid_moves(board, player);
        self.order(&mut moves);

        self.nodes_searched = 0;
        let depth = self.config.evaluation_depth.saturating_sub(1);
        let mut scored = Vec::with_capacity(moves.len());

        for mv in moves {
            let Ok(child) = self.move_generator.simulate_move(board, &mv) else {
                continue;
            };
            let score = self.minimax(&child, depth, -INFINITY, INFINITY, player.opponent());
            scored.push(ScoredMove {
                mv,
                score: perspective(score, player),
            });
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(count);
        scored
    }

    /// Agatha's expected reply once `human_move` has been played
    pub fn predicted_response(&mut self, board: &Board, human_move: &Move) -> Option<Move> {
        let child = self.move_generator.simulate_move(board, human_move).ok()?;
        let depth = self.config.evaluation_depth;
        self.best_move_for(&child, Player::Agatha, depth).best_move
    }

    fn order(&self, moves: &mut [Move]) {
        if self.config.use_move_ordering {
            order_moves(moves);
        }
    }

    /// Root of a search; does not reset the node counter
    fn search_root(&mut self, board: &Board, player: Player, depth: u32) -> SearchResult {
        let depth = depth.max(1);
        self.nodes_searched += 1;

        // No move is offered once the game is decided
        if let Some(terminal) = evaluate_end_game(board, player) {
            return SearchResult {
                best_move: None,
                score: adjust_for_depth(terminal, depth),
                nodes: self.nodes_searched,
                depth,
            };
        }

        let mut moves = self.move_generator.all_valid_moves(board, player);
        self.order(&mut moves);

        let maximizing = player == Player::Agatha;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let Ok(child) = self.move_generator.simulate_move(board, &mv) else {
                continue;
            };
            let score = self.minimax(&child, depth - 1, alpha, beta, player.opponent());

            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }

            if self.config.use_alpha_beta {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes_searched,
            depth,
        }
    }

    fn minimax(&mut self, board: &Board, depth: u32, mut alpha: i32, mut beta: i32, side: Player) -> i32 {
        self.nodes_searched += 1;

        // A decided game ends the line before the depth budget does
        if let Some(terminal) = evaluate_end_game(board, side) {
            return adjust_for_depth(terminal, depth);
        }

        if depth == 0 {
            return evaluate(board, &self.config.weights);
        }

        let mut moves = self.move_generator.all_valid_moves(board, side);
        if moves.is_empty() {
            return adjust_for_depth(win_for(side.opponent()), depth);
        }
        self.order(&mut moves);

        let maximizing = side == Player::Agatha;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in &moves {
            let Ok(child) = self.move_generator.simulate_move(board, mv) else {
                continue;
            };
            let score = self.minimax(&child, depth - 1, alpha, beta, side.opponent());

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.config.use_alpha_beta && beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Re-express an Agatha-perspective score for `player`
#[inline]
fn perspective(score: i32, player: Player) -> i32 {
    match player {
        Player::Agatha => score,
        Player::Human => -score,
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::WIN_SCORE;

    fn place(board: &mut Board, piece: Piece) {
        board.set_piece(piece.position, piece).unwrap();
    }

    fn engine_with(alpha_beta: bool, ordering: bool) -> SearchEngine {
        SearchEngine::new(EngineConfig {
            use_alpha_beta: alpha_beta,
            use_move_ordering: ordering,
            ..EngineConfig::default()
        })
    }

    fn midgame() -> Board {
        let gen = MoveGenerator::new();
        let mut board = Board::new();
        let mut side = Player::Human;
        // Deterministic opening: always the first generated move
        for _ in 0..6 {
            let mv = gen.all_valid_moves(&board, side)[0].clone();
            gen.execute_move(&mut board, &mv).unwrap();
            side = side.opponent();
        }
        board
    }

    #[test]
    fn ordering_puts_longer_captures_and_promotions_first() {
        let from = Position::new(4, 3);
        let mut moves = vec![
            Move::step(from, Position::new(5, 0), false),
            Move::step(from, Position::new(5, 4), false),
            Move::step(from, Position::new(7, 2), true),
            Move::jump(from, Position::new(6, 1), vec![Position::new(5, 2)], false),
            Move::jump(
                from,
                Position::new(4, 7),
                vec![Position::new(5, 4), Position::new(5, 6)],
                false,
            ),
        ];
        order_moves(&mut moves);
        assert_eq!(moves[0].captures.len(), 2);
        assert_eq!(moves[1].captures.len(), 1);
        assert!(moves[2].is_promotion);
        assert_eq!(moves[3].to, Position::new(5, 4));
        assert_eq!(moves[4].to, Position::new(5, 0));
    }

    #[test]
    fn takes_the_last_piece_and_scores_a_quick_win() {
        let mut board = Board::empty();
        place(&mut board, Piece::king(Player::Agatha, Position::new(3, 2)));
        place(&mut board, Piece::man(Player::Human, Position::new(4, 3)));

        let mut engine = SearchEngine::default();
        let result = engine.best_move_with_depth(&board, 4);
        let mv = result.best_move.unwrap();
        assert_eq!(mv.captures, vec![Position::new(4, 3)]);
        assert_eq!(result.score, WIN_SCORE + 3);
        assert_eq!(result.depth, 4);
    }

    #[test]
    fn no_legal_moves_means_no_move() {
        let mut board = Board::empty();
        place(&mut board, Piece::man(Player::Human, Position::new(4, 3)));
        let mut engine = SearchEngine::default();
        let result = engine.best_move_with_depth(&board, 3);
        assert_eq!(result.best_move, None);
        assert!(result.score < -WIN_SCORE + 1);
    }

    #[test]
    fn decided_game_offers_no_move() {
        let mut board = Board::empty();
        place(&mut board, Piece::king(Player::Agatha, Position::new(3, 2)));

        let mut engine = SearchEngine::default();
        let result = engine.best_move_with_depth(&board, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, WIN_SCORE + 3);

        let result = engine.iterative_deepening(&board, Player::Agatha, 6, Duration::from_secs(5));
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn pruning_never_changes_the_value() {
        for board in [Board::new(), midgame()] {
            for player in [Player::Agatha, Player::Human] {
                let mut full = engine_with(false, true);
                let mut pruned = engine_with(true, true);
                let a = full.best_move_for(&board, player, 4);
                let b = pruned.best_move_for(&board, player, 4);
                assert_eq!(a.score, b.score);
                assert_eq!(a.best_move, b.best_move);
                assert!(b.nodes <= a.nodes);
            }
        }
    }

    #[test]
    fn ordering_never_changes_the_value() {
        let board = midgame();
        let mut plain = engine_with(true, false);
        let mut ordered = engine_with(true, true);
        let a = plain.best_move_for(&board, Player::Agatha, 4);
        let b = ordered.best_move_for(&board, Player::Agatha, 4);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn node_counter_resets_between_searches() {
        let board = Board::new();
        let mut engine = SearchEngine::default();
        let first = engine.best_move_with_depth(&board, 3).nodes;
        let second = engine.best_move_with_depth(&board, 3).nodes;
        assert!(first > 0);
        assert_eq!(first, second);
        assert_eq!(engine.nodes_evaluated(), second);
    }

    #[test]
    fn top_moves_are_sorted_and_bounded() {
        let board = Board::new();
        let mut engine = SearchEngine::default();
        let top = engine.top_moves(&board, Player::Human, 3);
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));

        let all = engine.top_moves(&board, Player::Human, 50);
        assert_eq!(all.len(), 7);

        let mut lonely = Board::empty();
        place(&mut lonely, Piece::man(Player::Agatha, Position::new(3, 2)));
        assert!(engine.top_moves(&lonely, Player::Human, 3).is_empty());
    }

    #[test]
    fn evaluate_move_is_from_the_movers_side() {
        let mut board = Board::empty();
        place(&mut board, Piece::man(Player::Human, Position::new(5, 2)));
        place(&mut board, Piece::man(Player::Agatha, Position::new(4, 3)));

        let gen = MoveGenerator::new();
        let winning = gen.all_valid_moves(&board, Player::Human)[0].clone();
        let mut engine = SearchEngine::default();
        let score = engine.evaluate_move_with_depth(&board, &winning, 3).unwrap();
        assert_eq!(score, WIN_SCORE + 2);

        let bogus = Move::step(Position::new(0, 1), Position::new(1, 2), false);
        assert!(engine.evaluate_move(&board, &bogus).is_err());
    }

    #[test]
    fn predicted_response_is_legal_after_the_human_move() {
        let board = Board::new();
        let gen = MoveGenerator::new();
        let human = gen.all_valid_moves(&board, Player::Human)[0].clone();
        let mut engine = SearchEngine::default();

        let reply = engine.predicted_response(&board, &human).unwrap();
        let after = gen.simulate_move(&board, &human).unwrap();
        assert!(gen.all_valid_moves(&after, Player::Agatha).contains(&reply));
    }

    #[test]
    fn iterative_deepening_respects_budget() {
        let board = Board::new();
        let mut engine = SearchEngine::default();

        let quick = engine.iterative_deepening(&board, Player::Agatha, 8, Duration::ZERO);
        assert_eq!(quick.depth, 2);
        assert!(quick.best_move.is_some());

        let full = engine.iterative_deepening(&board, Player::Agatha, 4, Duration::from_secs(600));
        assert_eq!(full.depth, 4);
        let direct = engine.best_move_with_depth(&board, 4);
        assert_eq!(full.score, direct.score);
        assert_eq!(full.best_move, direct.best_move);
    }
}
