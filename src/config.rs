//! Agatha - Engine configuration
//!
//! Search and evaluation settings, adjustable by name the way an engine
//! option table handles `setoption`: spin values are range-checked, check
//! values parse as booleans.

use crate::error::{CheckersError, CheckersResult};
use crate::evaluation::EvaluationWeights;

/// Default depth for move selection
pub const DEFAULT_SEARCH_DEPTH: u32 = 6;
/// Default depth used to score a single proposed move
pub const DEFAULT_EVALUATION_DEPTH: u32 = 4;
/// Default wall-clock budget for iterative deepening
pub const DEFAULT_TIME_BUDGET_MS: u64 = 2_000;

/// A named, range-limited integer option
#[derive(Clone, Copy, Debug)]
struct SpinOption {
    name: &'static str,
    min: i64,
    max: i64,
}

const SPIN_OPTIONS: [SpinOption; 9] = [
    SpinOption { name: "depth", min: 1, max: 12 },
    SpinOption { name: "evaluation_depth", min: 1, max: 10 },
    SpinOption { name: "time_budget_ms", min: 0, max: 60_000 },
    SpinOption { name: "piece_value", min: 1, max: 1_000 },
    SpinOption { name: "king_value", min: 1, max: 2_000 },
    SpinOption { name: "center_control", min: 0, max: 100 },
    SpinOption { name: "advancement", min: 0, max: 100 },
    SpinOption { name: "back_row", min: 0, max: 100 },
    SpinOption { name: "mobility", min: 0, max: 100 },
];

/// Engine settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub search_depth: u32,
    pub evaluation_depth: u32,
    pub time_budget_ms: u64,
    pub use_alpha_beta: bool,
    pub use_move_ordering: bool,
    pub weights: EvaluationWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_depth: DEFAULT_SEARCH_DEPTH,
            evaluation_depth: DEFAULT_EVALUATION_DEPTH,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            use_alpha_beta: true,
            use_move_ordering: true,
            weights: EvaluationWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Set one option by name. The config is unchanged on error.
    pub fn set_option(&mut self, name: &str, value: &str) -> CheckersResult<()> {
        let invalid = || CheckersError::InvalidOption {
            name: name.to_string(),
            value: value.to_string(),
        };
        let key = name.trim().to_lowercase();

        match key.as_str() {
            "alpha_beta" => self.use_alpha_beta = parse_check(value).ok_or_else(invalid)?,
            "move_ordering" => self.use_move_ordering = parse_check(value).ok_or_else(invalid)?,
            _ => {
                let option = SPIN_OPTIONS
                    .iter()
                    .find(|o| o.name == key)
                    .ok_or_else(invalid)?;
                let v: i64 = value.trim().parse().map_err(|_| invalid())?;
                if v < option.min || v > option.max {
                    return Err(invalid());
                }
                match option.name {
                    "depth" => self.search_depth = v as u32,
                    "evaluation_depth" => self.evaluation_depth = v as u32,
                    "time_budget_ms" => self.time_budget_ms = v as u64,
                    "piece_value" => self.weights.piece_value = v as i32,
                    "king_value" => self.weights.king_value = v as i32,
                    "center_control" => self.weights.center_control = v as i32,
                    "advancement" => self.weights.advancement = v as i32,
                    "back_row" => self.weights.back_row = v as i32,
                    "mobility" => self.weights.mobility = v as i32,
                    _ => return Err(invalid()),
                }
            }
        }

        Ok(())
    }
}

fn parse_check(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}
