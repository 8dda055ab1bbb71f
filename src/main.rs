//! Agatha - Checkers self-play driver
//!
//! Plays the engine against itself from the starting position and prints
//! every move. Agatha searches at a fixed depth; the Human side uses
//! iterative deepening under the time budget.
//!
//! Usage:
//!     agatha_checkers [--seed N] [--plies N] [--random-openings N]
//!                     [--option NAME=VALUE ...]
//!
//! Engine options: depth, evaluation_depth, time_budget_ms, alpha_beta,
//! move_ordering and the evaluation weights. Set RUST_LOG=debug to see
//! per-search statistics.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use agatha_checkers::config::EngineConfig;
use agatha_checkers::error::CheckersResult;
use agatha_checkers::game::Game;
use agatha_checkers::search::SearchEngine;
use agatha_checkers::types::Player;

#[derive(Parser, Debug)]
#[command(name = "agatha_checkers")]
#[command(about = "Checkers engine self-play", long_about = None)]
struct Cli {
    /// Seed for the random opening plies
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Stop and call a draw after this many plies
    #[arg(long, default_value_t = 200)]
    plies: usize,

    /// Plies played at random before the engine takes over
    #[arg(long, default_value_t = 2)]
    random_openings: usize,

    /// Engine option as NAME=VALUE, e.g. depth=4 (repeatable)
    #[arg(short, long = "option", value_name = "NAME=VALUE", value_parser = parse_option)]
    options: Vec<(String, String)>,
}

impl Cli {
    fn engine_config(&self) -> CheckersResult<EngineConfig> {
        let mut config = EngineConfig::default();
        for (name, value) in &self.options {
            config.set_option(name, value)?;
        }
        Ok(config)
    }
}

fn parse_option(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", arg))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match cli.engine_config() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid engine option");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = SearchEngine::new(config);
    let depth = engine.config().search_depth;
    let budget = Duration::from_millis(engine.config().time_budget_ms);
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut game = Game::new();

    info!(depth, seed = cli.seed, "starting self-play");

    while game.history().len() < cli.plies {
        if let Some(winner) = game.winner() {
            println!("{}", game.board());
            info!(%winner, plies = game.history().len(), "game over");
            return ExitCode::SUCCESS;
        }

        let side = game.to_move();
        let (choice, nodes) = if game.history().len() < cli.random_openings {
            (game.legal_moves().choose(&mut rng).cloned(), 0)
        } else {
            let result = match side {
                Player::Agatha => engine.best_move(game.board()),
                Player::Human => engine.iterative_deepening(game.board(), side, depth, budget),
            };
            (result.best_move, result.nodes)
        };

        let Some(mv) = choice else {
            break;
        };
        match game.play(&mv) {
            Ok(record) => info!(ply = record.ply, player = %record.player, nodes, "{}", mv),
            Err(err) => {
                error!(%err, "engine produced an unplayable move");
                return ExitCode::FAILURE;
            }
        }
    }

    println!("{}", game.board());
    info!(plies = game.history().len(), "ply limit reached, calling it a draw");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_is_generated() {
        let err = Cli::try_parse_from(["agatha_checkers", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--random-openings"));
    }

    #[test]
    fn driver_flags_and_engine_options() {
        let cli = Cli::try_parse_from([
            "agatha_checkers",
            "--seed",
            "7",
            "--plies",
            "4",
            "--option",
            "depth=2",
            "-o",
            "alpha_beta=false",
        ])
        .unwrap();
        assert_eq!((cli.seed, cli.plies, cli.random_openings), (7, 4, 2));

        let config = cli.engine_config().unwrap();
        assert_eq!(config.search_depth, 2);
        assert!(!config.use_alpha_beta);
    }

    #[test]
    fn malformed_and_out_of_range_options_are_rejected() {
        assert!(Cli::try_parse_from(["agatha_checkers", "--option", "depth"]).is_err());

        let cli = Cli::try_parse_from(["agatha_checkers", "-o", "depth=99"]).unwrap();
        assert!(cli.engine_config().is_err());
    }
}
