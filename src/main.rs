// Command-line puzzle solver

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use log::debug;

use mate_solver::agent::ai::format_score;
use mate_solver::{ChessPosition, Orchestrator, SearchConfig, SolveConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve chess mate puzzles with minimax search", long_about = None)]
struct Args {
    /// Index of a built-in puzzle (-1 requests a live puzzle, which is unsupported)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true, conflicts_with = "fen")]
    puzzle: i64,

    /// Solve this position instead of a built-in puzzle
    #[arg(long)]
    fen: Option<String>,

    /// Search depth of the first turn, reduced by one every turn
    #[arg(short, long, default_value_t = 5)]
    depth: u8,

    /// Maximum number of turns to play
    #[arg(short, long, default_value_t = 5)]
    turns: u8,

    /// Disable alpha-beta pruning
    #[arg(long)]
    no_alpha_beta: bool,

    /// Disable reads from the exact result cache
    #[arg(long)]
    no_hashing: bool,

    /// Score unfinished positions by material and mobility instead of zero
    #[arg(long)]
    full_eval: bool,

    /// Order moves by one-ply estimates
    #[arg(long)]
    sorting: bool,

    /// Run shallower warm-up searches before each turn
    #[arg(long)]
    deepening: bool,

    /// Only reuse cached results computed at least as deep as requested
    #[arg(long)]
    depth_aware_cache: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig::plain()
            .with_alpha_beta(!self.no_alpha_beta)
            .with_hashing(!self.no_hashing)
            .with_zero_eval(!self.full_eval)
            .with_sorting(self.sorting)
            .with_deepening(self.deepening)
            .with_depth_aware_cache(self.depth_aware_cache)
    }

    fn solve_config(&self) -> SolveConfig {
        SolveConfig {
            depth: self.depth,
            max_turns: self.turns,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let search = args.search_config();
    debug!("{search:?}");

    let mut solver = match &args.fen {
        Some(fen) => Orchestrator::new(ChessPosition::from_fen(fen)?, search, args.solve_config()),
        None => Orchestrator::from_puzzle(args.puzzle, search, args.solve_config())?,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}\n", solver.position().diagram())?;

    let mut print_error = None;
    let report = solver.run(|record, position| {
        let printed = writeln!(out, "{} ( {} )", record.mv, format_score(record.value))
            .and_then(|_| writeln!(out, "{}\n", position.diagram()));
        if print_error.is_none() {
            print_error = printed.err();
        }
    })?;
    if let Some(err) = print_error {
        return Err(err.into());
    }

    if let Some(result) = report.result {
        writeln!(out, "Game over: {result}")?;
    }
    writeln!(out, "{}", report.stats)?;
    writeln!(out, "Time: {:.2}s", report.elapsed.as_secs_f64())?;
    Ok(())
}
