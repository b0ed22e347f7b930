//! Dama batch evaluator: RandomBot vs SmartBot over many games.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dama::arena::{run_match, MatchConfig};
use dama::bot::SmartLevel;

/// Smart bot level as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    Simple,
    Medium,
    Hard,
    /// Pick the level from the board size
    Auto,
}

impl LevelArg {
    fn resolve(self, rows_per_player: usize) -> SmartLevel {
        match self {
            LevelArg::Simple => SmartLevel::Simple,
            LevelArg::Medium => SmartLevel::Medium,
            LevelArg::Hard => SmartLevel::Hard,
            LevelArg::Auto => SmartLevel::recommended_for(rows_per_player),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rows of men per player (board side is 2 * (rows + 1))
    rows: usize,

    /// Number of games to play
    games: u32,

    /// Master seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Smart bot level
    #[arg(short, long, value_enum, default_value_t = LevelArg::Hard)]
    level: LevelArg,

    /// Disable the legal move cache
    #[arg(long)]
    no_cache: bool,

    /// Print the full statistics block
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    dama::init();
    let args = Args::parse();

    let mut config = MatchConfig::new(args.rows, args.games)
        .level(args.level.resolve(args.rows))
        .caching(!args.no_cache);
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    match run_match(&config) {
        Ok(stats) => {
            if args.verbose {
                stats.print_summary();
            } else {
                println!("win rate: {:.3}", stats.win_rate());
                println!("draw rate: {:.3}", stats.draw_rate());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_defaults_to_hard() {
        let args = Args::try_parse_from(["dama", "4", "10"]).unwrap();
        assert_eq!(args.level, LevelArg::Hard);
        assert_eq!(args.level.resolve(args.rows), SmartLevel::Hard);
    }

    #[test]
    fn test_auto_level_follows_board_size() {
        let args = Args::try_parse_from(["dama", "8", "1", "--level", "auto"]).unwrap();
        assert_eq!(args.level.resolve(args.rows), SmartLevel::Simple);
        let args = Args::try_parse_from(["dama", "6", "1", "-l", "auto"]).unwrap();
        assert_eq!(args.level.resolve(args.rows), SmartLevel::Medium);
    }

    #[test]
    fn test_unknown_level_is_rejected_by_clap() {
        let err = Args::try_parse_from(["dama", "4", "10", "--level", "expert"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
