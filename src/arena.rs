//! Batch evaluation: RandomBot (Black, moves first) against SmartBot (Red).
//!
//! Each game gets its own seed drawn from one master generator, so a run is
//! reproducible from a single `seed`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::bot::{Bot, EvalParams, MatchStats, RandomBot, SmartBot, SmartLevel};
use crate::engine::{CheckersEngine, GameStatus};
use crate::error::EngineError;
use crate::piece::Color;

pub const RANDOM_COLOR: Color = Color::Black;
pub const SMART_COLOR: Color = Color::Red;

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub rows_per_player: usize,
    pub games: u32,
    /// Master seed; `None` seeds from the OS
    pub seed: Option<u64>,
    pub level: SmartLevel,
    pub params: EvalParams,
    pub caching: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows_per_player: 3,
            games: 10,
            seed: None,
            level: SmartLevel::Hard,
            params: EvalParams::default(),
            caching: true,
        }
    }
}

impl MatchConfig {
    pub fn new(rows_per_player: usize, games: u32) -> Self {
        Self {
            rows_per_player,
            games,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn level(mut self, level: SmartLevel) -> Self {
        self.level = level;
        self
    }

    pub fn params(mut self, params: EvalParams) -> Self {
        self.params = params;
        self
    }

    pub fn caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }
}

/// Outcome of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub status: GameStatus,
    pub plies: u64,
}

/// Play `config.games` games to completion and collect the results.
pub fn run_match(config: &MatchConfig) -> Result<MatchStats, EngineError> {
    let mut master = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut stats = MatchStats::new();
    stats.start_timing();

    for game in 0..config.games {
        let seed: u64 = master.random();
        let record = play_game(config, seed)?;
        info!(game, seed, status = %record.status, plies = record.plies, "game finished");
        stats.record(record.status, SMART_COLOR, record.plies);
    }

    stats.update_timing();
    Ok(stats)
}

/// One RandomBot vs SmartBot game from the starting position.
pub fn play_game(config: &MatchConfig, seed: u64) -> Result<GameRecord, EngineError> {
    let mut engine = CheckersEngine::new(config.rows_per_player, config.caching)?;
    let mut random = RandomBot::with_seed(RANDOM_COLOR, seed);
    let mut smart = SmartBot::with_seed(SMART_COLOR, config.level, seed.wrapping_add(1))
        .with_params(config.params.clone());

    let mut plies = 0u64;
    while engine.status() == GameStatus::InProgress {
        let bot: &mut dyn Bot = if engine.turn() == RANDOM_COLOR {
            &mut random
        } else {
            &mut smart
        };
        match bot.play_turn(&mut engine) {
            Ok(_) => plies += 1,
            Err(EngineError::NoLegalMoves(color)) => {
                debug!(%color, "no legal moves, stopping");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(GameRecord {
        status: engine.status(),
        plies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_terminate() {
        let config = MatchConfig::new(1, 4).seed(11);
        let stats = run_match(&config).unwrap();
        assert_eq!(stats.games, 4);
        assert_eq!(stats.smart_wins + stats.random_wins + stats.draws, 4);
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = MatchConfig::new(2, 1).level(SmartLevel::Medium);
        assert_eq!(play_game(&config, 99).unwrap(), play_game(&config, 99).unwrap());
    }
}
