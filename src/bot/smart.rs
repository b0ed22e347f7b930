//! Strategy-driven bot
//!
//! Every legal sequence is scored by the strategies of the bot's level. The
//! decisive strategies (winning, lose) are checked first and, when they fire,
//! their score replaces the sum of the others. The bot then samples uniformly
//! among the sequences sharing the best total.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::params::{EvalParams, SmartLevel};
use super::Bot;
use crate::engine::CheckersEngine;
use crate::error::EngineError;
use crate::eval::{EvalContext, Lookahead, ScoreFn, Strategy};
use crate::moves::MoveSequence;
use crate::piece::Color;

#[derive(Debug, Clone)]
pub struct SmartBot {
    color: Color,
    level: SmartLevel,
    params: EvalParams,
    // Resolved once from the level: (strategy, scorer)
    decisive: Vec<(Strategy, ScoreFn)>,
    positional: Vec<(Strategy, ScoreFn)>,
    rng: StdRng,
}

impl SmartBot {
    pub fn new(color: Color, level: SmartLevel) -> Self {
        Self::build(color, level, StdRng::from_os_rng())
    }

    pub fn with_seed(color: Color, level: SmartLevel, seed: u64) -> Self {
        Self::build(color, level, StdRng::seed_from_u64(seed))
    }

    fn build(color: Color, level: SmartLevel, rng: StdRng) -> Self {
        let (decisive, positional): (Vec<_>, Vec<_>) = level
            .strategies()
            .iter()
            .map(|&s| (s, s.scorer()))
            .partition(|(s, _)| s.is_decisive());
        Self {
            color,
            level,
            params: EvalParams::default(),
            decisive,
            positional,
            rng,
        }
    }

    /// Replace the default weights.
    pub fn with_params(mut self, params: EvalParams) -> Self {
        self.params = params;
        self
    }

    /// Strategies this bot consults, decisive ones first.
    pub fn strategies(&self) -> impl Iterator<Item = Strategy> + '_ {
        self.decisive
            .iter()
            .chain(self.positional.iter())
            .map(|(s, _)| *s)
    }

    /// Total score of one sequence for this bot's color.
    pub fn score_sequence(
        &self,
        engine: &CheckersEngine,
        sequence: &MoveSequence,
    ) -> Result<f64, EngineError> {
        let ctx = EvalContext::new(engine, self.color, &self.params);
        let look = Lookahead::new(engine, self.color, sequence)?;

        for (strategy, scorer) in &self.decisive {
            let score = scorer(&ctx, sequence, &look)? * self.params.weight(*strategy);
            if score != 0.0 {
                trace!(%sequence, %strategy, score, "decisive");
                return Ok(score);
            }
        }

        let mut total = 0.0;
        for (strategy, scorer) in &self.positional {
            let raw = scorer(&ctx, sequence, &look)?;
            if raw != 0.0 {
                trace!(%sequence, %strategy, raw, "strategy score");
            }
            total += raw * self.params.weight(*strategy);
        }
        Ok(total)
    }

    /// Every legal sequence with its total score, in generation order.
    pub fn score_sequences(
        &self,
        engine: &CheckersEngine,
    ) -> Result<Vec<(MoveSequence, f64)>, EngineError> {
        engine
            .legal_move_sequences(self.color)
            .into_iter()
            .map(|sequence| {
                let score = self.score_sequence(engine, &sequence)?;
                Ok((sequence, score))
            })
            .collect()
    }
}

impl Bot for SmartBot {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_move_sequence(&mut self, engine: &CheckersEngine) -> Result<MoveSequence, EngineError> {
        let scored = self.score_sequences(engine)?;
        let best = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut candidates: Vec<MoveSequence> = scored
            .into_iter()
            .filter(|(_, score)| *score >= best)
            .map(|(sequence, _)| sequence)
            .collect();
        if candidates.is_empty() {
            return Err(EngineError::NoLegalMoves(self.color));
        }

        let pick = self.rng.random_range(0..candidates.len());
        debug!(color = %self.color, level = %self.level, best, ties = candidates.len(), "smart choice");
        Ok(candidates.swap_remove(pick))
    }
}
