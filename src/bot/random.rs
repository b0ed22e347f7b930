use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::Bot;
use crate::engine::CheckersEngine;
use crate::error::EngineError;
use crate::moves::MoveSequence;
use crate::piece::Color;

/// Plays a uniformly random legal sequence.
#[derive(Debug, Clone)]
pub struct RandomBot {
    color: Color,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self {
            color,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_move_sequence(&mut self, engine: &CheckersEngine) -> Result<MoveSequence, EngineError> {
        let mut sequences = engine.legal_move_sequences(self.color);
        if sequences.is_empty() {
            return Err(EngineError::NoLegalMoves(self.color));
        }
        let pick = self.rng.random_range(0..sequences.len());
        trace!(color = %self.color, pick, of = sequences.len(), "random choice");
        Ok(sequences.swap_remove(pick))
    }
}
