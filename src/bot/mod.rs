//! Decision policies
//!
//! A bot picks one of the legal sequences for its color. `RandomBot` samples
//! uniformly; `SmartBot` scores every sequence with the strategies of its
//! level and samples among the best.

pub mod params;
pub mod random;
pub mod smart;
pub mod stats;

pub use params::{EvalParams, SmartLevel};
pub use random::RandomBot;
pub use smart::SmartBot;
pub use stats::MatchStats;

use crate::engine::{CheckersEngine, GameStatus};
use crate::error::EngineError;
use crate::moves::MoveSequence;
use crate::piece::Color;

pub trait Bot {
    fn color(&self) -> Color;

    /// Pick a sequence for `self.color()` in the current position.
    ///
    /// Fails with `NoLegalMoves` when the color has nothing to play.
    fn choose_move_sequence(&mut self, engine: &CheckersEngine)
        -> Result<MoveSequence, EngineError>;

    /// Choose and apply in one step.
    fn play_turn(&mut self, engine: &mut CheckersEngine) -> Result<GameStatus, EngineError> {
        let sequence = self.choose_move_sequence(engine)?;
        engine.apply_move(&sequence)
    }
}
