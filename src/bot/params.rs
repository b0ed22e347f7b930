//! Bot difficulty tiers and scoring weights
//!
//! `SmartLevel` decides which strategies a `SmartBot` consults; `EvalParams`
//! carries the weight of each strategy and the few constants the lookahead
//! strategies depend on.

use std::fmt;

use crate::eval::Strategy;

/// Difficulty tier: a fixed subset of the strategy registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmartLevel {
    Simple,
    Medium,
    Hard,
}

const SIMPLE_STRATEGIES: &[Strategy] = &[
    Strategy::Winning,
    Strategy::Lose,
    Strategy::Chase,
    Strategy::Stick,
];

const MEDIUM_STRATEGIES: &[Strategy] = &[
    Strategy::Winning,
    Strategy::Lose,
    Strategy::Chase,
    Strategy::Stick,
    Strategy::Baseline,
    Strategy::Push,
    Strategy::Center,
];

impl SmartLevel {
    pub const ALL: [SmartLevel; 3] = [SmartLevel::Simple, SmartLevel::Medium, SmartLevel::Hard];

    /// Strategies consulted at this level. Each tier includes the one below it.
    pub fn strategies(self) -> &'static [Strategy] {
        match self {
            SmartLevel::Simple => SIMPLE_STRATEGIES,
            SmartLevel::Medium => MEDIUM_STRATEGIES,
            SmartLevel::Hard => &Strategy::ALL,
        }
    }

    /// Strongest tier that stays responsive on a board with `rows_per_player` rows.
    /// Sizes outside the tuned 2..=9 range fall back to `Simple`.
    pub fn recommended_for(rows_per_player: usize) -> SmartLevel {
        match rows_per_player {
            2..=5 => SmartLevel::Hard,
            6..=7 => SmartLevel::Medium,
            _ => SmartLevel::Simple,
        }
    }
}

impl fmt::Display for SmartLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmartLevel::Simple => write!(f, "simple"),
            SmartLevel::Medium => write!(f, "medium"),
            SmartLevel::Hard => write!(f, "hard"),
        }
    }
}

/// Strategy weights and lookahead constants
#[derive(Debug, Clone)]
pub struct EvalParams {
    /// Converging on isolated opponent pieces
    pub chase: f64,

    /// Keeping pieces diagonally adjacent
    pub stick: f64,

    /// Holding the back-row anchor squares
    pub baseline: f64,

    /// Advancing men toward the crowning row
    pub push: f64,

    /// Entering the central band
    pub center: f64,

    /// Penalty per unit of exposed material (applied negatively)
    pub sacrifice: f64,

    /// Material taken this turn
    pub capture: f64,

    /// Closing in on the opponent's double corner
    pub corner: f64,

    /// Reaching the crowning row
    pub king: f64,

    /// Recapture available after a forced opponent capture
    pub force: f64,

    /// Dominating score for won/lost sequences
    pub win_score: f64,

    /// The lose lookahead only runs while the mover has fewer pieces than this
    pub lose_lookahead_below: usize,

    /// Chase is disabled on boards narrower than this
    pub chase_min_width: usize,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            chase: 0.7,
            stick: 1.0,
            baseline: 4.0,
            push: 1.0,
            center: 1.0,
            sacrifice: 0.05,
            capture: 1.0,
            corner: 0.7,
            king: 1.0,
            force: 1.0,
            win_score: 1e9,
            lose_lookahead_below: 4,
            chase_min_width: 8,
        }
    }
}

impl EvalParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed multiplier applied to a strategy's raw score.
    ///
    /// Sacrifice returns a non-negative penalty, so its weight is negated here.
    /// Winning and lose are already expressed in `win_score` units.
    pub fn weight(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Winning | Strategy::Lose => 1.0,
            Strategy::Sacrifice => -self.sacrifice,
            Strategy::Capture => self.capture,
            Strategy::Corner => self.corner,
            Strategy::Baseline => self.baseline,
            Strategy::Push => self.push,
            Strategy::King => self.king,
            Strategy::Stick => self.stick,
            Strategy::Center => self.center,
            Strategy::Chase => self.chase,
            Strategy::Force => self.force,
        }
    }

    pub fn chase(mut self, weight: f64) -> Self {
        self.chase = weight;
        self
    }

    pub fn stick(mut self, weight: f64) -> Self {
        self.stick = weight;
        self
    }

    pub fn baseline(mut self, weight: f64) -> Self {
        self.baseline = weight;
        self
    }

    pub fn push(mut self, weight: f64) -> Self {
        self.push = weight;
        self
    }

    pub fn center(mut self, weight: f64) -> Self {
        self.center = weight;
        self
    }

    pub fn sacrifice(mut self, weight: f64) -> Self {
        self.sacrifice = weight;
        self
    }

    pub fn capture(mut self, weight: f64) -> Self {
        self.capture = weight;
        self
    }

    pub fn corner(mut self, weight: f64) -> Self {
        self.corner = weight;
        self
    }

    pub fn king(mut self, weight: f64) -> Self {
        self.king = weight;
        self
    }

    pub fn force(mut self, weight: f64) -> Self {
        self.force = weight;
        self
    }

    /// Set the dominating constant used by winning/lose
    pub fn win_score(mut self, score: f64) -> Self {
        self.win_score = score;
        self
    }

    pub fn lose_lookahead_below(mut self, pieces: usize) -> Self {
        self.lose_lookahead_below = pieces;
        self
    }

    pub fn chase_min_width(mut self, width: usize) -> Self {
        self.chase_min_width = width;
        self
    }
}
