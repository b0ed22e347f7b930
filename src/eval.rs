//! Strategy scoring for the smart bot.
//!
//! Every strategy is a pure function of the position before the move, the
//! candidate sequence and a one-ply `Lookahead` built once for that sequence.
//! Nothing here mutates the live engine: the lookahead works on snapshots
//! obtained through `CheckersEngine::after`.

use std::fmt;

use crate::board::Coord;
use crate::bot::params::EvalParams;
use crate::engine::CheckersEngine;
use crate::error::EngineError;
use crate::moves::MoveSequence;
use crate::piece::{Color, Piece};
use crate::utils::{crowning_row, diagonal_neighbours};

// ============================================================================
// STRATEGY REGISTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Winning,
    Lose,
    Sacrifice,
    Capture,
    Corner,
    Baseline,
    Push,
    King,
    Stick,
    Center,
    Chase,
    Force,
}

impl Strategy {
    pub const ALL: [Strategy; 12] = [
        Strategy::Winning,
        Strategy::Lose,
        Strategy::Sacrifice,
        Strategy::Capture,
        Strategy::Corner,
        Strategy::Baseline,
        Strategy::Push,
        Strategy::King,
        Strategy::Stick,
        Strategy::Center,
        Strategy::Chase,
        Strategy::Force,
    ];

    pub fn name(self) -> &'static str {
        REGISTRY[self as usize].1
    }

    pub fn scorer(self) -> ScoreFn {
        REGISTRY[self as usize].2
    }

    /// Winning and lose dominate every other score and stop the summation.
    pub fn is_decisive(self) -> bool {
        matches!(self, Strategy::Winning | Strategy::Lose)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type ScoreFn =
    fn(&EvalContext<'_>, &MoveSequence, &Lookahead) -> Result<f64, EngineError>;

/// (strategy, name, scoring function), indexed by the strategy's discriminant.
pub const REGISTRY: [(Strategy, &str, ScoreFn); 12] = [
    (Strategy::Winning, "winning", winning),
    (Strategy::Lose, "lose", lose),
    (Strategy::Sacrifice, "sacrifice", sacrifice),
    (Strategy::Capture, "capture", capture),
    (Strategy::Corner, "corner", corner),
    (Strategy::Baseline, "baseline", baseline),
    (Strategy::Push, "push", push),
    (Strategy::King, "king", king),
    (Strategy::Stick, "stick", stick),
    (Strategy::Center, "center", center),
    (Strategy::Chase, "chase", chase),
    (Strategy::Force, "force", force),
];

// ============================================================================
// CONTEXT & LOOKAHEAD
// ============================================================================

/// Position before the move, seen from the side about to move.
pub struct EvalContext<'a> {
    pub engine: &'a CheckersEngine,
    pub color: Color,
    pub params: &'a EvalParams,
}

impl<'a> EvalContext<'a> {
    pub fn new(engine: &'a CheckersEngine, color: Color, params: &'a EvalParams) -> Self {
        Self {
            engine,
            color,
            params,
        }
    }

    fn side(&self) -> usize {
        self.engine.side()
    }

    fn mover(&self, sequence: &MoveSequence) -> Option<&'a Piece> {
        sequence.origin().and_then(|at| self.engine.piece_at(at))
    }
}

/// Opponent's view of the position right after a candidate sequence.
pub struct Lookahead {
    /// Snapshot with the sequence played.
    pub after: CheckersEngine,
    /// Every opponent reply in the snapshot.
    pub replies: Vec<MoveSequence>,
    /// Replies whose first jump takes the piece that just moved.
    pub induced: Vec<MoveSequence>,
}

impl Lookahead {
    pub fn new(
        engine: &CheckersEngine,
        color: Color,
        sequence: &MoveSequence,
    ) -> Result<Self, EngineError> {
        let after = engine.after(sequence)?;
        let replies = after.legal_move_sequences(color.opponent());
        let induced = match sequence.destination() {
            Some(landed) => replies
                .iter()
                .filter(|reply| reply.first().captured() == Some(landed))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        Ok(Self {
            after,
            replies,
            induced,
        })
    }
}

// ============================================================================
// MATERIAL HELPERS
// ============================================================================

/// Material value of a single piece: kings count double.
pub fn capture_value(piece: &Piece) -> f64 {
    if piece.is_king() {
        2.0
    } else {
        1.0
    }
}

/// Material removed by `sequence` when played on `engine`.
pub fn sequence_capture_value(engine: &CheckersEngine, sequence: &MoveSequence) -> f64 {
    sequence
        .captures()
        .filter_map(|at| engine.piece_at(at))
        .map(capture_value)
        .sum()
}

fn best_capture_value<'s>(
    engine: &CheckersEngine,
    sequences: impl Iterator<Item = &'s MoveSequence>,
) -> f64 {
    sequences
        .map(|s| sequence_capture_value(engine, s))
        .fold(0.0, f64::max)
}

// ============================================================================
// DECISIVE STRATEGIES
// ============================================================================

/// `win_score` when the opponent is left without a reply.
pub fn winning(
    ctx: &EvalContext<'_>,
    _sequence: &MoveSequence,
    look: &Lookahead,
) -> Result<f64, EngineError> {
    if look.replies.is_empty() {
        Ok(ctx.params.win_score)
    } else {
        Ok(0.0)
    }
}

/// `-win_score` when some opponent reply leaves the mover without moves.
/// Only looked at while the mover is down to a handful of pieces.
pub fn lose(
    ctx: &EvalContext<'_>,
    _sequence: &MoveSequence,
    look: &Lookahead,
) -> Result<f64, EngineError> {
    if ctx.engine.piece_count(ctx.color) >= ctx.params.lose_lookahead_below {
        return Ok(0.0);
    }
    for reply in &look.replies {
        let next = look.after.after(reply)?;
        if next.legal_move_sequences(ctx.color).is_empty() {
            return Ok(-ctx.params.win_score);
        }
    }
    Ok(0.0)
}

// ============================================================================
// MATERIAL STRATEGIES
// ============================================================================

/// Penalty for leaving the moved piece en prise without enough compensation.
///
/// Returns a value >= 0; the caller applies it with a negative weight. The
/// penalty grows as the mover's material lead shrinks.
pub fn sacrifice(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    look: &Lookahead,
) -> Result<f64, EngineError> {
    if look.induced.is_empty() {
        return Ok(0.0);
    }
    let lost = best_capture_value(&look.after, look.induced.iter());
    let gained = sequence_capture_value(ctx.engine, sequence);
    let net = (lost - gained).max(0.0);

    let rows = ctx.engine.rows_per_player();
    let initial = (rows * (rows + 1)) as f64;
    let mine = ctx.engine.piece_count(ctx.color) as f64;
    let theirs = ctx.engine.piece_count(ctx.color.opponent()) as f64;
    let pressure = (initial - (mine - theirs)).max(0.0);

    Ok(net * pressure)
}

pub fn capture(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    Ok(sequence_capture_value(ctx.engine, sequence))
}

/// Material we can take back after the opponent's only capture reply.
pub fn force(
    ctx: &EvalContext<'_>,
    _sequence: &MoveSequence,
    look: &Lookahead,
) -> Result<f64, EngineError> {
    let [forced] = look.induced.as_slice() else {
        return Ok(0.0);
    };
    let Some(capturer) = forced.destination() else {
        return Ok(0.0);
    };
    let position = look.after.after(forced)?;
    let recaptures = position.legal_move_sequences(ctx.color);
    Ok(best_capture_value(
        &position,
        recaptures
            .iter()
            .filter(|r| r.first().captured() == Some(capturer)),
    ))
}

// ============================================================================
// POSITIONAL STRATEGIES
// ============================================================================

/// Move toward the opponent's double corner while one of its pieces hides there.
pub fn corner(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    let (Some(from), Some(to)) = (sequence.origin(), sequence.destination()) else {
        return Ok(0.0);
    };
    let last = ctx.side() - 1;
    let target = match ctx.color {
        Color::Red => Coord::new(0, 0),
        Color::Black => Coord::new(last, last),
    };
    let reach = 5f64.sqrt();
    let occupied = ctx
        .engine
        .pieces(ctx.color.opponent())
        .any(|p| p.position().distance(target) <= reach);
    if !occupied {
        return Ok(0.0);
    }
    Ok(target.distance(from) - target.distance(to))
}

// Case di guardia sulla traversa di partenza, una ogni quattro colonne
fn baseline_anchors(color: Color, side: usize) -> impl Iterator<Item = Coord> {
    let (row, cols): (usize, Vec<usize>) = match color {
        Color::Black => (0, (1..side).step_by(4).collect()),
        Color::Red => (side - 1, (0..=side - 2).rev().step_by(4).collect()),
    };
    cols.into_iter().map(move |col| Coord::new(row, col))
}

/// -1 for moving one of the back-row guards.
pub fn baseline(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    let Some(from) = sequence.origin() else {
        return Ok(0.0);
    };
    if baseline_anchors(ctx.color, ctx.side()).any(|anchor| anchor == from) {
        Ok(-1.0)
    } else {
        Ok(0.0)
    }
}

/// Rows a man advances.
pub fn push(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    let (Some(piece), Some(to)) = (ctx.mover(sequence), sequence.destination()) else {
        return Ok(0.0);
    };
    if piece.is_king() {
        return Ok(0.0);
    }
    let from = piece.position();
    Ok((to.row as f64 - from.row as f64) * piece.color().forward() as f64)
}

pub fn king(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    let (Some(piece), Some(to)) = (ctx.mover(sequence), sequence.destination()) else {
        return Ok(0.0);
    };
    if !piece.is_king() && to.row == crowning_row(piece.color(), ctx.side()) {
        Ok(1.0)
    } else {
        Ok(0.0)
    }
}

/// -1 for leaving every friendly neighbour behind.
///
/// Neighbours are looked up on the board before the move and the moving piece
/// never counts as its own neighbour.
pub fn stick(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    let (Some(from), Some(to)) = (sequence.origin(), sequence.destination()) else {
        return Ok(0.0);
    };
    let has_friend = |at: Coord| {
        diagonal_neighbours(at).any(|n| {
            n != from
                && ctx
                    .engine
                    .piece_at(n)
                    .is_some_and(|p| p.color() == ctx.color)
        })
    };
    if has_friend(from) && !has_friend(to) {
        Ok(-1.0)
    } else {
        Ok(0.0)
    }
}

fn in_center(at: Coord, side: usize) -> bool {
    let half = side / 2;
    (2..side - 2).contains(&at.col) && (half - 1..half + 1).contains(&at.row)
}

/// +1 for stepping into the central band from outside.
pub fn center(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    let (Some(from), Some(to)) = (sequence.origin(), sequence.destination()) else {
        return Ok(0.0);
    };
    if !in_center(from, ctx.side()) && in_center(to, ctx.side()) {
        Ok(1.0)
    } else {
        Ok(0.0)
    }
}

/// Close in on the nearest opponent piece once the opponent is nearly wiped out.
pub fn chase(
    ctx: &EvalContext<'_>,
    sequence: &MoveSequence,
    _look: &Lookahead,
) -> Result<f64, EngineError> {
    let side = ctx.side();
    if side < ctx.params.chase_min_width {
        return Ok(0.0);
    }
    let (Some(from), Some(to)) = (sequence.origin(), sequence.destination()) else {
        return Ok(0.0);
    };

    let half = side / 2;
    let full_side = (half * (half - 1)) as f64;
    let mine = ctx.engine.piece_count(ctx.color) as f64;
    let theirs = ctx.engine.piece_count(ctx.color.opponent()) as f64;
    if theirs > full_side / 4.0 || mine <= 1.5 * theirs {
        return Ok(0.0);
    }

    let nearest = ctx
        .engine
        .pieces(ctx.color.opponent())
        .map(Piece::position)
        .min_by(|a, b| a.distance(from).total_cmp(&b.distance(from)));
    Ok(match nearest {
        Some(prey) => prey.distance(from) - prey.distance(to),
        None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(strategy: Strategy, engine: &CheckersEngine, sequence: &MoveSequence) -> f64 {
        score_with(&EvalParams::default(), strategy, engine, sequence)
    }

    fn score_with(
        params: &EvalParams,
        strategy: Strategy,
        engine: &CheckersEngine,
        sequence: &MoveSequence,
    ) -> f64 {
        let color = engine.turn();
        let ctx = EvalContext::new(engine, color, params);
        let look = Lookahead::new(engine, color, sequence).unwrap();
        strategy.scorer()(&ctx, sequence, &look).unwrap()
    }

    fn sequence_from(engine: &CheckersEngine, from: Coord, to: Coord) -> MoveSequence {
        engine
            .legal_move_sequences(engine.turn())
            .into_iter()
            .find(|s| s.origin() == Some(from) && s.destination() == Some(to))
            .unwrap()
    }

    #[test]
    fn test_registry_is_indexed_by_discriminant() {
        for (i, (strategy, name, _)) in REGISTRY.iter().enumerate() {
            assert_eq!(*strategy as usize, i);
            assert_eq!(strategy.name(), *name);
            assert_eq!(Strategy::ALL[i], *strategy);
        }
    }

    #[test]
    fn test_winning_detects_last_capture() {
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ..b...
             .r....
             ......
             ......
             ......",
            Color::Black,
        )
        .unwrap();
        let jump = &engine.legal_move_sequences(Color::Black)[0];
        assert_eq!(score(Strategy::Winning, &engine, jump), 1e9);
        assert_eq!(score(Strategy::Capture, &engine, jump), 1.0);
    }

    #[test]
    fn test_lose_sees_a_losing_reply() {
        // Red's only man steps next to Black's man and gets taken
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ......
             .b....
             ......
             ...r..
             ......",
            Color::Red,
        )
        .unwrap();
        let into_danger = sequence_from(&engine, Coord::new(4, 3), Coord::new(3, 2));
        let safe = sequence_from(&engine, Coord::new(4, 3), Coord::new(3, 4));
        assert_eq!(score(Strategy::Lose, &engine, &into_danger), -1e9);
        assert_eq!(score(Strategy::Lose, &engine, &safe), 0.0);
    }

    #[test]
    fn test_stick_ignores_the_moving_piece() {
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ......
             ......
             ......
             ...r..
             ..r...",
            Color::Red,
        )
        .unwrap();
        // (4,3) leaves its only neighbour (5,2) behind
        let away = sequence_from(&engine, Coord::new(4, 3), Coord::new(3, 4));
        assert_eq!(score(Strategy::Stick, &engine, &away), -1.0);
        // (5,2) moves to (4,1): its old neighbour (4,3) is not adjacent any more
        let apart = sequence_from(&engine, Coord::new(5, 2), Coord::new(4, 1));
        assert_eq!(score(Strategy::Stick, &engine, &apart), -1.0);
    }

    #[test]
    fn test_push_and_king_for_men_only() {
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ..r...
             ......
             ...R..
             ......
             ......",
            Color::Red,
        )
        .unwrap();
        let crown = sequence_from(&engine, Coord::new(1, 2), Coord::new(0, 1));
        assert_eq!(score(Strategy::Push, &engine, &crown), 1.0);
        assert_eq!(score(Strategy::King, &engine, &crown), 1.0);

        let king_step = sequence_from(&engine, Coord::new(3, 3), Coord::new(2, 4));
        assert_eq!(score(Strategy::Push, &engine, &king_step), 0.0);
        assert_eq!(score(Strategy::King, &engine, &king_step), 0.0);
    }

    #[test]
    fn test_baseline_penalises_moving_an_anchor() {
        let engine = CheckersEngine::new(2, true).unwrap();
        let anchors: Vec<Coord> = baseline_anchors(Color::Black, 6).collect();
        assert_eq!(anchors, vec![Coord::new(0, 1), Coord::new(0, 5)]);
        let red: Vec<Coord> = baseline_anchors(Color::Red, 6).collect();
        assert_eq!(red, vec![Coord::new(5, 4), Coord::new(5, 0)]);

        let ordinary = &engine.legal_move_sequences(Color::Black)[0];
        assert_eq!(score(Strategy::Baseline, &engine, ordinary), 0.0);
    }

    #[test]
    fn test_center_band() {
        assert!(in_center(Coord::new(3, 2), 8));
        assert!(in_center(Coord::new(4, 5), 8));
        assert!(!in_center(Coord::new(5, 4), 8));
        assert!(!in_center(Coord::new(3, 1), 8));
    }

    #[test]
    fn test_sacrifice_is_never_negative() {
        // Black steps next to a red man that can take it; Black has no capture
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ..b...
             ......
             r.....
             ......
             ......",
            Color::Black,
        )
        .unwrap();
        for sequence in engine.legal_move_sequences(Color::Black) {
            assert!(score(Strategy::Sacrifice, &engine, &sequence) >= 0.0);
        }
        let hanging = sequence_from(&engine, Coord::new(1, 2), Coord::new(2, 1));
        assert!(score(Strategy::Sacrifice, &engine, &hanging) > 0.0);
        let safe = sequence_from(&engine, Coord::new(1, 2), Coord::new(2, 3));
        assert_eq!(score(Strategy::Sacrifice, &engine, &safe), 0.0);
    }

    #[test]
    fn test_force_counts_the_recapture() {
        // Red walks into a capture that Black answers, Red retakes from behind
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ......
             .b....
             ......
             ...r..
             ....r.",
            Color::Red,
        )
        .unwrap();
        let bait = sequence_from(&engine, Coord::new(4, 3), Coord::new(3, 2));
        let look = Lookahead::new(&engine, Color::Red, &bait).unwrap();
        assert_eq!(look.induced.len(), 1);
        assert_eq!(score(Strategy::Force, &engine, &bait), 1.0);
    }

    #[test]
    fn test_chase_needs_a_large_board_and_a_lead() {
        let small = CheckersEngine::new(2, true).unwrap();
        let first = &small.legal_move_sequences(Color::Black)[0];
        assert_eq!(score(Strategy::Chase, &small, first), 0.0);

        let endgame = CheckersEngine::from_layout(
            3,
            "........
             ........
             ........
             ........
             ........
             .......b
             r.r.r...
             ........",
            Color::Red,
        )
        .unwrap();
        let toward = sequence_from(&endgame, Coord::new(6, 4), Coord::new(5, 5));
        let away = sequence_from(&endgame, Coord::new(6, 4), Coord::new(5, 3));
        assert!(score(Strategy::Chase, &endgame, &toward) > 0.0);
        assert!(score(Strategy::Chase, &endgame, &toward) > score(Strategy::Chase, &endgame, &away));
    }

    #[test]
    fn test_corner_needs_an_opponent_nearby() {
        let engine = CheckersEngine::from_layout(
            2,
            ".b....
             ......
             ......
             ......
             ...r..
             ......",
            Color::Red,
        )
        .unwrap();
        let toward = sequence_from(&engine, Coord::new(4, 3), Coord::new(3, 2));
        assert!(score(Strategy::Corner, &engine, &toward) > 0.0);

        let empty_corner = CheckersEngine::from_layout(
            2,
            ".....b
             ......
             ......
             ......
             ...r..
             ......",
            Color::Red,
        )
        .unwrap();
        let step = sequence_from(&empty_corner, Coord::new(4, 3), Coord::new(3, 2));
        assert_eq!(score(Strategy::Corner, &empty_corner, &step), 0.0);
    }

    #[test]
    fn test_capturing_a_king_counts_double() {
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ..b...
             ...R..
             ......
             ......
             r.....",
            Color::Black,
        )
        .unwrap();
        let jump = &engine.legal_move_sequences(Color::Black)[0];
        assert!(jump.is_jump_sequence());
        assert_eq!(score(Strategy::Capture, &engine, jump), 2.0);
    }

    #[test]
    fn test_params_override_lookahead_constants() {
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ......
             .b....
             ......
             ...r..
             ......",
            Color::Red,
        )
        .unwrap();
        let into_danger = sequence_from(&engine, Coord::new(4, 3), Coord::new(3, 2));
        let params = EvalParams::new().win_score(10.0);
        assert_eq!(score_with(&params, Strategy::Lose, &engine, &into_danger), -10.0);
        let blind = EvalParams::new().lose_lookahead_below(1);
        assert_eq!(score_with(&blind, Strategy::Lose, &engine, &into_danger), 0.0);

        // Chase needs an 8-wide board by default; lowering the bar enables it on 6
        let endgame = CheckersEngine::from_layout(
            2,
            "......
             .....b
             ......
             ......
             r.r...
             .r....",
            Color::Red,
        )
        .unwrap();
        let toward = sequence_from(&endgame, Coord::new(4, 2), Coord::new(3, 3));
        assert_eq!(score(Strategy::Chase, &endgame, &toward), 0.0);
        let wide_open = EvalParams::new().chase_min_width(6);
        assert!(score_with(&wide_open, Strategy::Chase, &endgame, &toward) > 0.0);
    }

    #[test]
    fn test_lookahead_errors_are_not_swallowed() {
        let engine = CheckersEngine::from_layout(
            2,
            "......
             ......
             .b....
             ......
             ...r..
             ......",
            Color::Red,
        )
        .unwrap();
        let params = EvalParams::default();
        let ctx = EvalContext::new(&engine, Color::Red, &params);
        let safe = sequence_from(&engine, Coord::new(4, 3), Coord::new(3, 4));
        let mut look = Lookahead::new(&engine, Color::Red, &safe).unwrap();

        let bogus = MoveSequence::step(Coord::new(5, 0), Coord::new(4, 1));
        look.replies.push(bogus.clone());
        assert!(matches!(
            lose(&ctx, &safe, &look),
            Err(EngineError::IllegalMove(_))
        ));

        look.induced = vec![bogus];
        assert!(matches!(
            force(&ctx, &safe, &look),
            Err(EngineError::IllegalMove(_))
        ));
    }
}
