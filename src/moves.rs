//! Move descriptors.
//!
//! A single tagged `Move` covers plain steps, captures and the two sentinel
//! actions a human may play. A `MoveSequence` is what a side actually plays in
//! one turn: one step, or a whole capture chain made by a single piece.

use std::fmt;

use crate::board::Coord;
use crate::piece::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Non-capturing diagonal step.
    Step { from: Coord, to: Coord },
    /// Capture of the opposing piece on `captured`, which lies between `from` and `to`.
    Jump {
        from: Coord,
        to: Coord,
        captured: Coord,
    },
    Resignation(Color),
    DrawOffer(Color),
}

impl Move {
    pub fn from(&self) -> Option<Coord> {
        match *self {
            Move::Step { from, .. } | Move::Jump { from, .. } => Some(from),
            _ => None,
        }
    }

    pub fn to(&self) -> Option<Coord> {
        match *self {
            Move::Step { to, .. } | Move::Jump { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn captured(&self) -> Option<Coord> {
        match *self {
            Move::Jump { captured, .. } => Some(captured),
            _ => None,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Move::Jump { .. })
    }

    /// Resignations and draw offers carry no board delta.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Move::Resignation(_) | Move::DrawOffer(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Step { from, to } => write!(f, "{}-{}", from, to),
            Move::Jump { from, to, captured } => write!(f, "{}x{}[{}]", from, to, captured),
            Move::Resignation(color) => write!(f, "{} resigns", color),
            Move::DrawOffer(color) => write!(f, "{} offers a draw", color),
        }
    }
}

/// One atomic turn. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveSequence {
    moves: Vec<Move>,
}

impl MoveSequence {
    pub(crate) fn step(from: Coord, to: Coord) -> Self {
        Self {
            moves: vec![Move::Step { from, to }],
        }
    }

    /// Chain of jumps; the caller guarantees `jumps` is non-empty and connected.
    pub(crate) fn from_jumps(jumps: Vec<Move>) -> Self {
        debug_assert!(!jumps.is_empty() && jumps.iter().all(Move::is_jump));
        Self { moves: jumps }
    }

    pub fn resignation(color: Color) -> Self {
        Self {
            moves: vec![Move::Resignation(color)],
        }
    }

    pub fn draw_offer(color: Color) -> Self {
        Self {
            moves: vec![Move::DrawOffer(color)],
        }
    }

    pub fn first(&self) -> &Move {
        &self.moves[0]
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Square the moving piece starts from (`None` for sentinels).
    pub fn origin(&self) -> Option<Coord> {
        self.moves.first().and_then(Move::from)
    }

    /// Final landing square (`None` for sentinels).
    pub fn destination(&self) -> Option<Coord> {
        self.moves.last().and_then(Move::to)
    }

    /// Every square visited, origin first.
    pub fn path(&self) -> Vec<Coord> {
        let mut path: Vec<Coord> = self.origin().into_iter().collect();
        path.extend(self.moves.iter().filter_map(Move::to));
        path
    }

    /// Squares of the captured pieces, in capture order.
    pub fn captures(&self) -> impl Iterator<Item = Coord> + '_ {
        self.moves.iter().filter_map(Move::captured)
    }

    pub fn capture_count(&self) -> usize {
        self.captures().count()
    }

    pub fn is_jump_sequence(&self) -> bool {
        self.moves.first().is_some_and(Move::is_jump)
    }

    pub fn is_sentinel(&self) -> bool {
        self.moves.first().is_some_and(Move::is_sentinel)
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}
