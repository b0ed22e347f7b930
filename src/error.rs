//! Error taxonomy shared by the engine, the bots and the batch evaluator.

use crate::board::Coord;
use crate::piece::Color;

/// Everything the engine can report back to a caller.
///
/// None of these are swallowed internally and the engine never retries on its
/// own: the caller decides whether to re-query, give up, or treat the error as
/// the end of a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Board size rejected at construction time.
    #[error("invalid board size: rows per player must be at least 1 (got {rows_per_player})")]
    Construction { rows_per_player: usize },

    /// The sequence is not legal in the current position; re-query the legal list.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A coordinate outside the grid. Always a caller bug.
    #[error("coordinate {coord} is outside the {height}x{width} board")]
    OutOfBounds {
        coord: Coord,
        height: usize,
        width: usize,
    },

    /// The queried side cannot move: it has lost, or the game is already decided.
    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),

    #[error("there is no move to undo")]
    NothingToUndo,

    /// Malformed text layout handed to `CheckersEngine::from_layout`.
    #[error("invalid layout: {0}")]
    Layout(String),
}
