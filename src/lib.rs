pub mod arena;
pub mod board;
pub mod bot;
pub mod engine;
pub mod error;
pub mod eval;
pub mod moves;
pub mod piece;
pub mod utils;

pub use board::{Board, Coord, Grid};
pub use engine::{
    calc_draw_timeout, perft, CapturedCounts, CheckersEngine, GameStatus, MAX_ROWS_PER_PLAYER,
};
pub use error::EngineError;
pub use moves::{Move, MoveSequence};
pub use piece::{Color, Piece};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the default `warn` level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
