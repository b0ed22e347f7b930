//! Checkers rules on top of the generic grid.
//!
//! `CheckersEngine` owns one `Board<Piece>` per game and implements legal move
//! enumeration (forced capture, maximal jump chains), crowning, capture
//! bookkeeping, the no-capture draw clock, a per-color move cache and a single
//! level of undo.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, trace};

use crate::board::{Board, Coord, Grid};
use crate::error::EngineError;
use crate::moves::{Move, MoveSequence};
use crate::piece::{Color, Piece};
use crate::utils::{crowning_row, directions, is_dark, jump_squares};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Win(Color),
    Draw,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Win(color) => write!(f, "{} wins", color),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// Pieces captured *by* each color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapturedCounts {
    pub black: u32,
    pub red: u32,
}

impl CapturedCounts {
    pub fn by(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::Red => self.red,
        }
    }
}

/// Largest accepted board: 1024 squares per side.
pub const MAX_ROWS_PER_PLAYER: usize = 511;

/// Moves allowed between captures before the game is drawn.
///
/// Grows roughly with the number of reachable positions so large boards are not
/// cut short: `round(2.2 * rows^2.2 + 10)`.
pub fn calc_draw_timeout(rows_per_player: usize) -> u32 {
    (2.2 * (rows_per_player as f64).powf(2.2) + 10.0).round() as u32
}

// Cache slot tagged with the engine version it was computed at
#[derive(Debug, Clone, Default)]
struct CacheSlot {
    version: u64,
    sequences: Option<Vec<MoveSequence>>,
}

// Everything needed to roll back one apply_move
#[derive(Debug, Clone)]
struct Undo {
    sequence: MoveSequence,
    // The moving piece as it stood before the move; None for sentinels
    mover: Option<Piece>,
    captured: Vec<Piece>,
    prev_turn: Color,
    prev_status: GameStatus,
    prev_moves_since_capture: u32,
    prev_captured: [u32; 2],
    prev_draw_offers: [bool; 2],
}

#[derive(Debug, Clone)]
pub struct CheckersEngine {
    board: Board<Piece>,
    rows_per_player: usize,
    turn: Color,
    status: GameStatus,
    moves_since_capture: u32,
    draw_timeout: u32,
    captured: [u32; 2],
    draw_offers: [bool; 2],
    caching: bool,
    // Bumped on every board mutation; cache slots from older versions are stale
    version: u64,
    cache: RefCell<[CacheSlot; 2]>,
    last: Option<Undo>,
}

impl CheckersEngine {
    /// New game in the starting position. Black moves first.
    ///
    /// # Arguments
    /// * `rows_per_player` - rows of men per side; the board is `2 * (rows + 1)` squares wide
    /// * `caching` - keep the last computed legal list per color
    pub fn new(rows_per_player: usize, caching: bool) -> Result<Self, EngineError> {
        let side = board_side(rows_per_player)?;
        let mut board = Board::new(side, side);

        for row in 0..side {
            let color = if row < rows_per_player {
                Color::Black
            } else if row >= side - rows_per_player {
                Color::Red
            } else {
                continue;
            };
            for col in 0..side {
                let at = Coord::new(row, col);
                if is_dark(at) {
                    board.set(at, Some(Piece::new(color, at)))?;
                }
            }
        }

        Ok(Self::with_board(rows_per_player, board, Color::Black, caching))
    }

    /// Position from a text diagram, one line per row: `b`/`r` men, `B`/`R` kings, `.` empty.
    /// Whitespace inside a line is ignored and blank lines are skipped.
    ///
    /// The move cache starts enabled; chain `with_caching(false)` to turn it off.
    pub fn from_layout(
        rows_per_player: usize,
        layout: &str,
        to_move: Color,
    ) -> Result<Self, EngineError> {
        let side = board_side(rows_per_player)?;
        let mut board = Board::new(side, side);

        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() != side {
            return Err(EngineError::Layout(format!(
                "expected {} rows, found {}",
                side,
                lines.len()
            )));
        }

        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != side {
                return Err(EngineError::Layout(format!(
                    "row {} has {} squares, expected {}",
                    row,
                    cells.len(),
                    side
                )));
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let at = Coord::new(row, col);
                let piece = match ch {
                    '.' => continue,
                    'b' => Piece::new(Color::Black, at),
                    'r' => Piece::new(Color::Red, at),
                    'B' => Piece::king(Color::Black, at),
                    'R' => Piece::king(Color::Red, at),
                    other => {
                        return Err(EngineError::Layout(format!(
                            "unknown square '{}' at {}",
                            other, at
                        )))
                    }
                };
                board.set(at, Some(piece))?;
            }
        }

        let mut engine = Self::with_board(rows_per_player, board, to_move, true);
        if engine.legal_move_sequences(to_move).is_empty() {
            engine.status = GameStatus::Win(to_move.opponent());
        }
        Ok(engine)
    }

    fn with_board(rows_per_player: usize, board: Board<Piece>, turn: Color, caching: bool) -> Self {
        Self {
            board,
            rows_per_player,
            turn,
            status: GameStatus::InProgress,
            moves_since_capture: 0,
            draw_timeout: calc_draw_timeout(rows_per_player),
            captured: [0; 2],
            draw_offers: [false; 2],
            caching,
            version: 0,
            cache: RefCell::new(Default::default()),
            last: None,
        }
    }

    /// Enable or disable the move cache (builder style).
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self.invalidate();
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn rows_per_player(&self) -> usize {
        self.rows_per_player
    }

    /// Board side length (the board is square).
    pub fn side(&self) -> usize {
        self.board.width()
    }

    pub fn board(&self) -> &Board<Piece> {
        &self.board
    }

    /// Color to move next.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves_since_capture(&self) -> u32 {
        self.moves_since_capture
    }

    pub fn draw_timeout(&self) -> u32 {
        self.draw_timeout
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn can_undo(&self) -> bool {
        self.last.is_some()
    }

    pub fn pending_draw_offer(&self, color: Color) -> bool {
        self.draw_offers[color.index()]
    }

    /// Piece on `at`; `None` for empty or off-board squares.
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.board.get(at).ok().flatten()
    }

    /// Live pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.board
            .occupied()
            .map(|(_, p)| p)
            .filter(move |p| p.color() == color)
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    pub fn captured_piece_counts(&self) -> CapturedCounts {
        CapturedCounts {
            black: self.captured[Color::Black.index()],
            red: self.captured[Color::Red.index()],
        }
    }

    pub fn render(&self) -> String {
        self.board.render()
    }

    // ------------------------------------------------------------------
    // Move generation
    // ------------------------------------------------------------------

    /// Every legal sequence for `color`, in a deterministic order.
    ///
    /// Origins are visited by ascending row then column; chains are discovered
    /// depth-first over the direction table. When any piece of `color` can
    /// capture, only capture chains are returned.
    pub fn legal_move_sequences(&self, color: Color) -> Vec<MoveSequence> {
        if self.caching {
            let cache = self.cache.borrow();
            let slot = &cache[color.index()];
            if slot.version == self.version {
                if let Some(sequences) = &slot.sequences {
                    trace!(%color, version = self.version, "move cache hit");
                    return sequences.clone();
                }
            }
        }

        let sequences = self.generate(color);

        if self.caching {
            trace!(%color, version = self.version, count = sequences.len(), "move cache fill");
            self.cache.borrow_mut()[color.index()] = CacheSlot {
                version: self.version,
                sequences: Some(sequences.clone()),
            };
        }
        sequences
    }

    fn generate(&self, color: Color) -> Vec<MoveSequence> {
        let mut steps = Vec::new();
        let mut jumps = Vec::new();

        for (_, piece) in self.board.occupied() {
            if piece.color() != color {
                continue;
            }
            self.generate_jumps(piece, &mut jumps);
            // Steps are pointless once any capture exists
            if jumps.is_empty() {
                self.generate_steps(piece, &mut steps);
            }
        }

        if jumps.is_empty() {
            steps
        } else {
            jumps
        }
    }

    fn generate_steps(&self, piece: &Piece, out: &mut Vec<MoveSequence>) {
        let from = piece.position();
        for &(dr, dc) in directions(piece.color(), piece.is_king()) {
            let Some(to) = from.offset(dr, dc) else {
                continue;
            };
            if self.board.is_in_bounds(to) && !self.board.is_occupied(to) {
                out.push(MoveSequence::step(from, to));
            }
        }
    }

    fn generate_jumps(&self, piece: &Piece, out: &mut Vec<MoveSequence>) {
        let mut path = Vec::new();
        let mut lifted = Vec::new();
        self.extend_chain(piece, piece.position(), &mut path, &mut lifted, out);
    }

    // Depth-first over capture chains. Jumped pieces are lifted immediately and
    // the origin counts as empty, so neither blocks a later landing.
    fn extend_chain(
        &self,
        piece: &Piece,
        at: Coord,
        path: &mut Vec<Move>,
        lifted: &mut Vec<Coord>,
        out: &mut Vec<MoveSequence>,
    ) {
        let origin = piece.position();
        let crowned_here = !piece.is_king()
            && !path.is_empty()
            && at.row == crowning_row(piece.color(), self.side());

        let mut extended = false;
        if !crowned_here {
            for &dir in directions(piece.color(), piece.is_king()) {
                let Some((over, land)) = jump_squares(at, dir) else {
                    continue;
                };
                if !self.board.is_in_bounds(land) {
                    continue;
                }
                match self.occupant(over, origin, lifted) {
                    Some(victim) if victim.color() != piece.color() => {}
                    _ => continue,
                }
                if self.occupant(land, origin, lifted).is_some() {
                    continue;
                }

                path.push(Move::Jump {
                    from: at,
                    to: land,
                    captured: over,
                });
                lifted.push(over);
                self.extend_chain(piece, land, path, lifted, out);
                lifted.pop();
                path.pop();
                extended = true;
            }
        }

        if !extended && !path.is_empty() {
            out.push(MoveSequence::from_jumps(path.clone()));
        }
    }

    fn occupant(&self, at: Coord, origin: Coord, lifted: &[Coord]) -> Option<&Piece> {
        if at == origin || lifted.contains(&at) {
            None
        } else {
            self.piece_at(at)
        }
    }

    // ------------------------------------------------------------------
    // Move application
    // ------------------------------------------------------------------

    /// Play one turn for the side to move.
    ///
    /// Board sequences must appear in `legal_move_sequences(turn)`, otherwise
    /// `IllegalMove` is returned and nothing changes. Resignations end the game;
    /// draw offers are recorded without passing the turn and become a draw when
    /// both sides have offered.
    ///
    /// # Returns
    /// The game status after the move.
    pub fn apply_move(&mut self, sequence: &MoveSequence) -> Result<GameStatus, EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::IllegalMove(format!(
                "the game is over ({})",
                self.status
            )));
        }

        match *sequence.first() {
            Move::Resignation(color) => {
                let undo = self.undo_entry(sequence, None);
                self.status = GameStatus::Win(color.opponent());
                self.last = Some(undo);
                debug!(%color, "resignation");
                return Ok(self.status);
            }
            Move::DrawOffer(color) => {
                if self.draw_offers[color.index()] {
                    return Err(EngineError::IllegalMove(format!(
                        "{} already has a pending draw offer",
                        color
                    )));
                }
                let undo = self.undo_entry(sequence, None);
                self.draw_offers[color.index()] = true;
                if self.draw_offers[color.opponent().index()] {
                    self.status = GameStatus::Draw;
                }
                self.last = Some(undo);
                debug!(%color, status = %self.status, "draw offer");
                return Ok(self.status);
            }
            Move::Step { .. } | Move::Jump { .. } => {}
        }

        if !self.legal_move_sequences(self.turn).contains(sequence) {
            debug!(turn = %self.turn, %sequence, "rejected illegal sequence");
            return Err(EngineError::IllegalMove(format!(
                "{} is not a legal sequence for {}",
                sequence, self.turn
            )));
        }

        let undo = self.play(sequence)?;
        self.last = Some(undo);
        Ok(self.status)
    }

    /// Revert the most recent `apply_move`. Only one level is kept.
    pub fn undo_move(&mut self) -> Result<GameStatus, EngineError> {
        let undo = self.last.take().ok_or(EngineError::NothingToUndo)?;

        if let Some(mover) = undo.mover {
            if let Some(destination) = undo.sequence.destination() {
                self.board.take(destination)?;
            }
            let origin = mover.position();
            self.board.set(origin, Some(mover))?;
            for victim in undo.captured {
                let at = victim.position();
                self.board.set(at, Some(victim))?;
            }
            self.invalidate();
        }

        self.turn = undo.prev_turn;
        self.status = undo.prev_status;
        self.moves_since_capture = undo.prev_moves_since_capture;
        self.captured = undo.prev_captured;
        self.draw_offers = undo.prev_draw_offers;

        debug!(sequence = %undo.sequence, "undo");
        Ok(self.status)
    }

    /// Copy of this position with `sequence` played, without touching `self`.
    ///
    /// The sequence is not checked against the legal list, only against the
    /// board (occupied origin, free landing, opposing pieces on capture squares).
    pub fn after(&self, sequence: &MoveSequence) -> Result<CheckersEngine, EngineError> {
        let mut next = self.fork();
        next.play(sequence)?;
        Ok(next)
    }

    // Same position, empty cache, no undo history
    fn fork(&self) -> CheckersEngine {
        CheckersEngine {
            board: self.board.clone(),
            rows_per_player: self.rows_per_player,
            turn: self.turn,
            status: self.status,
            moves_since_capture: self.moves_since_capture,
            draw_timeout: self.draw_timeout,
            captured: self.captured,
            draw_offers: self.draw_offers,
            caching: self.caching,
            version: self.version,
            cache: RefCell::new(Default::default()),
            last: None,
        }
    }

    fn undo_entry(&self, sequence: &MoveSequence, mover: Option<Piece>) -> Undo {
        Undo {
            sequence: sequence.clone(),
            mover,
            captured: Vec::new(),
            prev_turn: self.turn,
            prev_status: self.status,
            prev_moves_since_capture: self.moves_since_capture,
            prev_captured: self.captured,
            prev_draw_offers: self.draw_offers,
        }
    }

    // Checks that the board can carry the sequence out; nothing is mutated
    fn check_playable(&self, sequence: &MoveSequence) -> Result<(Coord, Coord, Color), EngineError> {
        let (Some(origin), Some(destination)) = (sequence.origin(), sequence.destination()) else {
            return Err(EngineError::IllegalMove(
                "sentinel moves carry no board change".to_string(),
            ));
        };
        let color = self
            .board
            .get(origin)?
            .map(Piece::color)
            .ok_or_else(|| EngineError::IllegalMove(format!("no piece on {}", origin)))?;
        if destination != origin && self.board.get(destination)?.is_some() {
            return Err(EngineError::IllegalMove(format!(
                "landing square {} is occupied",
                destination
            )));
        }
        for at in sequence.captures() {
            match self.board.get(at)? {
                Some(victim) if victim.color() != color => {}
                _ => {
                    return Err(EngineError::IllegalMove(format!(
                        "no opposing piece to capture on {}",
                        at
                    )))
                }
            }
        }
        Ok((origin, destination, color))
    }

    // Carries out a board sequence, flips the turn and recomputes the status
    fn play(&mut self, sequence: &MoveSequence) -> Result<Undo, EngineError> {
        let (origin, destination, color) = self.check_playable(sequence)?;

        let mut piece = self
            .board
            .take(origin)?
            .ok_or_else(|| EngineError::IllegalMove(format!("no piece on {}", origin)))?;
        let mut undo = self.undo_entry(sequence, Some(piece.clone()));

        for at in sequence.captures() {
            if let Some(victim) = self.board.take(at)? {
                undo.captured.push(victim);
            }
        }

        piece.set_position(destination);
        if !piece.is_king() && destination.row == crowning_row(color, self.side()) {
            piece.crown();
        }
        self.board.set(destination, Some(piece))?;

        let taken = undo.captured.len() as u32;
        self.captured[color.index()] += taken;
        if taken > 0 {
            self.moves_since_capture = 0;
        } else {
            self.moves_since_capture += 1;
        }
        // Moving on declines the opponent's pending offer
        self.draw_offers[color.opponent().index()] = false;
        self.turn = color.opponent();
        self.invalidate();
        self.status = self.compute_status(color);

        debug!(%color, %sequence, captured = taken, status = %self.status, "sequence applied");
        Ok(undo)
    }

    fn compute_status(&self, mover: Color) -> GameStatus {
        if self.legal_move_sequences(mover.opponent()).is_empty() {
            GameStatus::Win(mover)
        } else if self.moves_since_capture >= self.draw_timeout {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    fn invalidate(&mut self) {
        self.version += 1;
    }
}

impl fmt::Display for CheckersEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move, {}", self.turn, self.status)
    }
}

fn board_side(rows_per_player: usize) -> Result<usize, EngineError> {
    if !(1..=MAX_ROWS_PER_PLAYER).contains(&rows_per_player) {
        return Err(EngineError::Construction { rows_per_player });
    }
    rows_per_player
        .checked_add(1)
        .and_then(|r| r.checked_mul(2))
        .ok_or(EngineError::Construction { rows_per_player })
}

/// Number of leaves of the move-sequence tree `depth` turns deep.
/// Finished games count as a single leaf.
pub fn perft(engine: &CheckersEngine, depth: u32) -> Result<u64, EngineError> {
    if depth == 0 || engine.status() != GameStatus::InProgress {
        return Ok(1);
    }
    let mut nodes = 0u64;
    for sequence in engine.legal_move_sequences(engine.turn()) {
        nodes += perft(&engine.after(&sequence)?, depth - 1)?;
    }
    Ok(nodes)
}
