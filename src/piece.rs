use std::fmt;

use crate::board::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 0,
    Red = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::Red];

    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row direction of a man of this color: Black starts at the top and moves down.
    #[inline]
    pub fn forward(self) -> isize {
        match self {
            Color::Black => 1,
            Color::Red => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::Red => write!(f, "Red"),
        }
    }
}

/// A checker on the board.
///
/// The piece keeps its own position in sync with the cell that owns it: the
/// engine moves the same value from cell to cell instead of recreating it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    king: bool,
    position: Coord,
}

impl Piece {
    pub fn new(color: Color, position: Coord) -> Self {
        Self {
            color,
            king: false,
            position,
        }
    }

    pub fn king(color: Color, position: Coord) -> Self {
        Self {
            color,
            king: true,
            position,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_king(&self) -> bool {
        self.king
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Coord) {
        self.position = position;
    }

    pub(crate) fn crown(&mut self) {
        self.king = true;
    }

    /// Layout character: `b`/`r` for men, `B`/`R` for kings.
    pub fn symbol(&self) -> char {
        match (self.color, self.king) {
            (Color::Black, false) => 'b',
            (Color::Black, true) => 'B',
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
