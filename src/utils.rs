// Diagonal direction tables and small geometry helpers for move generation and scoring

use crate::board::Coord;
use crate::piece::Color;

// (d_row, d_col). Order matters: it fixes the order sequences are generated in.
pub const NORTH_WEST: (isize, isize) = (-1, -1);
pub const NORTH_EAST: (isize, isize) = (-1, 1);
pub const SOUTH_WEST: (isize, isize) = (1, -1);
pub const SOUTH_EAST: (isize, isize) = (1, 1);

pub const KING_DIRECTIONS: [(isize, isize); 4] = [NORTH_WEST, NORTH_EAST, SOUTH_WEST, SOUTH_EAST];
const BLACK_MAN_DIRECTIONS: [(isize, isize); 2] = [SOUTH_WEST, SOUTH_EAST];
const RED_MAN_DIRECTIONS: [(isize, isize); 2] = [NORTH_WEST, NORTH_EAST];

/// Directions a piece may move in.
#[inline]
pub fn directions(color: Color, king: bool) -> &'static [(isize, isize)] {
    if king {
        &KING_DIRECTIONS
    } else {
        match color {
            Color::Black => &BLACK_MAN_DIRECTIONS,
            Color::Red => &RED_MAN_DIRECTIONS,
        }
    }
}

/// The four diagonal neighbours of `at` that do not underflow (upper bound unchecked).
pub fn diagonal_neighbours(at: Coord) -> impl Iterator<Item = Coord> {
    KING_DIRECTIONS
        .into_iter()
        .filter_map(move |(dr, dc)| at.offset(dr, dc))
}

/// Squares one and two steps away along a direction: (jumped square, landing square).
#[inline]
pub fn jump_squares(at: Coord, (dr, dc): (isize, isize)) -> Option<(Coord, Coord)> {
    Some((at.offset(dr, dc)?, at.offset(2 * dr, 2 * dc)?))
}

/// Row where a man of `color` is crowned on a board of `side` rows.
#[inline]
pub fn crowning_row(color: Color, side: usize) -> usize {
    match color {
        Color::Black => side - 1,
        Color::Red => 0,
    }
}

/// Pieces' starting squares are the dark squares, i.e. `(row + col)` odd.
#[inline]
pub fn is_dark(at: Coord) -> bool {
    (at.row + at.col) % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_men_only_move_forward() {
        assert!(directions(Color::Black, false).iter().all(|&(dr, _)| dr == 1));
        assert!(directions(Color::Red, false).iter().all(|&(dr, _)| dr == -1));
        assert_eq!(directions(Color::Red, true).len(), 4);
    }

    #[test]
    fn test_neighbours_skip_underflow() {
        let n: Vec<Coord> = diagonal_neighbours(Coord::new(0, 0)).collect();
        assert_eq!(n, vec![Coord::new(1, 1)]);
    }

    #[test]
    fn test_jump_squares_two_steps() {
        assert_eq!(
            jump_squares(Coord::new(2, 2), SOUTH_EAST),
            Some((Coord::new(3, 3), Coord::new(4, 4)))
        );
        assert_eq!(jump_squares(Coord::new(1, 1), NORTH_WEST), None);
    }
}
