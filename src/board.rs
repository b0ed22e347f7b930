//! Generic rectangular grid.
//!
//! Nothing in here knows about checkers: the grid stores optional cells,
//! answers bounds/occupancy queries and renders itself as text. The rules
//! engine in `engine.rs` owns a `Board<Piece>` and layers the game on top.

use std::fmt;

use crate::error::EngineError;

/// A (row, column) pair, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed delta. Returns `None` when the result would go below zero;
    /// the upper bound is the grid's business.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Coord { row, col })
    }

    /// Euclidean distance between two squares.
    pub fn distance(self, other: Coord) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid contract: placement, removal and bounds/occupancy queries.
pub trait Grid {
    type Cell;

    fn height(&self) -> usize;
    fn width(&self) -> usize;

    fn get(&self, at: Coord) -> Result<Option<&Self::Cell>, EngineError>;

    /// Store `cell` at `at` (or clear it with `None`), returning what was there.
    fn set(&mut self, at: Coord, cell: Option<Self::Cell>)
        -> Result<Option<Self::Cell>, EngineError>;

    fn is_in_bounds(&self, at: Coord) -> bool {
        at.row < self.height() && at.col < self.width()
    }

    /// `false` for empty squares and for squares off the grid.
    fn is_occupied(&self, at: Coord) -> bool {
        matches!(self.get(at), Ok(Some(_)))
    }
}

/// Dense row-major grid of optional cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<T> {
    height: usize,
    width: usize,
    cells: Vec<Option<T>>,
}

impl<T> Board<T> {
    /// Empty `height` x `width` grid.
    pub fn new(height: usize, width: usize) -> Self {
        let mut cells = Vec::with_capacity(height * width);
        cells.resize_with(height * width, || None);
        Self {
            height,
            width,
            cells,
        }
    }

    fn index(&self, at: Coord) -> Result<usize, EngineError> {
        if at.row < self.height && at.col < self.width {
            Ok(at.row * self.width + at.col)
        } else {
            Err(EngineError::OutOfBounds {
                coord: at,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Remove and return the cell at `at`.
    pub fn take(&mut self, at: Coord) -> Result<Option<T>, EngineError> {
        let i = self.index(at)?;
        Ok(self.cells[i].take())
    }

    /// Occupied cells in row-major order (ascending row, then column).
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|c| (Coord::new(i / width, i % width), c))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl<T: fmt::Display> Board<T> {
    /// One line per row, one character per cell, `.` for empty squares.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<T> Grid for Board<T> {
    type Cell = T;

    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn get(&self, at: Coord) -> Result<Option<&T>, EngineError> {
        let i = self.index(at)?;
        Ok(self.cells[i].as_ref())
    }

    fn set(&mut self, at: Coord, cell: Option<T>) -> Result<Option<T>, EngineError> {
        let i = self.index(at)?;
        Ok(std::mem::replace(&mut self.cells[i], cell))
    }
}

impl<T: fmt::Display> fmt::Display for Board<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            let col = i % self.width;
            if col > 0 {
                write!(f, " ")?;
            }
            match cell {
                Some(c) => write!(f, "{}", c)?,
                None => write!(f, ".")?,
            }
            if col == self.width - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_and_take_round_trip() {
        let mut grid: Board<char> = Board::new(3, 4);
        assert_eq!(grid.set(Coord::new(1, 2), Some('x')).unwrap(), None);
        assert_eq!(grid.get(Coord::new(1, 2)).unwrap(), Some(&'x'));
        assert!(grid.is_occupied(Coord::new(1, 2)));
        assert_eq!(grid.occupied_count(), 1);

        assert_eq!(grid.take(Coord::new(1, 2)).unwrap(), Some('x'));
        assert!(!grid.is_occupied(Coord::new(1, 2)));
    }

    #[test]
    fn test_out_of_bounds_is_reported() {
        let mut grid: Board<char> = Board::new(2, 2);
        let err = grid.get(Coord::new(2, 0)).unwrap_err();
        assert_eq!(
            err,
            EngineError::OutOfBounds {
                coord: Coord::new(2, 0),
                height: 2,
                width: 2
            }
        );
        assert!(grid.set(Coord::new(0, 5), Some('a')).is_err());
        assert!(!grid.is_in_bounds(Coord::new(0, 2)));
        assert!(!grid.is_occupied(Coord::new(9, 9)));
    }

    #[test]
    fn test_occupied_iterates_row_major() {
        let mut grid: Board<u8> = Board::new(3, 3);
        grid.set(Coord::new(2, 0), Some(3)).unwrap();
        grid.set(Coord::new(0, 2), Some(1)).unwrap();
        grid.set(Coord::new(1, 1), Some(2)).unwrap();
        let order: Vec<u8> = grid.occupied().map(|(_, v)| *v).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_render_uses_dots_for_empty_cells() {
        let mut grid: Board<char> = Board::new(2, 3);
        grid.set(Coord::new(0, 1), Some('b')).unwrap();
        assert_eq!(grid.render(), ". b .\n. . .\n");
    }

    #[test]
    fn test_offset_refuses_negative_coordinates() {
        assert_eq!(Coord::new(0, 1).offset(-1, 1), None);
        assert_eq!(Coord::new(1, 1).offset(-1, 1), Some(Coord::new(0, 2)));
    }
}
