//! Board layout representation and winner detection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::LayoutKey,
};

/// Marker used for vacant cells in serialized layouts
pub const EMPTY_GLYPH: char = '.';

/// One of the two marks that can occupy a cell.
///
/// `Mark::ALL` fixes the declared order: the first entry is the mark that
/// opens every game, and winner detection checks marks in this order, which
/// makes the (unreachable in real play) simultaneous-win layout resolve
/// reproducibly to the first mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Both marks in declared order
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Index of this mark in the declared order
    pub fn index(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }

    /// Canonical serialization character (independent of display glyphs)
    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'x',
            Mark::O => 'o',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Taken(Mark),
}

impl Cell {
    fn to_char(self) -> char {
        match self {
            Cell::Empty => EMPTY_GLYPH,
            Cell::Taken(mark) => mark.to_char(),
        }
    }
}

/// A single board layout: `size * size` cells in row-major order.
///
/// Grids are value types. Placing a mark returns a new grid; the original is
/// never mutated, which keeps every registered layout in the position graph
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid with the given edge length.
    pub fn empty(size: usize) -> Self {
        Grid {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Board edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cell at an index.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Indices of all vacant cells, in ascending order.
    pub fn vacant_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Check whether every cell is taken.
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Number of taken cells.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Place a mark on a vacant cell, returning the resulting grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfBounds`] or [`Error::CellTaken`].
    #[must_use = "place returns a new grid; the original is unchanged"]
    pub fn place(&self, index: usize, mark: Mark) -> Result<Grid> {
        match self.cells.get(index) {
            None => Err(Error::CellOutOfBounds {
                index,
                size: self.size,
            }),
            Some(Cell::Taken(_)) => Err(Error::CellTaken { index }),
            Some(Cell::Empty) => {
                let mut next = self.clone();
                next.cells[index] = Cell::Taken(mark);
                Ok(next)
            }
        }
    }

    /// The winning mark, if any line is fully occupied by one mark.
    ///
    /// Marks are checked in `Mark::ALL` order, so a layout where both marks
    /// hold a complete line (impossible in legal play) resolves to the first
    /// declared mark.
    pub fn winner(&self) -> Option<Mark> {
        Mark::ALL.into_iter().find(|&mark| self.has_line(mark))
    }

    /// Check whether a mark owns a complete row, column, or diagonal.
    pub fn has_line(&self, mark: Mark) -> bool {
        let n = self.size;
        let taken = |index: usize| self.cells[index] == Cell::Taken(mark);

        for i in 0..n {
            if (0..n).all(|j| taken(i * n + j)) || (0..n).all(|j| taken(j * n + i)) {
                return true;
            }
        }

        (0..n).all(|i| taken(i * n + i)) || (0..n).all(|i| taken(i * n + (n - 1 - i)))
    }

    /// Canonical serialization used as the graph key.
    pub fn key(&self) -> LayoutKey {
        LayoutKey::new(self.cells.iter().map(|c| c.to_char()).collect::<String>())
    }

    /// Render the grid with the given display glyphs, one row per line.
    pub fn render(&self, glyphs: [char; 2]) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size);
        for (i, cell) in self.cells.iter().enumerate() {
            out.push(match cell {
                Cell::Empty => EMPTY_GLYPH,
                Cell::Taken(mark) => glyphs[mark.index()],
            });
            if (i + 1).is_multiple_of(self.size) && i + 1 < self.cells.len() {
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(['x', 'o']))
    }
}
