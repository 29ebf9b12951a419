use rand::Rng;

use crate::cells::{Cell, Side};
use crate::errors::*;
use crate::units::{Height, Width};

/// Bounds model for the rectangular cell grid. Stateless beyond its two
/// dimensions; corridor connectivity lives in
/// [`CorridorGraph`](crate::graph::CorridorGraph).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RectGrid {
    width: usize,
    height: usize,
}

impl RectGrid {
    pub fn new(width: Width, height: Height) -> Result<RectGrid> {
        if width.0 == 0 || height.0 == 0 {
            return Err(ErrorKind::InvalidDimension(width.0, height.0).into());
        }
        Ok(RectGrid {
            width: width.0,
            height: height.0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> usize {
        self.width * self.height
    }

    pub fn is_valid_coordinate(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    /// A uniformly random cell on the given border of the grid.
    pub fn random_border_cell<R: Rng>(&self, side: Side, rng: &mut R) -> Cell {
        let last_column = self.width as i32 - 1;
        let last_row = self.height as i32 - 1;
        match side {
            Side::Top => Cell::new(rng.gen_range(0..=last_column), 0),
            Side::Bottom => Cell::new(rng.gen_range(0..=last_column), last_row),
            Side::Left => Cell::new(0, rng.gen_range(0..=last_row)),
            Side::Right => Cell::new(last_column, rng.gen_range(0..=last_row)),
        }
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            width: self.width,
            cells_count: self.size(),
        }
    }
}

impl<'a> IntoIterator for &'a RectGrid {
    type Item = Cell;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major walk over every cell coordinate of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    width: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let y = self.current_cell_number / self.width;
            let x = self.current_cell_number - y * self.width;
            self.current_cell_number += 1;
            Some(Cell::new(x as i32, y as i32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
