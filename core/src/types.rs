use serde::{Deserialize, Serialize};

use crate::*;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major linear position of a cell, `row * width + col`.
pub type CellIndex = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Board dimensions, the only thing needed to derive adjacency.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub height: Coord,
    pub width: Coord,
}

impl GridShape {
    pub const fn new(height: Coord, width: Coord) -> Self {
        Self { height, width }
    }

    pub const fn total_cells(self) -> CellCount {
        mult(self.height, self.width)
    }

    pub fn to_nd_index(self) -> [usize; 2] {
        [self.height.into(), self.width.into()]
    }

    pub fn contains(self, index: CellIndex) -> bool {
        index < self.total_cells()
    }

    pub fn validate_index(self, index: CellIndex) -> Result<CellIndex> {
        if self.contains(index) {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn index_of(self, (row, col): Coord2) -> Result<CellIndex> {
        if row < self.height && col < self.width {
            Ok(CellIndex::from(row) * CellIndex::from(self.width) + CellIndex::from(col))
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    /// Caller guarantees `index` is in bounds.
    pub(crate) fn coords_unchecked(self, index: CellIndex) -> Coord2 {
        let width = CellIndex::from(self.width.max(1));
        // both quotient and remainder fit in a Coord for in-bounds indices
        ((index / width) as Coord, (index % width) as Coord)
    }

    pub fn coords_of(self, index: CellIndex) -> Result<Coord2> {
        let index = self.validate_index(index)?;
        Ok(self.coords_unchecked(index))
    }

    pub fn iter_neighbors(self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(self.coords_unchecked(index), self)
    }

    pub fn iter_indices(self) -> impl Iterator<Item = CellIndex> {
        0..self.total_cells()
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), shape: GridShape) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= shape.height {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= shape.width {
        return None;
    }

    Some((next_row, next_col))
}

/// Up to eight in-bounds neighbors of a cell, yielded as linear indices.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    shape: GridShape,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, shape: GridShape) -> Self {
        Self {
            center,
            shape,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.shape);
            self.index += 1;

            if let Some((row, col)) = next_item {
                let width = CellIndex::from(self.shape.width);
                return Some(CellIndex::from(row) * width + CellIndex::from(col));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_are_clipped_at_corners_and_edges() {
        let shape = GridShape::new(3, 4);

        let corner: Vec<_> = shape.iter_neighbors(0).collect();
        assert_eq!(corner, [1, 4, 5]);

        let edge: Vec<_> = shape.iter_neighbors(1).collect();
        assert_eq!(edge, [0, 2, 4, 5, 6]);

        let center: Vec<_> = shape.iter_neighbors(5).collect();
        assert_eq!(center, [0, 1, 2, 4, 6, 8, 9, 10]);

        let last: Vec<_> = shape.iter_neighbors(11).collect();
        assert_eq!(last, [6, 7, 10]);
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        assert_eq!(GridShape::new(1, 1).iter_neighbors(0).count(), 0);
    }

    #[test]
    fn single_row_only_has_horizontal_neighbors() {
        let neighbors: Vec<_> = GridShape::new(1, 5).iter_neighbors(2).collect();
        assert_eq!(neighbors, [1, 3]);
    }

    #[test]
    fn index_and_coords_round_trip_row_major() {
        let shape = GridShape::new(2, 3);

        assert_eq!(shape.index_of((1, 0)), Ok(3));
        assert_eq!(shape.coords_of(5), Ok((1, 2)));
        assert_eq!(shape.index_of((2, 0)), Err(GameError::InvalidIndex));
        assert_eq!(shape.coords_of(6), Err(GameError::InvalidIndex));
    }
}
