#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use settings::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod settings;
mod snapshot;
mod types;

/// Committed board configuration: dimensions and how many mines to place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub height: Coord,
    pub width: Coord,
    pub bombs: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(height: Coord, width: Coord, bombs: CellCount) -> Self {
        Self {
            height,
            width,
            bombs,
        }
    }

    pub fn new(height: Coord, width: Coord, bombs: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(height, width, bombs);
        config.validate()?;
        Ok(config)
    }

    /// Checks the board has cells and room for at least one mine-free cell.
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.bombs >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub const fn shape(&self) -> GridShape {
        GridShape::new(self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.height, self.width)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.bombs)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(15, 15, 35)
    }
}

/// Positions of every mine on a board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    shape: GridShape,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_parts(shape: GridShape, mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        Self {
            shape,
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit mine indices, duplicates are counted once.
    pub fn from_mine_indices(shape: GridShape, mine_indices: &[CellIndex]) -> Result<Self> {
        if shape.height == 0 || shape.width == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut mine_mask: Array2<bool> = Array2::default(shape.to_nd_index());
        let mut mine_count: CellCount = 0;

        for &index in mine_indices {
            let pos = shape.coords_of(index)?.to_nd_index();
            if !mine_mask[pos] {
                mine_mask[pos] = true;
                mine_count += 1;
            }
        }

        if mine_count >= shape.total_cells() {
            return Err(GameError::TooManyMines);
        }

        Ok(Self::from_parts(shape, mine_mask, mine_count))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.shape.height, self.shape.width, self.mine_count)
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, index: CellIndex) -> bool {
        self.shape.contains(index) && self[index]
    }

    pub fn mine_indices(&self) -> Vec<CellIndex> {
        self.shape
            .iter_indices()
            .filter(|&index| self[index])
            .collect()
    }
}

impl Index<CellIndex> for MineLayout {
    type Output = bool;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.mine_mask[self.shape.coords_unchecked(index).to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Unchanged,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Result of a reveal or chord, carrying how many cells were newly uncovered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Unchanged,
    Revealed(CellCount),
    Won(CellCount),
    Died,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Unchanged => false,
            Revealed(_) => true,
            Won(_) => true,
            Died => true,
        }
    }

    pub const fn revealed_cells(self) -> CellCount {
        match self {
            Self::Revealed(count) | Self::Won(count) => count,
            Self::Unchanged | Self::Died => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(GameConfig::new(0, 5, 0), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(5, 0, 0), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(1, 1, 1), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::TooManyMines));
        assert!(GameConfig::new(1, 1, 0).is_ok());
        assert!(GameConfig::new(3, 3, 8).is_ok());
    }

    #[test]
    fn presets_and_default_are_valid() {
        for config in [
            GameConfig::default(),
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(GameConfig::default().safe_cells(), 15 * 15 - 35);
    }

    #[test]
    fn config_deserializes_from_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{"height":4,"width":7,"bombs":5}"#).unwrap();

        assert_eq!(config, GameConfig::new_unchecked(4, 7, 5));
        assert_eq!(config.validate(), Ok(()));

        let too_full: GameConfig =
            serde_json::from_str(r#"{"height":2,"width":2,"bombs":4}"#).unwrap();
        assert_eq!(too_full.validate(), Err(GameError::TooManyMines));
    }

    #[test]
    fn layout_from_indices_counts_unique_mines() {
        let layout = MineLayout::from_mine_indices(GridShape::new(2, 3), &[1, 4, 1]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine(4));
        assert!(!layout.contains_mine(0));
        assert!(!layout.contains_mine(99));
        assert_eq!(layout.mine_indices(), [1, 4]);
        assert_eq!(layout.game_config(), GameConfig::new_unchecked(2, 3, 2));
    }

    #[test]
    fn layout_rejects_out_of_range_and_full_boards() {
        let shape = GridShape::new(2, 2);

        assert_eq!(
            MineLayout::from_mine_indices(shape, &[4]),
            Err(GameError::InvalidIndex)
        );
        assert_eq!(
            MineLayout::from_mine_indices(shape, &[0, 1, 2, 3]),
            Err(GameError::TooManyMines)
        );
    }
}
