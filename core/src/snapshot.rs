use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned, read-only picture of a session for a presentation layer to draw from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub config: GameConfig,
    pub state: EngineState,
    pub flag_count: CellCount,
    pub mines_left: isize,
    pub cells: Array2<CellDisplay>,
}

impl BoardSnapshot {
    pub fn from_engine<P: MinePlacer>(engine: &GridEngine<P>) -> Self {
        let shape = engine.shape();
        let mut cells = Array2::from_elem(shape.to_nd_index(), CellDisplay::Covered);

        for view in engine.cells() {
            cells[shape.coords_unchecked(view.index).to_nd_index()] = view.display;
        }

        Self {
            config: engine.config(),
            state: engine.state(),
            flag_count: engine.flag_count(),
            mines_left: engine.mines_left(),
            cells,
        }
    }

    pub fn shape(&self) -> GridShape {
        self.config.shape()
    }

    pub fn display_at(&self, index: CellIndex) -> Result<CellDisplay> {
        let coords = self.shape().coords_of(index)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn covered_count(&self) -> usize {
        self.cells.iter().filter(|display| display.is_covered()).count()
    }
}

impl<P: MinePlacer> GridEngine<P> {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_engine(self)
    }
}
