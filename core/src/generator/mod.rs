use crate::*;
pub use random::*;

mod random;

/// Decides where mines go once the first cell to open is known.
///
/// Implementations must return a layout shaped like `config` holding exactly `config.bombs`
/// mines, none of them at `first`.
pub trait MinePlacer {
    fn place(&mut self, config: GameConfig, first: CellIndex) -> MineLayout;
}
