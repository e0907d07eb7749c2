use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Rejected draws tolerated on top of four per mine before switching to the walk.
const REJECTION_SLACK: u32 = 64;

/// Seeded placement that keeps the first opened cell free and is otherwise uniformly random.
///
/// Mines are drawn by rejection sampling. When the board is more than half mines, or the
/// rejection budget runs out, the remaining mines are placed by picking the k-th free cell, which
/// never retries.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(&mut self, config: GameConfig, first: CellIndex) -> MineLayout {
        let shape = config.shape();
        let total_cells = shape.total_cells();

        let wanted = if config.bombs >= total_cells {
            log::warn!(
                "Cannot keep first cell safe with {} mines on {} cells, placing {}",
                config.bombs,
                total_cells,
                total_cells.saturating_sub(1)
            );
            total_cells.saturating_sub(1)
        } else {
            config.bombs
        };

        let mut mines: Array2<bool> = Array2::default(shape.to_nd_index());
        let mut mines_placed: CellCount = 0;

        let dense = u32::from(wanted) * 2 > u32::from(total_cells);
        if !dense {
            let budget = u32::from(wanted) * 4 + REJECTION_SLACK;
            let mut rejected = 0;
            while mines_placed < wanted && rejected < budget {
                let index: CellIndex = self.rng.random_range(0..total_cells);
                let pos = shape.coords_unchecked(index).to_nd_index();
                if index == first || mines[pos] {
                    rejected += 1;
                    continue;
                }
                mines[pos] = true;
                mines_placed += 1;
            }

            if mines_placed < wanted {
                log::warn!(
                    "Rejection sampling gave up after {} draws, walking for {} remaining mines",
                    rejected,
                    wanted - mines_placed
                );
            }
        }

        while mines_placed < wanted {
            // every cell except `first` and the mines placed so far
            let free_cells = total_cells - 1 - mines_placed;
            let mut place: CellCount = self.rng.random_range(0..free_cells);
            for index in shape.iter_indices() {
                let pos = shape.coords_unchecked(index).to_nd_index();
                if index == first || mines[pos] {
                    continue;
                }
                if place == 0 {
                    mines[pos] = true;
                    mines_placed += 1;
                    break;
                }
                place -= 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} avoiding cell {}",
            mines_placed,
            shape.height,
            shape.width,
            first
        );
        MineLayout::from_parts(shape, mines, mines_placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(config: GameConfig, seed: u64, first: CellIndex) -> MineLayout {
        RandomMinePlacer::new(seed).place(config, first)
    }

    #[test]
    fn places_exact_count_and_skips_first_cell() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        for seed in 0..50 {
            let first = (seed * 7 % 81) as CellIndex;
            let layout = place(config, seed, first);

            assert_eq!(layout.mine_count(), 10);
            assert_eq!(layout.mine_indices().len(), 10);
            assert!(!layout.contains_mine(first));
        }
    }

    #[test]
    fn dense_board_fills_everything_but_first_cell() {
        let config = GameConfig::new(4, 4, 15).unwrap();
        let layout = place(config, 3, 5);

        assert_eq!(layout.mine_count(), 15);
        assert!(!layout.contains_mine(5));
        for index in (0..16).filter(|&index| index != 5) {
            assert!(layout.contains_mine(index));
        }
    }

    #[test]
    fn zero_mines_leaves_board_empty() {
        let layout = place(GameConfig::new(5, 5, 0).unwrap(), 1, 0);

        assert_eq!(layout.mine_count(), 0);
        assert!(layout.mine_indices().is_empty());
    }

    #[test]
    fn over_full_config_still_leaves_first_cell_free() {
        let config = GameConfig::new_unchecked(2, 2, 4);
        let layout = place(config, 6, 2);

        assert_eq!(layout.mine_count(), 3);
        assert!(!layout.contains_mine(2));
        assert_eq!(layout.mine_indices(), [0, 1, 3]);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::beginner();

        assert_eq!(place(config, 42, 40), place(config, 42, 40));
    }

    #[test]
    fn walk_fallback_handles_half_full_boards() {
        // 13 of 25 is just over half, so only the walk runs
        let config = GameConfig::new(5, 5, 13).unwrap();
        for seed in 0..20 {
            let layout = place(config, seed, 12);
            assert_eq!(layout.mine_count(), 13);
            assert!(!layout.contains_mine(12));
        }
    }
}
