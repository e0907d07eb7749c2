use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No mines placed yet, waiting for the first reveal
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One game session: the grid, its lifecycle flags and the placer used to lay mines.
///
/// Mines are placed lazily on the first reveal so the first opened cell is always safe. Every
/// mutating call validates the index, then silently ignores moves that make no sense in the
/// current state (opening a flagged cell, anything after the game ended, ...).
#[derive(Clone, Debug)]
pub struct GridEngine<P = RandomMinePlacer> {
    config: GameConfig,
    cells: Array2<Cell>,
    placer: P,
    populated: bool,
    died: bool,
    flag_count: CellCount,
    revealed_count: CellCount,
}

impl GridEngine<RandomMinePlacer> {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_placer(config, RandomMinePlacer::new(seed))
    }
}

impl<P: MinePlacer> GridEngine<P> {
    pub fn with_placer(config: GameConfig, placer: P) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "New {}x{} session with {} mines",
            config.height,
            config.width,
            config.bombs
        );
        Ok(Self {
            config,
            cells: Array2::default(config.shape().to_nd_index()),
            placer,
            populated: false,
            died: false,
            flag_count: 0,
            revealed_count: 0,
        })
    }

    /// Starts an already populated session, `placer` is only used after a reset.
    pub fn from_layout(layout: MineLayout, placer: P) -> Self {
        let config = layout.game_config();
        let mut engine = Self {
            config,
            cells: Array2::default(config.shape().to_nd_index()),
            placer,
            populated: false,
            died: false,
            flag_count: 0,
            revealed_count: 0,
        };
        engine.apply_layout(&layout);
        engine
    }

    /// Throws the current session away and starts a fresh one.
    ///
    /// An invalid `config` leaves the current session untouched.
    pub fn reset(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        log::debug!(
            "Reset to {}x{} with {} mines",
            config.height,
            config.width,
            config.bombs
        );
        self.config = config;
        self.cells = Array2::default(config.shape().to_nd_index());
        self.populated = false;
        self.died = false;
        self.flag_count = 0;
        self.revealed_count = 0;
        Ok(())
    }

    /// Resets with the current configuration.
    pub fn restart(&mut self) {
        let config = self.config;
        // the current config was validated when it was committed
        if let Err(err) = self.reset(config) {
            log::warn!("Restart rejected current config: {}", err);
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn shape(&self) -> GridShape {
        self.config.shape()
    }

    pub fn state(&self) -> EngineState {
        if self.died {
            EngineState::Lost
        } else if self.check_win() {
            EngineState::Won
        } else if self.populated {
            EngineState::Active
        } else {
            EngineState::Ready
        }
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn died(&self) -> bool {
        self.died
    }

    /// Every safe cell is uncovered and no mine went off.
    pub fn check_win(&self) -> bool {
        !self.died && self.populated && self.revealed_count == self.config.safe_cells()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.config.bombs as isize) - (self.flag_count as isize)
    }

    /// Safe cells uncovered so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn index_of(&self, coords: Coord2) -> Result<CellIndex> {
        self.shape().index_of(coords)
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        self.shape().coords_of(index)
    }

    pub fn cell(&self, index: CellIndex) -> Result<CellView> {
        let index = self.shape().validate_index(index)?;
        Ok(CellView::new(index, self.at(index)))
    }

    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.shape()
            .iter_indices()
            .map(move |index| CellView::new(index, self.at(index)))
    }

    /// Whether a chord at `index` would currently be accepted.
    pub fn can_chord_reveal(&self, index: CellIndex) -> bool {
        if !self.shape().contains(index) || self.state().is_finished() {
            return false;
        }

        let cell = self.at(index);
        match cell.adjacent {
            Some(count) if cell.visible && !cell.flagged => {
                count == self.count_flagged_neighbors(index)
            }
            _ => false,
        }
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        let index = self.shape().validate_index(index)?;

        if self.state().is_finished() || self.at(index).visible {
            return Ok(MarkOutcome::Unchanged);
        }

        let cell = self.at_mut(index);
        cell.flagged = !cell.flagged;
        let flagged = cell.flagged;

        Ok(if flagged {
            self.flag_count += 1;
            MarkOutcome::Flagged
        } else {
            self.flag_count -= 1;
            MarkOutcome::Unflagged
        })
    }

    /// Primary action: opens a covered cell, flooding through cells with no adjacent mines.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.shape().validate_index(index)?;

        if self.state().is_finished() || !self.at(index).is_openable() {
            return Ok(RevealOutcome::Unchanged);
        }

        if !self.populated {
            self.populate(index)?;
        }

        if self.at(index).is_mine() {
            self.die(index);
            return Ok(RevealOutcome::Died);
        }

        let opened = self.flood_fill([index]);
        Ok(self.settle(opened))
    }

    /// Opens every unflagged neighbor of an uncovered number once exactly that many neighbors
    /// are flagged.
    ///
    /// Only the flag count is checked, not whether the flags sit on mines. A wrong flag means an
    /// unflagged neighbor is a mine and the chord loses the game.
    pub fn chord_reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.shape().validate_index(index)?;

        if !self.can_chord_reveal(index) {
            return Ok(RevealOutcome::Unchanged);
        }

        let shape = self.shape();
        let hit_mine = shape.iter_neighbors(index).find(|&pos| {
            let neighbor = self.at(pos);
            !neighbor.flagged && neighbor.is_mine()
        });

        if let Some(mine) = hit_mine {
            self.die(mine);
            return Ok(RevealOutcome::Died);
        }

        let opened = self.flood_fill(
            shape
                .iter_neighbors(index)
                .filter(|&pos| !self.at(pos).flagged)
                .collect::<Vec<_>>(),
        );
        Ok(self.settle(opened))
    }

    fn populate(&mut self, first: CellIndex) -> Result<()> {
        let layout = self.placer.place(self.config, first);

        if layout.shape() != self.shape()
            || layout.mine_count() != self.config.bombs
            || layout.contains_mine(first)
        {
            log::warn!(
                "Placer returned {} mines for a {}x{} board, first cell mined: {}",
                layout.mine_count(),
                layout.shape().height,
                layout.shape().width,
                layout.contains_mine(first)
            );
            return Err(GameError::InvalidLayout);
        }

        self.apply_layout(&layout);
        Ok(())
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        for index in self.shape().iter_indices() {
            if layout[index] {
                self.at_mut(index).kind = CellKind::Mine;
            }
        }
        self.populated = true;
    }

    /// Uncovers the mines, leaving already uncovered cells as they are.
    fn die(&mut self, triggered: CellIndex) {
        log::debug!("Mine hit at {:?}", self.shape().coords_unchecked(triggered));
        for cell in self.cells.iter_mut() {
            cell.visible = cell.visible || cell.is_mine();
        }
        self.died = true;
    }

    /// Opens `seeds` and floods outward through cells with no adjacent mines.
    ///
    /// Seeds that are already uncovered are expanded again, so a chord re-floods from visible
    /// zero cells. Past the seeds, visibility doubles as the visited set: a cell is only queued
    /// by the call that uncovers it.
    fn flood_fill(&mut self, seeds: impl IntoIterator<Item = CellIndex>) -> CellCount {
        let shape = self.shape();
        let mut opened = 0;
        let mut to_visit = VecDeque::new();

        for seed in seeds {
            if self.open_cell(seed) {
                opened += 1;
            }
            let cell = self.at(seed);
            if cell.visible && !cell.is_mine() {
                to_visit.push_back(seed);
            }
        }

        while let Some(visit) = to_visit.pop_front() {
            if self.at(visit).adjacent != Some(0) {
                continue;
            }

            for neighbor in shape.iter_neighbors(visit) {
                if self.open_cell(neighbor) {
                    opened += 1;
                    to_visit.push_back(neighbor);
                }
            }
        }

        log::trace!("Flood fill opened {} cells", opened);
        opened
    }

    /// Uncovers a single covered safe cell and records its count.
    ///
    /// A flag on the cell is dropped, keeping `flag_count` equal to the flags still shown.
    fn open_cell(&mut self, index: CellIndex) -> bool {
        let cell = self.at(index);
        if cell.visible || cell.is_mine() {
            return false;
        }

        let adjacent = self.count_adjacent_mines(index);
        let cell = self.at_mut(index);
        cell.visible = true;
        cell.adjacent = Some(adjacent);
        let was_flagged = core::mem::replace(&mut cell.flagged, false);

        if was_flagged {
            self.flag_count -= 1;
            log::trace!("Flood cleared wrong flag on cell {}", index);
        }
        self.revealed_count += 1;
        log::trace!("Opened cell {}, adjacent mines: {}", index, adjacent);
        true
    }

    fn settle(&self, opened: CellCount) -> RevealOutcome {
        if opened == 0 {
            RevealOutcome::Unchanged
        } else if self.check_win() {
            log::debug!("Board cleared after {} reveals", self.revealed_count);
            RevealOutcome::Won(opened)
        } else {
            RevealOutcome::Revealed(opened)
        }
    }

    fn count_adjacent_mines(&self, index: CellIndex) -> u8 {
        // at most 8 neighbors
        self.shape()
            .iter_neighbors(index)
            .filter(|&pos| self.at(pos).is_mine())
            .count() as u8
    }

    fn count_flagged_neighbors(&self, index: CellIndex) -> u8 {
        self.shape()
            .iter_neighbors(index)
            .filter(|&pos| self.at(pos).flagged)
            .count() as u8
    }

    fn at(&self, index: CellIndex) -> &Cell {
        &self.cells[self.shape().coords_unchecked(index).to_nd_index()]
    }

    fn at_mut(&mut self, index: CellIndex) -> &mut Cell {
        let pos = self.shape().coords_unchecked(index).to_nd_index();
        &mut self.cells[pos]
    }
}
