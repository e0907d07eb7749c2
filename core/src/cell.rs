use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Mine,
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// State of a single grid position, owned by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) kind: CellKind,
    /// Mine-neighbor count, filled in when an empty cell is uncovered.
    pub(crate) adjacent: Option<u8>,
    pub(crate) visible: bool,
    pub(crate) flagged: bool,
}

impl Cell {
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn adjacent_count(&self) -> Option<u8> {
        self.adjacent
    }

    /// Whether the primary action may uncover this cell.
    pub const fn is_openable(&self) -> bool {
        !self.visible && !self.flagged
    }

    pub const fn display(&self) -> CellDisplay {
        use CellDisplay::*;

        match (self.visible, self.flagged, self.kind, self.adjacent) {
            (true, _, CellKind::Mine, _) => Mine,
            (true, _, CellKind::Empty, Some(count)) if count > 0 => Number(count),
            (true, _, CellKind::Empty, _) => Blank,
            (false, true, _, _) => Flag,
            (false, false, _, _) => Covered,
        }
    }
}

/// What a presentation layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellDisplay {
    Covered,
    Flag,
    Blank,
    Number(u8),
    Mine,
}

impl CellDisplay {
    /// Whether the cell is visually closed
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered | Self::Flag)
    }
}

impl Default for CellDisplay {
    fn default() -> Self {
        Self::Covered
    }
}

/// Read-only view of one cell handed out to callers.
///
/// `is_mine` is only reported once the cell is visible, so a view never leaks mine positions
/// during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub index: CellIndex,
    pub visible: bool,
    pub flagged: bool,
    pub is_mine: bool,
    pub display: CellDisplay,
}

impl CellView {
    pub(crate) fn new(index: CellIndex, cell: &Cell) -> Self {
        Self {
            index,
            visible: cell.visible,
            flagged: cell.flagged,
            is_mine: cell.visible && cell.is_mine(),
            display: cell.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_follows_visibility_and_flags() {
        let mut cell = Cell::default();
        assert_eq!(cell.display(), CellDisplay::Covered);

        cell.flagged = true;
        assert_eq!(cell.display(), CellDisplay::Flag);
        assert!(cell.display().is_covered());

        cell.flagged = false;
        cell.visible = true;
        cell.adjacent = Some(0);
        assert_eq!(cell.display(), CellDisplay::Blank);

        cell.adjacent = Some(3);
        assert_eq!(cell.display(), CellDisplay::Number(3));
    }

    #[test]
    fn flagged_mine_shows_as_mine_once_visible() {
        let cell = Cell {
            kind: CellKind::Mine,
            adjacent: None,
            visible: true,
            flagged: true,
        };

        assert_eq!(cell.display(), CellDisplay::Mine);
        assert!(CellView::new(0, &cell).is_mine);
    }

    #[test]
    fn view_hides_covered_mines() {
        let cell = Cell {
            kind: CellKind::Mine,
            ..Cell::default()
        };

        let view = CellView::new(7, &cell);
        assert!(!view.is_mine);
        assert_eq!(view.display, CellDisplay::Covered);
    }
}
