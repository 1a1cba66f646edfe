use serde::{Deserialize, Serialize};

/// State of a single board position.
///
/// A cell is never flagged and revealed at the same time: flagging is refused once revealed and
/// revealing is refused while flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Mine-bearing neighbors, meaningless for mine cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Reveals the cell, returns whether anything changed.
    ///
    /// Flagged and already revealed cells are left alone.
    pub fn reveal(&mut self) -> bool {
        if self.is_flagged || self.is_revealed {
            return false;
        }
        self.is_revealed = true;
        true
    }

    /// Flips the flag, silently ignored on revealed cells.
    pub fn toggle_flag(&mut self) {
        if !self.is_revealed {
            self.is_flagged = !self.is_flagged;
        }
    }

    pub fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    /// Reveals regardless of the flag, dropping it.
    pub(crate) fn force_reveal(&mut self) {
        self.is_flagged = false;
        self.is_revealed = true;
    }
}
