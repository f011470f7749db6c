//! Placed ships and per-fleet sink tracking.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::config::PIECE_CELLS;
use crate::pieces::PieceKind;

/// A piece fixed on the board: kind, rotation, anchor and the four absolute
/// cells it occupies, with hits tracked as a bit per cell.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    kind: PieceKind,
    rotation: u8,
    anchor: (u16, u16),
    cells: [(u16, u16); PIECE_CELLS],
    hits: u8,
}

impl Ship {
    /// Build a ship from already-validated absolute cells.
    pub(crate) fn new(
        kind: PieceKind,
        rotation: u8,
        anchor: (u16, u16),
        cells: [(u16, u16); PIECE_CELLS],
    ) -> Self {
        Self {
            kind,
            rotation,
            anchor,
            cells,
            hits: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Anchor `(row, col)` the placement was made at.
    pub fn anchor(&self) -> (u16, u16) {
        self.anchor
    }

    /// The four absolute `(row, col)` cells.
    pub fn cells(&self) -> &[(u16, u16); PIECE_CELLS] {
        &self.cells
    }

    /// Index of the cell at `(row, col)`, if this ship occupies it.
    pub fn cell_index(&self, row: u16, col: u16) -> Option<usize> {
        self.cells.iter().position(|&c| c == (row, col))
    }

    /// Number of cells hit so far.
    pub fn hit_count(&self) -> usize {
        self.hits.count_ones() as usize
    }

    /// A ship is sunk once all four cells have been hit.
    pub fn is_sunk(&self) -> bool {
        self.hit_count() == PIECE_CELLS
    }

    fn record_hit(&mut self, cell_index: usize) {
        self.hits |= 1 << cell_index;
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: {}, rotation: {}, anchor: ({}, {}), hits: {}/{} }}",
            self.kind,
            self.rotation,
            self.anchor.0,
            self.anchor.1,
            self.hit_count(),
            PIECE_CELLS,
        )
    }
}

/// Result of landing one shot on a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit { sunk: bool },
}

/// The committed ships of one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new(ships: Vec<Ship>) -> Self {
        Self { ships }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ships not yet sunk.
    pub fn afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Land a shot at `(row, col)`: locate the owning ship, record the hit
    /// and report whether it sank. Callers reject duplicate shots before
    /// this point, so a cell is hit at most once.
    pub fn receive_shot(&mut self, row: u16, col: u16) -> ShotOutcome {
        for ship in self.ships.iter_mut() {
            if let Some(idx) = ship.cell_index(row, col) {
                ship.record_hit(idx);
                return ShotOutcome::Hit {
                    sunk: ship.is_sunk(),
                };
            }
        }
        ShotOutcome::Miss
    }
}
