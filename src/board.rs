//! Per-player grid state: committed occupancy, atomic fleet placement and
//! the outgoing shot record.
//!
//! Placement validates a whole batch against a scratch grid and commits all
//! five ships or none of them, reporting the first violated rule: every
//! piece number first, then every rotation, then per piece in batch order a
//! cell-by-cell bounds and overlap check.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::bitgrid::Mask;
use crate::config::{Dimensions, PIECE_CELLS};
use crate::pieces::PieceKind;
use crate::protocol::{ErrorKind, Placement, Shot};
use crate::ship::{Fleet, Ship};

/// A player's committed ship occupancy. The grid is fixed once the fleet is
/// placed; only the opponent's shot record evolves afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dims: Dimensions,
    occupied: Mask,
}

impl Board {
    /// Validate a batch of placements and commit them atomically. A batch
    /// with any invalid piece commits nothing. The codec guarantees the
    /// batch holds exactly the expected number of tuples.
    pub fn place_fleet(
        dims: Dimensions,
        placements: &[Placement],
    ) -> Result<(Board, Fleet), ErrorKind> {
        // piece numbers first, across the whole batch
        let mut kinds = Vec::with_capacity(placements.len());
        for p in placements {
            kinds.push(PieceKind::from_wire(p.kind).ok_or(ErrorKind::InvalidShape)?);
        }

        // then every rotation
        for p in placements {
            if !(0..=3).contains(&p.rotation) {
                return Err(ErrorKind::InvalidRotation);
            }
        }

        // then bounds and overlap, piece by piece, cell by cell, against a
        // scratch grid so a rejection leaves nothing behind
        let mut scratch = match Mask::new(dims.width, dims.height) {
            Ok(grid) => grid,
            // dimensions wider than the row word are rejected during setup
            Err(_) => return Err(ErrorKind::PlacementOutOfBounds),
        };
        let mut ships = Vec::with_capacity(placements.len());
        for (p, &kind) in placements.iter().zip(kinds.iter()) {
            let mut cells = [(0u16, 0u16); PIECE_CELLS];
            for (slot, &(dr, dc)) in cells.iter_mut().zip(kind.cells(p.rotation as u8).iter()) {
                // wire anchors are unrestricted integers, so the cell
                // arithmetic itself can overflow; an unrepresentable cell is
                // off the board by definition
                let cell = (p.row.checked_add(dr as i32), p.col.checked_add(dc as i32));
                let (r, c) = match cell {
                    (Some(r), Some(c)) if dims.contains(r, c) => (r as usize, c as usize),
                    _ => return Err(ErrorKind::PlacementOutOfBounds),
                };
                if scratch.get(r, c).unwrap_or(false) {
                    return Err(ErrorKind::PlacementOverlap);
                }
                let _ = scratch.set(r, c);
                *slot = (r as u16, c as u16);
            }
            ships.push(Ship::new(
                kind,
                p.rotation as u8,
                (p.row as u16, p.col as u16),
                cells,
            ));
        }

        let board = Board {
            dims,
            occupied: scratch,
        };
        Ok((board, Fleet::new(ships)))
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// True when any ship cell occupies `(row, col)`.
    pub fn is_occupied(&self, row: u16, col: u16) -> bool {
        self.occupied.get(row as usize, col as usize).unwrap_or(false)
    }

    /// Occupancy mask of the whole fleet.
    pub fn grid(&self) -> &Mask {
        &self.occupied
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.occupied, f)
    }
}

/// Ordered record of the shots one player has fired, used both for the
/// duplicate-shot rejection and to answer history queries in firing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotLog {
    shots: Vec<Shot>,
}

impl ShotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `(row, col)` was already fired at.
    pub fn contains(&self, row: u16, col: u16) -> bool {
        self.shots.iter().any(|s| s.row == row && s.col == col)
    }

    /// Append a shot; cells are recorded at most once.
    pub fn record(&mut self, row: u16, col: u16, hit: bool) {
        self.shots.push(Shot { row, col, hit });
    }

    /// Shots in the order they were fired.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}
