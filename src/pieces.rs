//! The tetromino catalog: piece kinds, canonical offsets and rotation.
//!
//! Every piece covers exactly four cells. The catalog stores the rotation-0
//! offsets relative to the piece anchor; the other three rotations are
//! derived by the pure quarter-turn transform `(r, c) → (-c, r)`, so any
//! `(kind, rotation)` pair deterministically names the same four relative
//! cells.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use rand::Rng;

use crate::config::{Dimensions, FLEET_SIZE, PIECE_CELLS};
use crate::protocol::Placement;

/// The seven piece kinds, wire-numbered 1 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

/// All kinds in wire order.
pub const PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::T,
    PieceKind::J,
    PieceKind::L,
    PieceKind::S,
    PieceKind::Z,
];

impl PieceKind {
    /// Decode a wire piece number. Anything outside 1..=7 is rejected.
    pub fn from_wire(n: i32) -> Option<Self> {
        match n {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::L),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Wire number of this kind.
    pub fn to_wire(self) -> i32 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::J => 4,
            PieceKind::L => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Rotation-0 `(row, col)` offsets of the four cells.
    pub fn offsets(self) -> [(i8, i8); PIECE_CELLS] {
        match self {
            PieceKind::I => [(0, 0), (0, 1), (0, 2), (0, 3)],
            PieceKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            PieceKind::T => [(0, 1), (1, 0), (1, 1), (1, 2)],
            PieceKind::J => [(0, 0), (1, 0), (2, 0), (2, 1)],
            PieceKind::L => [(0, 0), (1, 0), (2, 0), (2, -1)],
            PieceKind::S => [(0, 0), (0, 1), (1, -1), (1, 0)],
            PieceKind::Z => [(0, -1), (0, 0), (1, 0), (1, 1)],
        }
    }

    /// Offsets of the four cells after `rotation` quarter turns.
    pub fn cells(self, rotation: u8) -> [(i8, i8); PIECE_CELLS] {
        let mut cells = self.offsets();
        for cell in cells.iter_mut() {
            *cell = rotate(*cell, rotation);
        }
        cells
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Rotate a relative cell by `n` quarter turns (taken modulo a full turn).
pub fn rotate(cell: (i8, i8), n: u8) -> (i8, i8) {
    let (mut r, mut c) = cell;
    for _ in 0..n % 4 {
        let prev_r = r;
        r = -c;
        c = prev_r;
    }
    (r, c)
}

/// Generate a random fleet of `FLEET_SIZE` placements valid for `dims`:
/// in-bounds and mutually non-overlapping. Returns `None` when a ship could
/// not be fitted within the per-ship attempt cap.
pub fn random_fleet<R: Rng>(rng: &mut R, dims: Dimensions) -> Option<Vec<Placement>> {
    const ATTEMPTS_PER_SHIP: usize = 1000;

    let mut taken: Vec<(i32, i32)> = Vec::with_capacity(FLEET_SIZE * PIECE_CELLS);
    let mut fleet = Vec::with_capacity(FLEET_SIZE);

    'ships: for _ in 0..FLEET_SIZE {
        for _ in 0..ATTEMPTS_PER_SHIP {
            let kind = PIECE_KINDS[rng.random_range(0..PIECE_KINDS.len())];
            let rotation = rng.random_range(0..4u8);
            let row = rng.random_range(0..dims.height as i32);
            let col = rng.random_range(0..dims.width as i32);

            let cells = kind.cells(rotation);
            let absolute: Vec<(i32, i32)> = cells
                .iter()
                .map(|&(dr, dc)| (row + dr as i32, col + dc as i32))
                .collect();
            let fits = absolute.iter().all(|&(r, c)| dims.contains(r, c))
                && absolute.iter().all(|cell| !taken.contains(cell));
            if fits {
                taken.extend(absolute);
                fleet.push(Placement {
                    kind: kind.to_wire(),
                    rotation: rotation as i32,
                    col,
                    row,
                });
                continue 'ships;
            }
        }
        return None;
    }
    Some(fleet)
}
