//! Per-player setup progress, independent of the opponent's.

use crate::board::{Board, ShotLog};
use crate::ship::Fleet;

/// Where a player stands in setup. The battle state only exists once a
/// fleet is committed, so an unplaced player can never be shot at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Has not opened with `B` yet.
    AwaitingBoard,
    /// Board agreed; waiting for the fleet.
    AwaitingShips,
    /// Fleet committed; holds the live battle state.
    Playing {
        board: Board,
        fleet: Fleet,
        shots: ShotLog,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub(crate) readiness: Readiness,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            readiness: Readiness::AwaitingBoard,
        }
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.readiness, Readiness::Playing { .. })
    }

    /// Un-sunk ships, once the fleet exists.
    pub fn ships_remaining(&self) -> Option<usize> {
        match &self.readiness {
            Readiness::Playing { fleet, .. } => Some(fleet.afloat()),
            _ => None,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
