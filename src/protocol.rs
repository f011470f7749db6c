//! Typed protocol messages and the error taxonomy.
//!
//! A [`Command`] is one decoded request from a peer; a [`Response`] is one
//! outgoing line. [`ErrorKind`] names every recoverable rejection and owns
//! the numeric wire-code table: phase and parameter errors take a code per
//! phase, placement errors the 3xx family, shot errors the 4xx family.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

/// Stable identity of a peer. Player 1 is the first connection accepted and
/// the dimension authority; player 1 also fires first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    P1,
    P2,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::P1 => PlayerId::P2,
            PlayerId::P2 => PlayerId::P1,
        }
    }

    /// Zero-based slot, for indexing per-player tables.
    pub fn index(self) -> usize {
        match self {
            PlayerId::P1 => 0,
            PlayerId::P2 => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::P1 => write!(f, "player 1"),
            PlayerId::P2 => write!(f, "player 2"),
        }
    }
}

/// Session-wide stage of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for both peers to open with `B`.
    Setup,
    /// Waiting for both fleets.
    Placement,
    /// Alternating shots.
    Battle,
    /// Game over; no further commands are processed.
    Over,
}

impl Phase {
    fn index(self) -> u16 {
        match self {
            Phase::Setup => 0,
            Phase::Placement => 1,
            // Over is unreachable through `code`: a finished session emits
            // no further responses.
            Phase::Battle | Phase::Over => 2,
        }
    }
}

/// One raw `(kind, rotation, col, row)` tuple from a placement command.
/// Fields stay unvalidated wire integers; the rules engine owns the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: i32,
    pub rotation: i32,
    pub col: i32,
    pub row: i32,
}

/// A decoded request, consumed immediately by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `B [w h]` — open the session; only the dimension authority carries
    /// the fields.
    Begin { dims: Option<(i32, i32)> },
    /// `I` with 20 integers — commit a whole fleet at once.
    PlaceShips { placements: Vec<Placement> },
    /// `S row col` — fire at the opponent.
    Shoot { row: i32, col: i32 },
    /// `Q` — report own shot history and opponent ships remaining.
    Query,
    /// `F` — concede.
    Forfeit,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Begin { .. } => CommandKind::Begin,
            Command::PlaceShips { .. } => CommandKind::PlaceShips,
            Command::Shoot { .. } => CommandKind::Shoot,
            Command::Query => CommandKind::Query,
            Command::Forfeit => CommandKind::Forfeit,
        }
    }
}

/// Command discriminant, used to classify malformed lines before their
/// fields exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Begin,
    PlaceShips,
    Shoot,
    Query,
    Forfeit,
}

/// One recorded shot by a player, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub row: u16,
    pub col: u16,
    pub hit: bool,
}

/// A single outgoing line to one peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `A`
    Ack,
    /// `E <code>`
    Error(ErrorKind),
    /// `R <remaining> <H|M>`
    ShotResult { remaining: usize, hit: bool },
    /// `G <remaining> [<H|M> <row> <col>]*`
    History { remaining: usize, shots: Vec<Shot> },
    /// `H <0|1>`, 1 for the winner.
    Halt { winner: bool },
}

/// An addressed response produced by the state machine; the transport layer
/// writes it to the named peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: PlayerId,
    pub response: Response,
}

impl Outgoing {
    pub fn new(to: PlayerId, response: Response) -> Self {
        Self { to, response }
    }
}

/// Every recoverable rejection. The session keeps running after each one;
/// the offending command has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Command type not accepted in the current phase or readiness.
    PhaseViolation(Phase),
    /// Wrong token count, non-integer field, or fields from the wrong peer.
    BadParameters(Phase),
    /// Piece number outside 1..=7.
    InvalidShape,
    /// Rotation outside 0..=3.
    InvalidRotation,
    /// A piece cell falls outside the board.
    PlacementOutOfBounds,
    /// A piece cell collides with an earlier piece of the same batch.
    PlacementOverlap,
    /// Shot coordinates outside the board.
    ShotOutOfBounds,
    /// Cell already shot by the same player.
    DuplicateShot,
    /// Shot attempted out of turn.
    TurnViolation,
}

impl ErrorKind {
    /// Numeric wire code for `E <code>`.
    pub fn code(self) -> u16 {
        match self {
            ErrorKind::PhaseViolation(phase) => 100 + phase.index(),
            ErrorKind::BadParameters(phase) => 200 + phase.index(),
            ErrorKind::InvalidShape => 300,
            ErrorKind::InvalidRotation => 301,
            ErrorKind::PlacementOutOfBounds => 302,
            ErrorKind::PlacementOverlap => 303,
            ErrorKind::ShotOutOfBounds => 400,
            ErrorKind::DuplicateShot => 401,
            ErrorKind::TurnViolation => 402,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::PhaseViolation(_) => write!(f, "command not valid in current phase"),
            ErrorKind::BadParameters(_) => write!(f, "malformed command parameters"),
            ErrorKind::InvalidShape => write!(f, "piece type outside 1..=7"),
            ErrorKind::InvalidRotation => write!(f, "rotation outside 0..=3"),
            ErrorKind::PlacementOutOfBounds => write!(f, "piece cell outside the board"),
            ErrorKind::PlacementOverlap => write!(f, "piece cell overlaps another piece"),
            ErrorKind::ShotOutOfBounds => write!(f, "shot outside the board"),
            ErrorKind::DuplicateShot => write!(f, "cell already shot"),
            ErrorKind::TurnViolation => write!(f, "shot attempted out of turn"),
        }
    }
}
