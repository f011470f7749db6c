//! The session state machine: one owned object arbitrating both peers.
//!
//! A [`GameSession`] consumes one decoded command at a time, validates it
//! against the current phase, the sender's readiness and the turn, mutates
//! the boards and fleets, and returns the addressed responses for the
//! transport layer to deliver. Commands are processed one at a time; a
//! rejected command never mutates state, and after the session turns
//! terminal no command produces any response at all.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec, vec::Vec};

use log::{debug, info};

use crate::board::{Board, ShotLog};
use crate::codec::{self, DecodeError};
use crate::config::{BoardLimits, Dimensions};
use crate::player::{PlayerState, Readiness};
use crate::protocol::{
    Command, CommandKind, ErrorKind, Outgoing, Phase, Placement, PlayerId, Response,
};
use crate::ship::ShotOutcome;

/// A single two-player match from setup to game over.
pub struct GameSession {
    players: [PlayerState; 2],
    limits: BoardLimits,
    dims: Option<Dimensions>,
    phase: Phase,
    turn: PlayerId,
}

impl GameSession {
    /// Session with the default board limits.
    pub fn new() -> Self {
        Self::with_limits(BoardLimits::default())
    }

    pub fn with_limits(limits: BoardLimits) -> Self {
        Self {
            players: [PlayerState::new(), PlayerState::new()],
            limits,
            dims: None,
            phase: Phase::Setup,
            turn: PlayerId::P1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player currently allowed to fire. Meaningful once battle starts.
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Board dimensions, once the dimension authority has set them.
    pub fn dims(&self) -> Option<Dimensions> {
        self.dims
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    /// True once the game has ended; the transport stops reading then.
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Wire-level entry point: decode one line from `from`, run it through
    /// the state machine and encode the addressed reply lines.
    pub fn handle_line(&mut self, from: PlayerId, line: &str) -> Vec<(PlayerId, String)> {
        let outgoing = match codec::decode(line) {
            Ok(command) => self.handle(from, command),
            Err(err) => self.reject_undecodable(from, err),
        };
        outgoing
            .into_iter()
            .map(|o| (o.to, codec::encode(&o.response)))
            .collect()
    }

    /// Process one decoded command and return the responses to deliver.
    pub fn handle(&mut self, from: PlayerId, command: Command) -> Vec<Outgoing> {
        if self.phase == Phase::Over {
            return Vec::new();
        }
        debug!("{}: {:?}", from, command.kind());
        match command {
            Command::Forfeit => self.on_forfeit(from),
            Command::Begin { dims } => self.on_begin(from, dims),
            Command::PlaceShips { placements } => self.on_place(from, &placements),
            Command::Shoot { row, col } => self.on_shoot(from, row, col),
            Command::Query => self.on_query(from),
        }
    }

    /// A line that failed to decode still earns exactly one error reply:
    /// an unknown command is treated as a phase violation, a recognized
    /// command with broken fields as a parameter error, unless that command
    /// had no business in this phase to begin with.
    fn reject_undecodable(&mut self, from: PlayerId, err: DecodeError) -> Vec<Outgoing> {
        if self.phase == Phase::Over {
            return Vec::new();
        }
        let kind = match err {
            DecodeError::UnknownCommand => ErrorKind::PhaseViolation(self.phase),
            DecodeError::BadParameters(kind) => {
                if self.command_fits_phase(kind) {
                    ErrorKind::BadParameters(self.phase)
                } else {
                    ErrorKind::PhaseViolation(self.phase)
                }
            }
        };
        debug!("{}: undecodable line ({})", from, err);
        Self::error(from, kind)
    }

    fn command_fits_phase(&self, kind: CommandKind) -> bool {
        match kind {
            CommandKind::Forfeit => true,
            CommandKind::Begin => self.phase == Phase::Setup,
            CommandKind::PlaceShips => self.phase == Phase::Placement,
            CommandKind::Shoot | CommandKind::Query => self.phase == Phase::Battle,
        }
    }

    fn on_begin(&mut self, from: PlayerId, dims: Option<(i32, i32)>) -> Vec<Outgoing> {
        let ready = matches!(
            self.players[from.index()].readiness,
            Readiness::AwaitingBoard
        );
        if self.phase != Phase::Setup || !ready {
            return Self::error(from, ErrorKind::PhaseViolation(self.phase));
        }

        // Player 1 fixes the dimensions; player 2 must send a bare `B`.
        match (from, dims) {
            (PlayerId::P1, Some((w, h))) => match (u16::try_from(w), u16::try_from(h)) {
                (Ok(w), Ok(h)) if self.limits.accepts(w, h) => {
                    self.dims = Some(Dimensions::new(w, h));
                    info!("board fixed at {}x{}", w, h);
                }
                _ => return Self::error(from, ErrorKind::BadParameters(Phase::Setup)),
            },
            (PlayerId::P2, None) => {}
            _ => return Self::error(from, ErrorKind::BadParameters(Phase::Setup)),
        }

        self.players[from.index()].readiness = Readiness::AwaitingShips;
        if self
            .players
            .iter()
            .all(|p| matches!(p.readiness, Readiness::AwaitingShips))
        {
            self.phase = Phase::Placement;
            info!("both peers ready; awaiting fleets");
        }
        Self::ack(from)
    }

    fn on_place(&mut self, from: PlayerId, placements: &[Placement]) -> Vec<Outgoing> {
        let ready = matches!(
            self.players[from.index()].readiness,
            Readiness::AwaitingShips
        );
        if self.phase != Phase::Placement || !ready {
            return Self::error(from, ErrorKind::PhaseViolation(self.phase));
        }
        let dims = match self.dims {
            Some(dims) => dims,
            // placement phase is only entered once dimensions are fixed
            None => return Self::error(from, ErrorKind::PhaseViolation(self.phase)),
        };

        match Board::place_fleet(dims, placements) {
            Err(kind) => Self::error(from, kind),
            Ok((board, fleet)) => {
                self.players[from.index()].readiness = Readiness::Playing {
                    board,
                    fleet,
                    shots: ShotLog::new(),
                };
                if self.players.iter().all(|p| p.is_playing()) {
                    self.phase = Phase::Battle;
                    self.turn = PlayerId::P1;
                    info!("both fleets placed; battle begins, {} to fire", self.turn);
                }
                Self::ack(from)
            }
        }
    }

    fn on_shoot(&mut self, from: PlayerId, row: i32, col: i32) -> Vec<Outgoing> {
        if self.phase != Phase::Battle {
            return Self::error(from, ErrorKind::PhaseViolation(self.phase));
        }
        if from != self.turn {
            return Self::error(from, ErrorKind::TurnViolation);
        }

        let (shooter, defender) = Self::split_players(&mut self.players, from);
        let (shots, board, fleet) = match (&mut shooter.readiness, &mut defender.readiness) {
            (
                Readiness::Playing { shots, .. },
                Readiness::Playing { board, fleet, .. },
            ) => (shots, board, fleet),
            // battle phase implies both fleets are committed
            _ => return Self::error(from, ErrorKind::PhaseViolation(Phase::Battle)),
        };

        if !board.dims().contains(row, col) {
            return Self::error(from, ErrorKind::ShotOutOfBounds);
        }
        let (row, col) = (row as u16, col as u16);
        if shots.contains(row, col) {
            return Self::error(from, ErrorKind::DuplicateShot);
        }

        let outcome = if board.is_occupied(row, col) {
            fleet.receive_shot(row, col)
        } else {
            ShotOutcome::Miss
        };
        let hit = matches!(outcome, ShotOutcome::Hit { .. });
        shots.record(row, col, hit);
        let remaining = fleet.afloat();
        if let ShotOutcome::Hit { sunk: true } = outcome {
            debug!("{} sank a ship, {} afloat", from, remaining);
        }

        let mut out = vec![Outgoing::new(from, Response::ShotResult { remaining, hit })];
        if remaining == 0 {
            self.phase = Phase::Over;
            info!("{} is out of ships; {} wins", from.opponent(), from);
            out.push(Outgoing::new(from.opponent(), Response::Halt { winner: false }));
            out.push(Outgoing::new(from, Response::Halt { winner: true }));
        } else {
            self.turn = from.opponent();
        }
        out
    }

    fn on_query(&mut self, from: PlayerId) -> Vec<Outgoing> {
        if self.phase != Phase::Battle {
            return Self::error(from, ErrorKind::PhaseViolation(self.phase));
        }
        let (sender, opponent) = Self::split_players(&mut self.players, from);
        match (&sender.readiness, &opponent.readiness) {
            (Readiness::Playing { shots, .. }, Readiness::Playing { fleet, .. }) => {
                vec![Outgoing::new(
                    from,
                    Response::History {
                        remaining: fleet.afloat(),
                        shots: shots.shots().to_vec(),
                    },
                )]
            }
            _ => Self::error(from, ErrorKind::PhaseViolation(Phase::Battle)),
        }
    }

    fn on_forfeit(&mut self, from: PlayerId) -> Vec<Outgoing> {
        self.phase = Phase::Over;
        info!("{} forfeits; {} wins", from, from.opponent());
        vec![
            Outgoing::new(from, Response::Halt { winner: false }),
            Outgoing::new(from.opponent(), Response::Halt { winner: true }),
        ]
    }

    fn split_players(
        players: &mut [PlayerState; 2],
        from: PlayerId,
    ) -> (&mut PlayerState, &mut PlayerState) {
        let (left, right) = players.split_at_mut(1);
        match from {
            PlayerId::P1 => (&mut left[0], &mut right[0]),
            PlayerId::P2 => (&mut right[0], &mut left[0]),
        }
    }

    fn error(to: PlayerId, kind: ErrorKind) -> Vec<Outgoing> {
        vec![Outgoing::new(to, Response::Error(kind))]
    }

    fn ack(to: PlayerId) -> Vec<Outgoing> {
        vec![Outgoing::new(to, Response::Ack)]
    }
}
