//! Wire codec for the single-line ASCII command grammar.
//!
//! Commands are whitespace-delimited tokens, one command per line. The
//! decoder is strict where the rules engine is not: token counts must match
//! exactly, every numeric field must parse as an integer, and trailing
//! garbage after `Q` or `F` is rejected. Range checks on the decoded values
//! (piece numbers, rotations, coordinates) belong to the session, so a
//! syntactically well-formed command always decodes.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

use core::fmt;
use core::fmt::Write as _;

use crate::config::PLACEMENT_FIELDS;
use crate::protocol::{Command, CommandKind, Placement, Response};

/// Why a line failed to decode. The session maps either case onto the
/// current phase: an unknown command is a phase violation, a known command
/// with broken fields is a parameter error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Leading token names no command.
    UnknownCommand,
    /// Recognized command with missing, extra or non-integer fields.
    BadParameters(CommandKind),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownCommand => write!(f, "unknown command"),
            DecodeError::BadParameters(kind) => {
                write!(f, "malformed parameters for {:?} command", kind)
            }
        }
    }
}

/// Parse one line into a typed command.
pub fn decode(line: &str) -> Result<Command, DecodeError> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next().ok_or(DecodeError::UnknownCommand)?;
    let fields: Vec<&str> = tokens.collect();

    match head {
        "B" => decode_begin(&fields),
        "I" => decode_place(&fields),
        "S" => decode_shoot(&fields),
        "Q" => decode_bare(&fields, Command::Query, CommandKind::Query),
        "F" => decode_bare(&fields, Command::Forfeit, CommandKind::Forfeit),
        _ => Err(DecodeError::UnknownCommand),
    }
}

fn decode_begin(fields: &[&str]) -> Result<Command, DecodeError> {
    match fields {
        [] => Ok(Command::Begin { dims: None }),
        [w, h] => {
            let w = int(w, CommandKind::Begin)?;
            let h = int(h, CommandKind::Begin)?;
            Ok(Command::Begin { dims: Some((w, h)) })
        }
        _ => Err(DecodeError::BadParameters(CommandKind::Begin)),
    }
}

fn decode_place(fields: &[&str]) -> Result<Command, DecodeError> {
    if fields.len() != PLACEMENT_FIELDS {
        return Err(DecodeError::BadParameters(CommandKind::PlaceShips));
    }
    let mut values = [0i32; PLACEMENT_FIELDS];
    for (slot, tok) in values.iter_mut().zip(fields.iter()) {
        *slot = int(tok, CommandKind::PlaceShips)?;
    }
    let placements = values
        .chunks_exact(4)
        .map(|c| Placement {
            kind: c[0],
            rotation: c[1],
            col: c[2],
            row: c[3],
        })
        .collect();
    Ok(Command::PlaceShips { placements })
}

fn decode_shoot(fields: &[&str]) -> Result<Command, DecodeError> {
    match fields {
        [row, col] => Ok(Command::Shoot {
            row: int(row, CommandKind::Shoot)?,
            col: int(col, CommandKind::Shoot)?,
        }),
        _ => Err(DecodeError::BadParameters(CommandKind::Shoot)),
    }
}

fn decode_bare(
    fields: &[&str],
    command: Command,
    kind: CommandKind,
) -> Result<Command, DecodeError> {
    if fields.is_empty() {
        Ok(command)
    } else {
        Err(DecodeError::BadParameters(kind))
    }
}

fn int(token: &str, kind: CommandKind) -> Result<i32, DecodeError> {
    token
        .parse::<i32>()
        .map_err(|_| DecodeError::BadParameters(kind))
}

/// Serialize one response to its wire line (without the newline).
pub fn encode(response: &Response) -> String {
    match response {
        Response::Ack => String::from("A"),
        Response::Error(kind) => format!("E {}", kind.code()),
        Response::ShotResult { remaining, hit } => {
            format!("R {} {}", remaining, result_tag(*hit))
        }
        Response::History { remaining, shots } => {
            let mut line = format!("G {}", remaining);
            for shot in shots {
                let _ = write!(line, " {} {} {}", result_tag(shot.hit), shot.row, shot.col);
            }
            line
        }
        Response::Halt { winner } => format!("H {}", u8::from(*winner)),
    }
}

fn result_tag(hit: bool) -> char {
    if hit {
        'H'
    } else {
        'M'
    }
}
