//! Formatting of the commands we send and parsing of the lines we read.

use chess_core::{Position, SearchLimits};

/// A line received from an engine, as far as the arena cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineLine<'a> {
    IdName(&'a str),
    UciOk,
    ReadyOk,
    /// `None` when the engine has no move (`(none)` or `0000`)
    BestMove(Option<&'a str>),
    Info(&'a str),
    Other(&'a str),
}

pub fn parse_line(line: &str) -> EngineLine<'_> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("uciok") => EngineLine::UciOk,
        Some("readyok") => EngineLine::ReadyOk,
        Some("id") if parts.next() == Some("name") => {
            let name = line
                .split_once(" name ")
                .map(|(_, name)| name.trim())
                .unwrap_or_default();
            EngineLine::IdName(name)
        }
        Some("bestmove") => match parts.next() {
            None | Some("(none)") | Some("0000") => EngineLine::BestMove(None),
            Some(mv) => EngineLine::BestMove(Some(mv)),
        },
        Some("info") => EngineLine::Info(line),
        _ => EngineLine::Other(line),
    }
}

/// `position` command replaying the game from its start.
pub fn position_command(pos: &Position) -> String {
    let mut cmd = match pos.start_fen() {
        Some(fen) => format!("position fen {fen}"),
        None => "position startpos".to_string(),
    };
    if !pos.uci_moves().is_empty() {
        cmd.push_str(" moves ");
        cmd.push_str(&pos.uci_moves().join(" "));
    }
    cmd
}

pub fn go_command(limits: &SearchLimits) -> String {
    format!("go movetime {}", limits.move_time_ms())
}

pub fn setoption_command(name: &str, value: &str) -> String {
    format!("setoption name {name} value {value}")
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
