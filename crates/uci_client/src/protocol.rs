//! Text side of the UCI protocol: commands we send, replies we parse.

use upset_core::{SearchLimits, DEFAULT_DEPTH};

/// `go` command for the given limits.
pub fn go_command(limits: &SearchLimits) -> String {
    match (limits.depth, limits.move_time) {
        (Some(depth), Some(time)) => format!("go depth {} movetime {}", depth, time.as_millis()),
        (Some(depth), None) => format!("go depth {}", depth),
        (None, Some(time)) => format!("go movetime {}", time.as_millis()),
        (None, None) => format!("go depth {}", DEFAULT_DEPTH),
    }
}

pub fn setoption_command(name: &str, value: &str) -> String {
    format!("setoption name {} value {}", name, value)
}

pub fn position_command(fen: &str) -> String {
    format!("position fen {}", fen)
}

/// Parse a `bestmove` line.
///
/// Returns `None` when the line is not a well-formed `bestmove` reply,
/// `Some(None)` when the engine reports it has no move (`(none)` or the
/// null move `0000`) and `Some(Some(text))` otherwise.
pub fn parse_bestmove(line: &str) -> Option<Option<String>> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "bestmove" {
        return None;
    }
    match parts.next()? {
        "(none)" | "0000" => Some(None),
        mv => Some(Some(mv.to_string())),
    }
}

/// Search statistics picked out of `info` lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
}

impl SearchInfo {
    /// Fold an `info` line into the running statistics; other lines are ignored.
    pub fn update(&mut self, line: &str) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.first() != Some(&"info") {
            return;
        }
        for pair in parts.windows(2) {
            match pair[0] {
                "depth" => {
                    if let Ok(d) = pair[1].parse() {
                        self.depth = Some(d);
                    }
                }
                "nodes" => {
                    if let Ok(n) = pair[1].parse() {
                        self.nodes = Some(n);
                    }
                }
                // Everything after `pv` or `string` is free text
                "pv" | "string" => break,
                _ => {}
            }
        }
    }
}

/// Engine name announced with `id name ...` during the handshake.
pub fn parse_id_name(line: &str) -> Option<&str> {
    line.strip_prefix("id name ").map(str::trim)
}
