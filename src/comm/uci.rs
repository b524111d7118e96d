//! UCI protocol line parser. Turns a single line of GUI input into a
//! `UciReport`, mirroring the teacher's split between a thin reader thread
//! and a parser that never touches engine state directly.

use crate::engine::defs::EngineOptionName;
use crate::search::defs::GameTime;

#[derive(Debug, Clone, PartialEq)]
pub enum UciReport {
    Uci,
    UciNewGame,
    IsReady,
    SetOption(UciOptionReport),
    Position(String, Vec<String>),
    GoInfinite,
    GoDepth(i32),
    GoMoveTime(u128),
    GoNodes(u64),
    GoGameTime(GameTime),
    Stop,
    Quit,
    Board,
    History,
    Eval,
    Help,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UciOptionReport {
    Hash(String),
    ClearHash,
    Nothing,
}

pub fn parse(input: &str) -> UciReport {
    let line = input.trim();
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&cmd) = tokens.first() else {
        return UciReport::Unknown;
    };

    match cmd {
        "uci" => UciReport::Uci,
        "ucinewgame" => UciReport::UciNewGame,
        "isready" => UciReport::IsReady,
        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "go" => parse_go(&tokens),
        "stop" => UciReport::Stop,
        "quit" => UciReport::Quit,
        "board" => UciReport::Board,
        "history" => UciReport::History,
        "eval" => UciReport::Eval,
        "help" => UciReport::Help,
        _ => UciReport::Unknown,
    }
}

fn parse_setoption(tokens: &[&str]) -> UciReport {
    // setoption name <id> [value <x>]
    let Some(name_pos) = tokens.iter().position(|&t| t == "name") else {
        return UciReport::SetOption(UciOptionReport::Nothing);
    };
    let value_pos = tokens.iter().position(|&t| t == "value");
    let name_end = value_pos.unwrap_or(tokens.len());
    let name = tokens[name_pos + 1..name_end].join(" ");
    let value = value_pos.map(|p| tokens[p + 1..].join(" "));

    let report = if name.eq_ignore_ascii_case(EngineOptionName::HASH) {
        UciOptionReport::Hash(value.unwrap_or_default())
    } else if name.eq_ignore_ascii_case(EngineOptionName::CLEAR_HASH) {
        UciOptionReport::ClearHash
    } else {
        UciOptionReport::Nothing
    };
    UciReport::SetOption(report)
}

fn parse_position(tokens: &[&str]) -> UciReport {
    let fen = if tokens.get(1) == Some(&"startpos") {
        crate::defs::FEN_START_POSITION.to_string()
    } else if tokens.get(1) == Some(&"fen") {
        let moves_pos = tokens.iter().position(|&t| t == "moves").unwrap_or(tokens.len());
        tokens[2..moves_pos].join(" ")
    } else {
        return UciReport::Unknown;
    };

    let moves = tokens
        .iter()
        .position(|&t| t == "moves")
        .map(|p| tokens[p + 1..].iter().map(|s| s.to_string()).collect())
        .unwrap_or_default();

    UciReport::Position(fen, moves)
}

fn parse_go(tokens: &[&str]) -> UciReport {
    if tokens.get(1) == Some(&"infinite") {
        return UciReport::GoInfinite;
    }

    if let Some(v) = arg_after(tokens, "depth") {
        if let Ok(d) = v.parse::<i32>() {
            return UciReport::GoDepth(d);
        }
    }
    if let Some(v) = arg_after(tokens, "movetime") {
        if let Ok(ms) = v.parse::<u128>() {
            return UciReport::GoMoveTime(ms);
        }
    }
    if let Some(v) = arg_after(tokens, "nodes") {
        if let Ok(n) = v.parse::<u64>() {
            return UciReport::GoNodes(n);
        }
    }

    let has_time_control = ["wtime", "btime", "winc", "binc", "movestogo"]
        .iter()
        .any(|&k| arg_after(tokens, k).is_some());
    if has_time_control {
        let gt = GameTime {
            wtime: arg_after(tokens, "wtime").and_then(|v| v.parse().ok()).unwrap_or(0),
            btime: arg_after(tokens, "btime").and_then(|v| v.parse().ok()).unwrap_or(0),
            winc: arg_after(tokens, "winc").and_then(|v| v.parse().ok()).unwrap_or(0),
            binc: arg_after(tokens, "binc").and_then(|v| v.parse().ok()).unwrap_or(0),
            moves_to_go: arg_after(tokens, "movestogo").and_then(|v| v.parse().ok()),
        };
        return UciReport::GoGameTime(gt);
    }

    UciReport::GoInfinite
}

fn arg_after<'a>(tokens: &'a [&str], key: &str) -> Option<&'a str> {
    tokens.iter().position(|&t| t == key).and_then(|p| tokens.get(p + 1)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_startpos_with_moves() {
        let report = parse("position startpos moves e2e4 e7e5");
        assert_eq!(
            report,
            UciReport::Position(
                crate::defs::FEN_START_POSITION.to_string(),
                vec!["e2e4".to_string(), "e7e5".to_string()]
            )
        );
    }

    #[test]
    fn parses_go_depth() {
        assert_eq!(parse("go depth 6"), UciReport::GoDepth(6));
    }

    #[test]
    fn parses_go_game_time() {
        let report = parse("go wtime 60000 btime 60000 winc 0 binc 0");
        match report {
            UciReport::GoGameTime(gt) => {
                assert_eq!(gt.wtime, 60000);
                assert_eq!(gt.btime, 60000);
            }
            other => panic!("expected GoGameTime, got {other:?}"),
        }
    }

    #[test]
    fn parses_setoption_hash() {
        let report = parse("setoption name Hash value 64");
        assert_eq!(report, UciReport::SetOption(UciOptionReport::Hash("64".to_string())));
    }
}
