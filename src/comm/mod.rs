//! Stdin/stdout plumbing for the UCI protocol (`spec.md` §6). A dedicated
//! reader thread turns GUI input lines into `CommReport`s on a channel; the
//! engine's main loop (itself single-threaded, per `spec.md` §5) drains that
//! channel between and during searches. Output is written directly by
//! whichever thread produces it, matching the teacher's fire-and-forget
//! `comm.send()` style.

pub mod uci;

use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::movegen::defs::Move;
use crate::search::defs::SearchSummary;
use uci::UciReport;

#[derive(Debug, Clone, PartialEq)]
pub enum CommReport {
    Uci(UciReport),
}

#[derive(Debug, Clone)]
pub enum CommControl {
    Identify,
    Ready,
    BestMove(Move),
    SearchSummary(SearchSummary),
    InfoString(String),
}

pub struct Comm {
    report_rx: Receiver<CommReport>,
    _reader: thread::JoinHandle<()>,
}

impl Comm {
    pub fn new() -> Self {
        let (report_tx, report_rx): (Sender<CommReport>, Receiver<CommReport>) = unbounded();
        let reader = thread::spawn(move || Self::read_stdin(report_tx));
        Comm { report_rx, _reader: reader }
    }

    fn read_stdin(report_tx: Sender<CommReport>) {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let report = CommReport::Uci(uci::parse(&line));
            let is_quit = matches!(report, CommReport::Uci(UciReport::Quit));
            if report_tx.send(report).is_err() || is_quit {
                break;
            }
        }
    }

    pub fn receiver(&self) -> &Receiver<CommReport> {
        &self.report_rx
    }

    /// Print engine output for a single `CommControl` directly to stdout.
    /// Board/history/help text bypass this channel entirely since printing
    /// them needs access to engine state this module doesn't have; the
    /// engine prints those directly instead of routing through `send`.
    pub fn send(&self, control: CommControl) {
        match control {
            CommControl::Identify => {
                println!("id name {} {}", crate::defs::ABOUT.engine, crate::defs::ABOUT.version);
                println!("id author {}", crate::defs::ABOUT.author);
                print_uci_options();
                println!("uciok");
            }
            CommControl::Ready => println!("readyok"),
            CommControl::BestMove(mv) => println!("bestmove {}", mv.to_uci_string()),
            CommControl::SearchSummary(summary) => println!("{}", format_search_summary(&summary)),
            CommControl::InfoString(msg) => println!("info string {msg}"),
        }
    }
}

impl Default for Comm {
    fn default() -> Self {
        Self::new()
    }
}

fn print_uci_options() {
    use crate::engine::defs::EngineOptionDefaults as D;
    use crate::engine::defs::EngineOptionName as N;
    println!(
        "option name {} type spin default {} min {} max {}",
        N::HASH,
        D::HASH_DEFAULT,
        D::HASH_MIN,
        D::HASH_MAX
    );
    println!("option name {} type button", N::CLEAR_HASH);
}

fn format_search_summary(s: &SearchSummary) -> String {
    let score = match s.mate {
        Some(m) => format!("score mate {m}"),
        None => format!("score cp {}", s.cp),
    };
    format!(
        "info depth {} seldepth {} {} time {} nodes {} nps {} hashfull {} pv {}",
        s.depth,
        s.seldepth,
        score,
        s.time,
        s.nodes,
        s.nps,
        s.hash_full,
        s.pv_as_string()
    )
}
