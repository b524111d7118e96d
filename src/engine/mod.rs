//! The `Engine`: owns every piece of mutable state (board, evaluator,
//! transposition table, the UCI comm channel) and drives the main command
//! loop, following the shape of the teacher's `Engine`/`comm_reports` pair
//! collapsed onto a single search thread (`spec.md` §5's Non-goals).

pub mod about;
pub mod defs;
pub mod tablebase;
pub mod transposition;
pub mod utils;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, RecvTimeoutError};

use crate::board::Board;
use crate::comm::uci::{UciOptionReport, UciReport};
use crate::comm::{Comm, CommControl, CommReport};
use crate::evaluation::Evaluator;
use crate::misc::cmdline::CmdLine;
use crate::movegen::defs::Move;
use crate::movegen::MoveGenerator;
use crate::search::defs::{SearchControl, SearchInfo, SearchMode, SearchParams, SearchRefs, SearchReport};

use defs::Settings;
use tablebase::{NullTablebase, TablebasePool};
use transposition::TT;

pub struct Engine {
    board: Board,
    mg: MoveGenerator,
    evaluator: Evaluator,
    tt: TT,
    tablebase: TablebasePool,
    comm: Comm,
    settings: Settings,
    cmdline: CmdLine,
    pending_reports: Vec<CommReport>,
    quit: bool,
}

impl Engine {
    pub fn new() -> Self {
        let cmdline = CmdLine::new();
        let settings = Settings {
            quiet: cmdline.has_quiet(),
            tt_size_mb: cmdline.hash(),
            threads: cmdline.threads(),
        };

        Engine {
            board: Board::new(),
            mg: MoveGenerator::new(),
            evaluator: Evaluator::new(),
            tt: TT::new(settings.tt_size_mb),
            tablebase: TablebasePool::new(2, Arc::new(NullTablebase)),
            comm: Comm::new(),
            settings,
            cmdline,
            pending_reports: Vec::new(),
            quit: false,
        }
    }

    /// Sets up the initial position (per `--fen`/`--kiwipete`), runs perft
    /// and exits if `--perft` was given, then drives the UCI command loop
    /// until `quit`.
    pub fn run(&mut self) -> crate::defs::EngineRunResult {
        self.setup_position()?;

        if self.cmdline.perft() > 0 {
            self.run_perft(self.cmdline.perft());
            return Ok(());
        }

        if !self.settings.quiet {
            self.print_ascii_logo();
            self.print_about(&self.settings);
        }

        while !self.quit {
            let report = self.next_report();
            self.comm_reports(report);
        }

        Ok(())
    }

    fn next_report(&mut self) -> CommReport {
        if !self.pending_reports.is_empty() {
            return self.pending_reports.remove(0);
        }
        self.comm
            .receiver()
            .recv()
            .unwrap_or(CommReport::Uci(UciReport::Quit))
    }

    fn comm_reports(&mut self, report: CommReport) {
        match report {
            CommReport::Uci(uci_report) => self.comm_reports_uci(uci_report),
        }
    }

    fn comm_reports_uci(&mut self, report: UciReport) {
        match report {
            UciReport::Uci => self.comm.send(CommControl::Identify),
            UciReport::UciNewGame => {
                self.board = Board::new();
                self.tt.clear();
                self.evaluator.clear_caches();
            }
            UciReport::IsReady => self.comm.send(CommControl::Ready),
            UciReport::SetOption(option) => self.set_option(option),
            UciReport::Position(fen, moves) => self.set_position(&fen, &moves),
            UciReport::GoInfinite => self.go(SearchParams {
                search_mode: SearchMode::Infinite,
                ..Default::default()
            }),
            UciReport::GoDepth(d) => self.go(SearchParams {
                depth: d,
                search_mode: SearchMode::Depth,
                ..Default::default()
            }),
            UciReport::GoMoveTime(ms) => self.go(SearchParams {
                move_time: ms,
                search_mode: SearchMode::MoveTime,
                ..Default::default()
            }),
            UciReport::GoNodes(n) => self.go(SearchParams {
                nodes: n,
                search_mode: SearchMode::Nodes,
                ..Default::default()
            }),
            UciReport::GoGameTime(gt) => self.go(SearchParams {
                game_time: gt,
                search_mode: SearchMode::GameTime,
                ..Default::default()
            }),
            UciReport::Stop | UciReport::Unknown => (),
            UciReport::Quit => self.quit = true,
            UciReport::Board => println!("{}", self.board.to_fen()),
            UciReport::History => self.print_history(),
            UciReport::Eval => {
                let score = self.evaluator.evaluate(&self.board);
                self.comm.send(CommControl::InfoString(format!("eval {score}")));
            }
            UciReport::Help => self.print_help(),
        }
    }

    fn set_option(&mut self, option: UciOptionReport) {
        match option {
            UciOptionReport::Hash(value) => match value.trim().parse::<usize>() {
                Ok(mb) => {
                    self.settings.tt_size_mb = mb;
                    self.tt.resize(mb);
                }
                Err(_) => self
                    .comm
                    .send(CommControl::InfoString(defs::ErrNormal::NOT_INT.to_string())),
            },
            UciOptionReport::ClearHash => self.tt.clear(),
            UciOptionReport::Nothing => (),
        }
    }

    fn set_position(&mut self, fen: &str, moves: &[String]) {
        let previous = self.board.clone();
        if self.board.set_from_fen(fen).is_err() {
            self.board = previous;
            self.comm
                .send(CommControl::InfoString(defs::ErrNormal::FEN_FAILED.to_string()));
            return;
        }
        for mv in moves {
            if !self.execute_move(mv) {
                self.comm
                    .send(CommControl::InfoString(defs::ErrNormal::NOT_LEGAL.to_string()));
                break;
            }
        }
    }

    fn print_history(&self) {
        for key in self.board.history.recent_keys(self.board.history.len()) {
            println!("{key:016x}");
        }
    }

    /// Runs a synchronous search to completion, plays the resulting move on
    /// the board, and reports it to the GUI.
    fn go(&mut self, sp: SearchParams) {
        let best_move = self.search(sp);
        if !best_move.is_null() {
            self.board.make(best_move);
        }
        self.comm.send(CommControl::BestMove(best_move));
    }

    /// Runs `think` synchronously on the calling thread. A short-lived
    /// forwarder thread bridges `Comm`'s stdin channel to the search's own
    /// control channel so a `stop`/`quit` arriving mid-search is seen by
    /// `check_up` without the search loop ever blocking on stdin itself.
    /// Anything other than `stop`/`quit` received meanwhile is deferred and
    /// replayed by `next_report` once the search returns.
    fn search(&mut self, search_params: SearchParams) -> Move {
        if let Some(result) = self.tablebase.probe(&self.board) {
            self.comm
                .send(CommControl::InfoString(format!("tablebase result {result:?}")));
        }

        let (control_tx, control_rx) = unbounded::<SearchControl>();
        let (report_tx, report_rx) = unbounded::<SearchReport>();

        let comm_rx = self.comm.receiver().clone();
        let stop_forwarding = Arc::new(AtomicBool::new(false));
        let forwarder_stop = Arc::clone(&stop_forwarding);
        let deferred = Arc::new(Mutex::new(Vec::new()));
        let forwarder_deferred = Arc::clone(&deferred);

        let forwarder = thread::spawn(move || {
            while !forwarder_stop.load(Ordering::Relaxed) {
                match comm_rx.recv_timeout(Duration::from_millis(20)) {
                    Ok(CommReport::Uci(UciReport::Stop)) => {
                        let _ = control_tx.send(SearchControl::Stop);
                    }
                    Ok(CommReport::Uci(UciReport::Quit)) => {
                        let _ = control_tx.send(SearchControl::Quit);
                        break;
                    }
                    Ok(other) => forwarder_deferred.lock().unwrap().push(other),
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        let mut search_info = SearchInfo::new();
        let best_move = {
            let mut refs = SearchRefs {
                board: &mut self.board,
                mg: &self.mg,
                tt: &mut self.tt,
                evaluator: &mut self.evaluator,
                search_params: &search_params,
                search_info: &mut search_info,
                control_rx: Some(&control_rx),
                report_tx: Some(&report_tx),
            };
            crate::search::think(&mut refs)
        };

        stop_forwarding.store(true, Ordering::Relaxed);
        let _ = forwarder.join();

        if let Ok(mutex) = Arc::try_unwrap(deferred) {
            let mut carried = mutex.into_inner().unwrap_or_default();
            self.pending_reports.append(&mut carried);
        }

        while let Ok(report) = report_rx.try_recv() {
            match report {
                SearchReport::SearchSummary(summary) => self.comm.send(CommControl::SearchSummary(summary)),
                SearchReport::InfoString(s) => self.comm.send(CommControl::InfoString(s)),
                SearchReport::Finished(_) => {}
            }
        }

        best_move
    }

    fn run_perft(&mut self, depth: u8) {
        use crate::movegen::defs::MoveType;
        use std::time::Instant;

        fn count(board: &mut Board, mg: &MoveGenerator, depth: u8) -> u64 {
            if depth == 0 {
                return 1;
            }
            let mut list = crate::movegen::defs::MoveList::new();
            mg.generate_moves(board, &mut list, MoveType::All);
            let mut nodes = 0;
            for i in 0..list.len() {
                let mv = list.get_move(i);
                if board.make(mv) {
                    nodes += count(board, mg, depth - 1);
                    board.unmake();
                }
            }
            nodes
        }

        let start = Instant::now();
        let mut total = 0u64;
        let mut list = crate::movegen::defs::MoveList::new();
        self.mg.generate_moves(&self.board, &mut list, MoveType::All);
        for i in 0..list.len() {
            let mv = list.get_move(i);
            if self.board.make(mv) {
                let nodes = count(&mut self.board, &self.mg, depth - 1);
                self.board.unmake();
                println!("{}: {nodes}", mv.to_uci_string());
                total += nodes;
            }
        }
        let elapsed = start.elapsed().as_millis().max(1);
        println!("\nNodes searched: {total}");
        println!("Time: {elapsed} ms ({} nps)", total * 1000 / elapsed as u64);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_option_hash_resizes_tt() {
        let mut engine = Engine {
            board: Board::new(),
            mg: MoveGenerator::new(),
            evaluator: Evaluator::new(),
            tt: TT::new(1),
            tablebase: TablebasePool::new(1, Arc::new(NullTablebase)),
            comm: Comm::new(),
            settings: Settings::default(),
            cmdline: CmdLine::for_test(),
            pending_reports: Vec::new(),
            quit: false,
        };
        engine.set_option(UciOptionReport::Hash("4".to_string()));
        assert_eq!(engine.settings.tt_size_mb, 4);
    }
}
