//! Search-wide constants and message types, following the shape (names,
//! message-passing split) of the teacher's `search::defs`, collapsed to a
//! single-threaded search per `spec.md` §5's Non-goals.

use crossbeam_channel::{Receiver, Sender};

use crate::board::Board;
use crate::engine::transposition::TT;
use crate::evaluation::Evaluator;
use crate::movegen::defs::Move;
use crate::movegen::MoveGenerator;

pub const INF: i32 = 25_000;
pub const CHECKMATE: i32 = 24_000;
pub const CHECKMATE_THRESHOLD: i32 = 23_900;
pub const STALEMATE: i32 = 0;
pub const DRAW: i32 = 0;
pub const ASPIRATION_WINDOW: i32 = 50;

/// Node-count mask used to poll for UCI `stop`/time-up without checking on
/// every single node (`spec.md` §5).
pub const CHECK_TERMINATION: u64 = 0x7FF;

pub const MAX_KILLER_MOVES: usize = 2;
pub const NULL_MOVE_REDUCTION: i32 = 3;
pub const LMR_MIN_DEPTH: i32 = 3;
pub const LMR_MOVE_THRESHOLD: usize = 4;
pub const LMR_REDUCTION: i32 = 1;
pub const RAZOR_MARGIN: i32 = 300;
pub const RAZOR_MAX_DEPTH: i32 = 3;
pub const FUTILITY_MARGIN: i32 = 120;
pub const FUTILITY_MAX_DEPTH: i32 = 6;
pub const DELTA_PRUNING_MARGIN: i32 = 200;
pub const IID_MIN_DEPTH: i32 = 5;
pub const IID_REDUCTION: i32 = 2;
pub const NULL_MOVE_VERIFICATION_REDUCTION: i32 = 3;

/// Cumulative cap on check/7th-rank-push/single-reply extensions along a
/// single line, so a sequence of forcing moves cannot make the search
/// effectively unbounded in depth.
pub const MAX_EXTENSION_PLY: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFlag {
    Exact,
    Alpha,
    Beta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameTime {
    pub wtime: u128,
    pub btime: u128,
    pub winc: u128,
    pub binc: u128,
    pub moves_to_go: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Depth,
    MoveTime,
    Nodes,
    GameTime,
    Infinite,
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub depth: i32,
    pub move_time: u128,
    pub nodes: u64,
    pub game_time: GameTime,
    pub search_mode: SearchMode,
    pub quiet: bool,
    pub search_moves: Vec<Move>,
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::Nothing
    }
}

impl SearchParams {
    pub fn is_game_time(&self) -> bool {
        self.search_mode == SearchMode::GameTime
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTerminate {
    Stop,
    Quit,
    Nothing,
}

#[derive(Debug, Clone)]
pub enum SearchControl {
    Start(SearchParams),
    Stop,
    Quit,
    Nothing,
}

#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub depth: i32,
    pub seldepth: i32,
    pub time: u128,
    pub cp: i32,
    pub mate: Option<i32>,
    pub nodes: u64,
    pub nps: u64,
    pub hash_full: u32,
    pub pv: Vec<Move>,
}

impl SearchSummary {
    pub fn pv_as_string(&self) -> String {
        self.pv
            .iter()
            .map(|m| m.to_uci_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub enum SearchReport {
    Finished(Move),
    SearchSummary(SearchSummary),
    InfoString(String),
}

/// Per-thread-in-spirit search state; there is only one instance since the
/// engine is single-threaded, but the name and shape mirror the teacher's
/// `SearchInfo` for continuity.
pub struct SearchInfo {
    pub depth: i32,
    pub seldepth: i32,
    pub nodes: u64,
    pub start_time: std::time::Instant,
    pub allocated_time: u128,
    pub terminate: SearchTerminate,
    pub killer_moves: [[Move; MAX_KILLER_MOVES]; crate::defs::MAX_PLY],
    /// One "mate killer" slot per ply: a move that delivered a forced-mate
    /// score in a sibling search at this ply, tried ahead of ordinary
    /// killers regardless of whether it is quiet or tactical.
    pub mate_killers: [Move; crate::defs::MAX_PLY],
    pub history: crate::movegen::select::HistoryTable,
}

impl SearchInfo {
    pub fn new() -> Self {
        SearchInfo {
            depth: 0,
            seldepth: 0,
            nodes: 0,
            start_time: std::time::Instant::now(),
            allocated_time: 0,
            terminate: SearchTerminate::Nothing,
            killer_moves: [[Move::NULL; MAX_KILLER_MOVES]; crate::defs::MAX_PLY],
            mate_killers: [Move::NULL; crate::defs::MAX_PLY],
            history: crate::movegen::select::new_history_table(),
        }
    }

    pub fn timer_start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn timer_elapsed(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    pub fn interrupted(&self) -> bool {
        self.terminate != SearchTerminate::Nothing
    }
}

impl Default for SearchInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundles everything a search node needs, avoiding a long parameter list
/// in `alpha_beta`/`quiescence` — the same trick the teacher's
/// `SearchRefs` plays.
pub struct SearchRefs<'a> {
    pub board: &'a mut Board,
    pub mg: &'a MoveGenerator,
    pub tt: &'a mut TT,
    pub evaluator: &'a mut Evaluator,
    pub search_params: &'a SearchParams,
    pub search_info: &'a mut SearchInfo,
    pub control_rx: Option<&'a Receiver<SearchControl>>,
    pub report_tx: Option<&'a Sender<SearchReport>>,
}
