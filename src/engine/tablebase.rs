//! Endgame tablebase probing seam (`spec.md` §4.11), grounded in the
//! original engine's Gaviota worker-pool integration (`gtb.c`). No tablebase
//! format is bundled; `TablebaseProbe` gives the rest of the engine a stable
//! interface and `NullTablebase` is the always-miss default so a probe is
//! always safe to call whether or not tables are loaded.

use crate::board::Board;
use crate::movegen::defs::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablebaseResult {
    Win,
    Loss,
    Draw,
}

pub trait TablebaseProbe: Send + Sync {
    /// Probe the current position for a known result (win/loss/draw), used
    /// at the search root and deep in the tree once few enough pieces
    /// remain on the board.
    fn probe_wdl(&self, board: &Board) -> Option<TablebaseResult>;

    /// Probe for the distance-to-zero best move at the root, used to pick a
    /// move once `probe_wdl` confirms the position is tablebase territory.
    fn probe_root(&self, board: &Board) -> Option<Move>;

    fn max_pieces(&self) -> u32;
}

/// Default tablebase backend: reports every position as a miss. A real
/// backend would load Gaviota/Syzygy files and dispatch probes across a
/// small worker pool the way `gtb.c` does with `thread_pool_t`.
pub struct NullTablebase;

impl TablebaseProbe for NullTablebase {
    fn probe_wdl(&self, _board: &Board) -> Option<TablebaseResult> {
        None
    }

    fn probe_root(&self, _board: &Board) -> Option<Move> {
        None
    }

    fn max_pieces(&self) -> u32 {
        0
    }
}

/// Bounded worker pool shape for tablebase probes, mirroring the original's
/// `init_thread_pool`/`gtb_probe_firm_worker` split: a fixed set of worker
/// threads pull probe requests off a channel and return results on another,
/// so probing never blocks the search thread on disk I/O.
pub struct TablebasePool {
    workers: Vec<std::thread::JoinHandle<()>>,
    request_tx: Option<crossbeam_channel::Sender<PoolRequest>>,
}

struct PoolRequest {
    board: Board,
    reply_tx: crossbeam_channel::Sender<Option<TablebaseResult>>,
}

impl TablebasePool {
    pub fn new(worker_count: usize, backend: std::sync::Arc<dyn TablebaseProbe>) -> Self {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<PoolRequest>();
        let workers = (0..worker_count.max(1))
            .map(|_| {
                let request_rx = request_rx.clone();
                let backend = std::sync::Arc::clone(&backend);
                std::thread::spawn(move || {
                    while let Ok(req) = request_rx.recv() {
                        let result = backend.probe_wdl(&req.board);
                        let _ = req.reply_tx.send(result);
                    }
                })
            })
            .collect();
        TablebasePool { workers, request_tx: Some(request_tx) }
    }

    pub fn probe(&self, board: &Board) -> Option<TablebaseResult> {
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        self.request_tx
            .as_ref()?
            .send(PoolRequest { board: board.clone_for_search(), reply_tx })
            .ok()?;
        reply_rx.recv().ok().flatten()
    }
}

impl Drop for TablebasePool {
    fn drop(&mut self) {
        // Drop the sender first so workers' `recv()` calls return `Err` and
        // their loops exit; otherwise `join` below would hang forever.
        self.request_tx.take();
        while let Some(handle) = self.workers.pop() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn null_tablebase_always_misses() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let tb = NullTablebase;
        assert_eq!(tb.probe_wdl(&board), None);
        assert_eq!(tb.probe_root(&board), None);
    }

    #[test]
    fn pool_probe_returns_none_for_null_backend() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let pool = TablebasePool::new(2, std::sync::Arc::new(NullTablebase));
        assert_eq!(pool.probe(&board), None);
    }
}
