// Iterative Deepening Search Driver
//
// Searches depth 2, 3, ... until the time budget, the depth cap or a stop
// request ends it. Only completed iterations are committed; the best move of
// one iteration is tried first at the root of the next.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use super::evaluation::PawnTable;
use super::negamax::{mate_in, quiescence_depth, SearchContext, INF, MATE_THRESHOLD};
use super::transposition_table::TranspositionTable;
use crate::config::{EngineConfig, MAX_SEARCH_DEPTH};
use crate::game_repr::{Move, Position};

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Limits of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub time_ms: u64,
    pub max_depth: i32,
    /// Keep going after a mate or the depth cap until the stop flag is raised
    pub infinite: bool,
}

/// Progress report after each completed iteration
#[derive(Debug, Clone)]
pub struct SearchInfo {
    pub depth: i32,
    pub score: i32,
    pub nodes: u64,
    pub time_ms: u64,
    pub hashfull: u64,
    pub pv: Vec<Move>,
}

impl SearchInfo {
    /// Nodes per second
    pub fn nps(&self) -> u64 {
        self.nodes * 1000 / self.time_ms.max(1)
    }

    /// UCI `info` line
    pub fn to_uci(&self) -> String {
        let score = match mate_in(self.score) {
            Some(moves) => format!("mate {}", moves),
            None => format!("cp {}", self.score),
        };
        let mut line = format!(
            "info depth {} score {} nodes {} time {} nps {} hashfull {}",
            self.depth,
            score,
            self.nodes,
            self.time_ms,
            self.nps(),
            self.hashfull
        );
        if !self.pv.is_empty() {
            let pv: Vec<String> = self.pv.iter().map(|m| m.to_uci()).collect();
            line.push_str(" pv ");
            line.push_str(&pv.join(" "));
        }
        line
    }
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move of the last completed iteration
    pub best_move: Option<Move>,
    pub score: i32,
    /// Depth of the last completed iteration, 0 if none completed
    pub depth: i32,
    pub nodes: u64,
    pub time_ms: u64,
    /// True when time or a stop request cut the search short
    pub stopped: bool,
}

/// Owns the tables that live across searches
pub struct Searcher {
    tt: TranspositionTable,
    pawns: PawnTable,
    stop: Arc<AtomicBool>,
    reuse_tt: bool,
    time_check_interval: u64,
}

impl Searcher {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::with_size_mb(config.hash_mb),
            pawns: PawnTable::new(),
            stop: Arc::new(AtomicBool::new(false)),
            reuse_tt: config.reuse_tt,
            time_check_interval: config.time_check_interval,
        }
    }

    /// Flag that ends the running search at the next time check. The owner
    /// lowers it again once the stop has been handled.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn resize_tt(&mut self, mb: usize) {
        self.tt = TranspositionTable::with_size_mb(mb);
        debug!("transposition table resized to {} entries", self.tt.capacity());
    }

    /// Forget everything learned in the previous game
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.pawns.clear();
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Iterative deepening from `pos`. `on_iteration` is called after each
    /// completed depth. The position is restored before returning.
    pub fn search<F>(&mut self, pos: &mut Position, limits: SearchLimits, mut on_iteration: F) -> SearchResult
    where
        F: FnMut(&SearchInfo),
    {
        if !self.reuse_tt {
            self.tt.clear();
        }
        pos.clear_killers();

        let start = Instant::now();
        let budget = Duration::from_millis(limits.time_ms);
        let max_depth = limits.max_depth.clamp(1, MAX_SEARCH_DEPTH);

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            time_ms: 0,
            stopped: false,
        };
        let mut best = Move::NULL;

        for depth in 2.min(max_depth)..=max_depth {
            let mut ctx = SearchContext::new(
                pos,
                &mut self.tt,
                &mut self.pawns,
                &self.stop,
                start,
                budget,
                self.time_check_interval,
                depth,
                best,
            );
            let outcome = ctx.negamax(depth, -INF, INF, quiescence_depth(depth), 0);
            let best_so_far = ctx.best_so_far;
            let timed_out = ctx.timed_out();
            result.nodes += ctx.nodes;

            let Some(score) = outcome else {
                let reason = if timed_out { "time budget spent" } else { "stop requested" };
                debug!(
                    "search ended during depth {} after {} ms: {}",
                    depth,
                    start.elapsed().as_millis(),
                    reason
                );
                result.stopped = true;
                break;
            };
            if best_so_far.is_null() {
                // No legal move at the root
                result.score = score;
                break;
            }

            best = best_so_far;
            result.best_move = Some(best);
            result.score = score;
            result.depth = depth;
            result.time_ms = start.elapsed().as_millis() as u64;

            let info = SearchInfo {
                depth,
                score,
                nodes: result.nodes,
                time_ms: result.time_ms,
                hashfull: self.tt.hashfull(),
                pv: principal_variation(pos, &mut self.tt, best, depth as usize),
            };
            debug!(
                "depth {} score {} best {} nodes {} tt hit rate {:.2}",
                depth,
                score,
                best,
                result.nodes,
                self.tt.hit_rate()
            );
            on_iteration(&info);

            if score.abs() >= MATE_THRESHOLD && !limits.infinite {
                debug!("forced mate found at depth {}", depth);
                break;
            }
            if self.stop.load(Ordering::Relaxed) || start.elapsed() >= budget {
                result.stopped = true;
                break;
            }
        }

        if limits.infinite && !self.stop.load(Ordering::Relaxed) {
            debug!("search finished at depth {}, waiting for stop", result.depth);
            while !self.stop.load(Ordering::Relaxed) {
                thread::sleep(STOP_POLL_INTERVAL);
            }
        }

        result.time_ms = start.elapsed().as_millis() as u64;
        result
    }
}

/// Best line from the root: the committed move followed by stored hash moves
fn principal_variation(pos: &mut Position, tt: &mut TranspositionTable, best: Move, max_len: usize) -> Vec<Move> {
    let mut pv = vec![best];
    pos.make_move(best);
    while pv.len() < max_len.max(1) {
        let Some(entry) = tt.probe(pos.hash()) else {
            break;
        };
        let mv = entry.best_move;
        pos.generate_moves(false);
        if mv.is_null() || !pos.moves().contains(mv) || pos.is_threefold_repetition() {
            break;
        }
        pv.push(mv);
        pos.make_move(mv);
    }
    for _ in 0..pv.len() {
        pos.undo_move();
    }
    pv
}
