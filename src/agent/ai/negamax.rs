// Negamax Search with Alpha-Beta Pruning
//
// One recursive function covers the main search and quiescence. Remaining
// depth `d` counts down through zero into negative values: above zero every
// legal move is searched, between zero and the quiescence floor only threats
// are, and at the floor the static evaluation is returned.
//
// The function returns scores from the perspective of the side to move.
// `None` means the search was stopped and the value must be discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::evaluation::{evaluate_relative, PawnTable};
use super::move_ordering::{order_moves, OrderingHints};
use super::transposition_table::{NodeType, TranspositionTable, TranspositionTableEntry};
use crate::game_repr::{Move, Position, MAX_PLY};

/// Window bound, larger than any reachable score
pub const INF: i32 = 1_000_000;

/// Score for delivering mate at the root
pub const WIN: i32 = 100_000;

/// Mate scores shrink by this much per ply so shorter mates score higher
pub const PLY_PENALTY: i32 = 100;

/// Scores at least this large in magnitude are forced mates
pub const MATE_THRESHOLD: i32 = WIN - (MAX_PLY as i32) * PLY_PENALTY;

/// Quiescence floor for an iteration of nominal depth `depth`
pub fn quiescence_depth(depth: i32) -> i32 {
    if depth <= 2 {
        0
    } else {
        -((depth - 2) * 2).min(8)
    }
}

/// Moves to mate for a mate score, positive when the side to move mates
pub fn mate_in(score: i32) -> Option<i32> {
    if score.abs() < MATE_THRESHOLD {
        return None;
    }
    let plies = (WIN - score.abs()) / PLY_PENALTY;
    let moves = (plies + 1) / 2;
    Some(if score > 0 { moves } else { -moves })
}

/// State shared by every node of one iteration
pub struct SearchContext<'a> {
    pub pos: &'a mut Position,
    pub tt: &'a mut TranspositionTable,
    pub pawns: &'a mut PawnTable,
    stop: &'a AtomicBool,
    start: Instant,
    budget: Duration,
    check_interval: u64,
    since_check: u64,
    timed_out: bool,
    /// Nominal depth of the running iteration
    pub initial_depth: i32,
    /// Best root move of the previous iteration, ordered right after the hash move
    pub root_best: Move,
    /// Best root move found so far in this iteration
    pub best_so_far: Move,
    pub nodes: u64,
}

impl<'a> SearchContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pos: &'a mut Position,
        tt: &'a mut TranspositionTable,
        pawns: &'a mut PawnTable,
        stop: &'a AtomicBool,
        start: Instant,
        budget: Duration,
        check_interval: u64,
        initial_depth: i32,
        root_best: Move,
    ) -> Self {
        Self {
            pos,
            tt,
            pawns,
            stop,
            start,
            budget,
            check_interval: check_interval.max(1),
            since_check: 0,
            timed_out: false,
            initial_depth,
            root_best,
            best_so_far: Move::NULL,
            nodes: 0,
        }
    }

    /// Poll the clock and the stop flag every `check_interval` nodes.
    /// Returns true once the search must unwind.
    #[inline]
    fn should_stop(&mut self) -> bool {
        if self.timed_out {
            return true;
        }
        self.since_check += 1;
        if self.since_check < self.check_interval {
            return false;
        }
        self.since_check = 0;
        if self.start.elapsed() >= self.budget {
            self.timed_out = true;
        }
        self.timed_out || self.stop.load(Ordering::Relaxed)
    }

    /// The time budget ran out during this iteration
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Negamax with alpha-beta pruning at remaining depth `depth`, `ply`
    /// moves from the root
    pub fn negamax(&mut self, depth: i32, mut alpha: i32, beta: i32, qs_depth: i32, ply: usize) -> Option<i32> {
        self.nodes += 1;
        if self.should_stop() {
            return None;
        }

        if ply >= MAX_PLY - 1 {
            return Some(evaluate_relative(self.pos, self.pawns));
        }

        let root = ply == 0;
        let mut depth = depth;
        let alpha_orig = alpha;
        let hash = self.pos.hash();

        // Transposition table lookup
        let mut hash_move = Move::NULL;
        if depth > 0 {
            if let Some(entry) = self.tt.probe(hash) {
                // The root always searches so the iteration yields a move
                if !root && entry.depth >= depth {
                    match entry.node_type {
                        NodeType::Exact if alpha < entry.score && entry.score < beta => return Some(entry.score),
                        NodeType::LowerBound if entry.score >= beta => return Some(beta),
                        NodeType::UpperBound if entry.score <= alpha => return Some(alpha),
                        _ => {}
                    }
                }
                hash_move = entry.best_move;
            }
        }

        // Terminal detection only needs a single move at the floor
        let mut partial = depth <= qs_depth;
        self.pos.generate_moves(partial);

        if self.pos.moves().is_empty() {
            return Some(if self.pos.king_checks() > 0 {
                -(WIN - ply as i32 * PLY_PENALTY)
            } else {
                0
            });
        }
        if !root && self.pos.is_rule_draw() {
            return Some(0);
        }

        // Check extension
        if self.pos.king_checks() > 0 && self.initial_depth > 2 && depth <= self.initial_depth - 2 {
            depth += 1;
            if partial && depth > qs_depth {
                self.pos.generate_moves(false);
                partial = false;
            }
        }

        if partial {
            return Some(evaluate_relative(self.pos, self.pawns));
        }

        let quiescent = depth <= 0;
        if quiescent {
            let stand_pat = evaluate_relative(self.pos, self.pawns);
            if stand_pat >= beta {
                return Some(beta);
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }

        let hints = OrderingHints {
            hash_move,
            root_best: if root { self.root_best } else { Move::NULL },
            killers: self.pos.killers(ply),
        };
        let them = self.pos.side_to_move().opposite();
        let moves = order_moves(self.pos.moves(), self.pos.bitboards(), them, &hints, quiescent);

        let mut best_move = Move::NULL;
        for mv in moves {
            self.pos.make_move(mv);
            let score = self.negamax(depth - 1, -beta, -alpha, qs_depth, ply + 1);
            self.pos.undo_move();
            let value = -score?;

            if root && value > alpha {
                self.best_so_far = mv;
            }

            if value >= beta {
                if mv.is_quiet() {
                    self.pos.store_killer(ply, mv);
                }
                if depth > 0 {
                    self.tt.store(TranspositionTableEntry {
                        hash,
                        depth,
                        score: beta,
                        best_move: mv,
                        node_type: NodeType::LowerBound,
                    });
                }
                return Some(beta);
            }

            if value > alpha {
                alpha = value;
                best_move = mv;
            }
        }

        if depth > 0 {
            let (node_type, best_move) = if alpha > alpha_orig {
                (NodeType::Exact, best_move)
            } else {
                (NodeType::UpperBound, Move::NULL)
            };
            self.tt.store(TranspositionTableEntry {
                hash,
                depth,
                score: alpha,
                best_move,
                node_type,
            });
        }

        Some(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fen: &str, depth: i32) -> (Option<i32>, Move, Position) {
        let mut pos = Position::from_fen(fen).unwrap();
        let mut tt = TranspositionTable::with_capacity(1 << 16);
        let mut pawns = PawnTable::new();
        let stop = AtomicBool::new(false);
        let (score, best) = {
            let mut ctx = SearchContext::new(
                &mut pos,
                &mut tt,
                &mut pawns,
                &stop,
                Instant::now(),
                Duration::from_secs(3600),
                5000,
                depth,
                Move::NULL,
            );
            let score = ctx.negamax(depth, -INF, INF, quiescence_depth(depth), 0);
            (score, ctx.best_so_far)
        };
        (score, best, pos)
    }

    #[test]
    fn test_quiescence_depth_mapping() {
        let floors: Vec<i32> = (1..=8).map(quiescence_depth).collect();
        assert_eq!(floors, vec![0, 0, -2, -4, -6, -8, -8, -8]);
    }

    #[test]
    fn test_mate_in_conversion() {
        assert_eq!(mate_in(WIN - PLY_PENALTY), Some(1));
        assert_eq!(mate_in(WIN - 3 * PLY_PENALTY), Some(2));
        assert_eq!(mate_in(-(WIN - 2 * PLY_PENALTY)), Some(-1));
        assert_eq!(mate_in(350), None);
    }

    #[test]
    fn test_finds_mate_in_one() {
        let (score, best, mut pos) = run("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 2);
        assert_eq!(best.to_uci(), "a1a8");
        assert_eq!(score, Some(WIN - PLY_PENALTY));

        pos.make_move(best);
        assert!(pos.evaluate_game_state().is_over());
    }

    #[test]
    fn test_search_restores_position() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let (score, best, pos) = run(fen, 3);
        assert!(score.is_some());
        assert!(!best.is_null());
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(pos.ply(), 0);
        assert_eq!(pos.hash(), pos.compute_hash());
    }

    #[test]
    fn test_wins_hanging_queen() {
        let (score, best, _) = run("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 2);
        assert_eq!(best.to_uci(), "d1d5");
        assert!(score.unwrap() > 300);
    }

    #[test]
    fn test_stalemate_scores_zero() {
        let (score, best, _) = run("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2);
        assert_eq!(score, Some(0));
        assert!(best.is_null());
    }

    #[test]
    fn test_checkmated_side_scores_loss() {
        let (score, _, _) = run("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 3);
        assert_eq!(score, Some(-WIN));
    }

    #[test]
    fn test_stop_flag_terminates() {
        let mut pos = Position::default();
        let mut tt = TranspositionTable::with_capacity(1024);
        let mut pawns = PawnTable::new();
        let stop = AtomicBool::new(true);
        let mut ctx = SearchContext::new(
            &mut pos,
            &mut tt,
            &mut pawns,
            &stop,
            Instant::now(),
            Duration::from_secs(3600),
            1,
            4,
            Move::NULL,
        );
        assert_eq!(ctx.negamax(4, -INF, INF, quiescence_depth(4), 0), None);
        assert_eq!(ctx.best_so_far, Move::NULL);
    }

    #[test]
    fn test_zero_budget_terminates_and_unwinds() {
        let mut pos = Position::default();
        let mut tt = TranspositionTable::with_capacity(1024);
        let mut pawns = PawnTable::new();
        let stop = AtomicBool::new(false);
        {
            let mut ctx = SearchContext::new(
                &mut pos,
                &mut tt,
                &mut pawns,
                &stop,
                Instant::now(),
                Duration::ZERO,
                50,
                6,
                Move::NULL,
            );
            assert_eq!(ctx.negamax(6, -INF, INF, quiescence_depth(6), 0), None);
            assert!(ctx.timed_out());
        }
        assert!(!stop.load(Ordering::Relaxed), "The shared flag belongs to the caller");
        assert_eq!(pos.to_fen(), crate::game_repr::START_FEN);
    }
}
