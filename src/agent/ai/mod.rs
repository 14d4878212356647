// Search and evaluation
//
// Negamax with alpha-beta pruning and quiescence, driven by iterative
// deepening under a time budget. Positions are scored by a tapered
// evaluation: incremental material and piece-square terms kept by the
// position, plus pawn structure and mobility computed at the leaves.
//
// Key features:
// - Deterministic (same position and limits give the same move)
// - Transposition table with an always-replace policy
// - Pawn-structure cache keyed by the pawn skeleton
// - Hash move, MVV-LVA and killer move ordering

pub mod evaluation;
pub mod move_ordering;
pub mod negamax;
pub mod piece_square_tables;
pub mod search;
pub mod time_management;
pub mod transposition_table;

#[cfg(test)]
mod tests;

pub use evaluation::{evaluate, evaluate_relative, EvalState, PawnTable};
pub use search::{SearchInfo, SearchLimits, SearchResult, Searcher};
pub use time_management::{allocate_time_ms, GoParams};
pub use transposition_table::TranspositionTable;
