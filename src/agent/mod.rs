pub mod ai;
pub use ai::{SearchResult, Searcher, TranspositionTable};

pub mod uci;
pub use uci::{run_stdio_loop, UciEngine};
