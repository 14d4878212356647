use super::evaluation::{evaluate, evaluate_relative, PawnTable};
use super::negamax::{mate_in, PLY_PENALTY, WIN};
use super::search::{SearchLimits, Searcher};
use crate::config::EngineConfig;
use crate::game_repr::Position;


fn white_score(fen: &str) -> i32 {
    let mut pos = Position::from_fen(fen).unwrap();
    evaluate(&mut pos, &mut PawnTable::new())
}

fn searcher() -> Searcher {
    Searcher::new(&EngineConfig {
        hash_mb: 4,
        ..EngineConfig::default()
    })
}

fn to_depth(depth: i32) -> SearchLimits {
    SearchLimits {
        time_ms: 60_000,
        max_depth: depth,
        infinite: false,
    }
}
