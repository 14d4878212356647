//! Per-move time budgeting.
//!
//! The UCI layer passes the raw `go` fields; the budget is derived here from
//! the clock of the side to move and the game stage.

use crate::game_repr::Color;

/// Budget used for `go infinite` and for depth-limited searches without a clock
pub const INFINITE_TIME_MS: u64 = 1 << 40;

/// Raw limits of a `go` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movetime_ms: Option<u64>,
    pub depth: Option<i32>,
    pub infinite: bool,
}

/// Divisor of the remaining clock, by stage (24 = opening material)
pub fn stage_factor(stage: i32) -> u64 {
    match stage {
        s if s >= 22 => 30,
        s if s >= 18 => 22,
        s if s >= 14 => 16,
        s if s >= 10 => 12,
        s if s >= 6 => 10,
        _ => 8,
    }
}

/// Without an increment the clock must last the whole game
const NO_INCREMENT_FACTOR: u64 = 24;

/// Milliseconds to spend on this move
pub fn allocate_time_ms(params: &GoParams, side: Color, stage: i32) -> u64 {
    if params.infinite {
        return INFINITE_TIME_MS;
    }
    if let Some(movetime) = params.movetime_ms {
        return movetime.max(1);
    }

    let (remaining, increment) = match side {
        Color::White => (params.wtime_ms, params.winc_ms),
        Color::Black => (params.btime_ms, params.binc_ms),
    };
    let Some(remaining) = remaining else {
        return INFINITE_TIME_MS;
    };

    let factor = match increment {
        Some(inc) if inc > 0 => stage_factor(stage),
        _ => NO_INCREMENT_FACTOR,
    };
    (remaining / factor).max(1)
}
