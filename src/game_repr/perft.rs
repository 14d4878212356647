use rayon::prelude::*;

use super::moves::Move;
use super::position::{MoveList, Position};

impl Position {
    /// Perft (Performance Test) - counts leaf nodes at a given depth
    /// Used to validate move generation correctness
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        self.generate_moves(false);

        // Bulk counting at the last ply
        if depth == 1 {
            return self.moves.len() as u64;
        }

        // make_move clears the buffers, so keep our own copy
        let moves: MoveList = self.moves.iter().copied().collect();
        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }

        nodes
    }

    /// Divide - perft count below each root move (debugging tool)
    pub fn divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        let depth = depth.max(1);
        let moves = self.legal_moves();

        moves
            .into_iter()
            .map(|mv| {
                self.make_move(mv);
                let count = self.perft(depth - 1);
                self.undo_move();
                (mv, count)
            })
            .collect()
    }

    /// Divide with each root move searched on its own clone of the position
    pub fn divide_parallel(&self, depth: u32) -> Vec<(Move, u64)> {
        let depth = depth.max(1);
        let mut root = self.clone();
        let moves = root.legal_moves();

        moves
            .into_par_iter()
            .map(|mv| {
                let mut pos = self.clone();
                pos.make_move(mv);
                (mv, pos.perft(depth - 1))
            })
            .collect()
    }
}
