// Move ordering
//
// The generator already splits moves into threats and quiets. Ordering puts
// the hash move first, then the previous iteration's best move at the root,
// then threats by MVV-LVA with promotion gain, then killers ahead of the
// remaining quiet moves. Scores ride in the move's upper bits.

use super::evaluation::piece_value;
use crate::game_repr::{Bitboards, Color, Move, MoveBuffers, MoveList, MoveType, Type};

/// What the search knows about a node before ordering its moves
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderingHints {
    /// Best move stored in the transposition table, `Move::NULL` if none
    pub hash_move: Move,
    /// Best move of the last completed iteration, set only at the root
    pub root_best: Move,
    pub killers: [Move; 2],
}

/// MVV-LVA score of a threat move plus the material gained by promoting
pub fn threat_score(mv: Move, bitboards: &Bitboards, them: Color) -> i32 {
    let mut score = 0;
    if let Some(promoted) = mv.promotion_type() {
        score += piece_value(promoted) - piece_value(Type::Pawn);
    }
    let victim = match mv.move_type() {
        MoveType::EnPassant => Some(Type::Pawn),
        MoveType::Capture => bitboards.type_at(them, mv.to()),
        _ => None,
    };
    if let Some(victim) = victim {
        score += piece_value(victim) - piece_value(mv.piece());
    }
    score
}

/// Build the search order for the moves in `buffers`. With `threats_only`
/// quiet moves are dropped, as quiescence requires.
pub fn order_moves(
    buffers: &MoveBuffers,
    bitboards: &Bitboards,
    them: Color,
    hints: &OrderingHints,
    threats_only: bool,
) -> MoveList {
    let mut ordered = MoveList::new();

    let in_threats = |mv: Move| !mv.is_null() && buffers.threat.contains(&mv);
    let in_quiets = |mv: Move| !mv.is_null() && !threats_only && buffers.quiet.contains(&mv);

    let hash_move = if in_threats(hints.hash_move) || in_quiets(hints.hash_move) {
        ordered.push(hints.hash_move);
        hints.hash_move
    } else {
        Move::NULL
    };

    let root_best = if hints.root_best != hash_move && (in_threats(hints.root_best) || in_quiets(hints.root_best)) {
        ordered.push(hints.root_best);
        hints.root_best
    } else {
        Move::NULL
    };

    let already_placed = |mv: Move| mv == hash_move || mv == root_best;

    let mut threats: MoveList = buffers
        .threat
        .iter()
        .filter(|mv| !already_placed(**mv))
        .map(|&mv| mv.with_score(threat_score(mv, bitboards, them)))
        .collect();
    // Stable, so equal scores keep generation order
    threats.sort_by_key(|mv| std::cmp::Reverse(mv.score()));
    ordered.extend(threats);

    if threats_only {
        return ordered;
    }

    let mut killers = [Move::NULL; 2];
    for (slot, &killer) in killers.iter_mut().zip(hints.killers.iter()) {
        if in_quiets(killer) && !already_placed(killer) {
            ordered.push(killer);
            *slot = killer;
        }
    }
    let placed_killer = |mv: Move| killers.iter().any(|k| !k.is_null() && *k == mv);

    ordered.extend(
        buffers
            .quiet
            .iter()
            .filter(|mv| !already_placed(**mv) && !placed_killer(**mv))
            .copied(),
    );
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::Position;

    fn ordered(pos: &mut Position, hints: &OrderingHints, threats_only: bool) -> MoveList {
        pos.generate_moves(false);
        let them = pos.side_to_move().opposite();
        order_moves(pos.moves(), pos.bitboards(), them, hints, threats_only)
    }

    #[test]
    fn test_ordering_keeps_every_move() {
        let mut pos = Position::default();
        let moves = ordered(&mut pos, &OrderingHints::default(), false);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn test_captures_sorted_by_victim_and_attacker() {
        // Pawn and knight can both take the queen, the rook can take a pawn
        let mut pos = position_with_targets();
        let moves = ordered(&mut pos, &OrderingHints::default(), false);

        assert_eq!(moves[0].to_uci(), "d3e4", "Pawn takes queen comes first");
        assert_eq!(moves[1].to_uci(), "c3e4", "Knight takes queen comes second");
        assert!(moves[0].score() > moves[1].score());
    }

    fn position_with_targets() -> Position {
        Position::from_fen("4k3/8/8/p7/4q3/2NP4/8/R5K1 w - - 0 1").unwrap()
    }

    #[test]
    fn test_hash_move_first_then_root_best() {
        let mut pos = Position::default();
        let hash_move = pos.parse_uci_move("g1f3").unwrap();
        let root_best = pos.parse_uci_move("d2d4").unwrap();
        let hints = OrderingHints {
            hash_move,
            root_best,
            killers: [Move::NULL; 2],
        };

        let moves = ordered(&mut pos, &hints, false);
        assert_eq!(moves[0], hash_move);
        assert_eq!(moves[1], root_best);
        assert_eq!(moves.len(), 20, "Hint moves are not duplicated");
    }

    #[test]
    fn test_killers_lead_the_quiet_moves() {
        let mut pos = position_with_targets();
        let killer1 = pos.parse_uci_move("a1b1").unwrap();
        let killer2 = pos.parse_uci_move("g1f2").unwrap();
        let hints = OrderingHints {
            killers: [killer1, killer2],
            ..OrderingHints::default()
        };

        let moves = ordered(&mut pos, &hints, false);
        let threats = pos.moves().threat.len();
        assert_eq!(moves[threats], killer1);
        assert_eq!(moves[threats + 1], killer2);
        assert_eq!(moves.len(), pos.moves().len());
    }

    #[test]
    fn test_quiet_hash_move_dropped_in_quiescence() {
        let mut pos = position_with_targets();
        let hints = OrderingHints {
            hash_move: pos.parse_uci_move("a1b1").unwrap(),
            ..OrderingHints::default()
        };
        let moves = ordered(&mut pos, &hints, true);
        assert!(moves.iter().all(|m| !m.is_quiet()));
        assert_eq!(moves.len(), pos.moves().threat.len());
    }

    #[test]
    fn test_promotion_gain_counts() {
        let mut pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = ordered(&mut pos, &OrderingHints::default(), true);
        assert_eq!(moves[0].to_uci(), "a7b8q", "Capturing while promoting to a queen is best");
        assert_eq!(moves[0].score(), 800 + 500 - 100);
    }

    #[test]
    fn test_illegal_hint_is_ignored() {
        let mut pos = Position::default();
        let hints = OrderingHints {
            hash_move: Move::new(12, 36, Type::Pawn, MoveType::Quiet),
            ..OrderingHints::default()
        };
        let moves = ordered(&mut pos, &hints, false);
        assert_eq!(moves.len(), 20);
        assert!(!moves.contains(&hints.hash_move));
    }
}
