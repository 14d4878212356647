use super::*;

// ==================== CHECK DETECTION TESTS ====================

#[test]
fn test_start_position_not_in_check() {
    let mut pos = Position::default();
    pos.generate_moves(false);
    assert_eq!(pos.king_checks(), 0);
    assert!(!pos.is_in_check());
}

#[test]
fn test_single_check_count() {
    let mut pos = position("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
    pos.generate_moves(false);
    assert_eq!(pos.king_checks(), 1);
    assert!(pos.is_in_check());
}

#[test]
fn test_knight_and_pawn_checks() {
    let mut pos = position("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1");
    pos.generate_moves(false);
    assert_eq!(pos.king_checks(), 1, "Knight on d3 checks e1");

    let mut pos = position("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1");
    pos.generate_moves(false);
    assert_eq!(pos.king_checks(), 1, "Pawn on d2 checks e1");
}

#[test]
fn test_double_check_only_king_moves() {
    // Rook on e8 and bishop on b4 both check e1
    let mut pos = position("k3r3/8/8/8/1b6/8/8/4K2R w K - 0 1");
    let moves = pos.legal_moves();
    assert_eq!(pos.king_checks(), 2);
    assert!(!moves.is_empty());
    assert!(
        moves.iter().all(|m| m.piece() == Type::King),
        "Only king moves are legal in double check"
    );
    assert_eq!(count_move_type(&moves, MoveType::Castle), 0);
}

#[test]
fn test_block_or_capture_checker() {
    // Rook on e8 checks, the bishop can only interpose on e3
    let mut pos = position("k3r3/8/8/8/8/8/3B4/R3K3 w Q - 0 1");
    let moves = pos.legal_moves();
    let non_king: Vec<&Move> = moves.iter().filter(|m| m.piece() != Type::King).collect();

    assert_eq!(non_king.len(), 1);
    for m in &non_king {
        assert_eq!(m.to() % 8, 4, "Non-king move {} must land on the e-file", m);
    }
    assert!(has_move(&moves, 11, 20), "Bishop blocks on e3");
}

#[test]
fn test_king_cannot_step_along_check_ray() {
    // Stepping back from the rook stays on the attacked file
    let mut pos = position("4r2k/8/8/8/8/8/4K3/8 w - - 0 1");
    let moves = pos.legal_moves();
    assert!(!has_move(&moves, 12, 4), "e1 is still attacked by the rook through e2");
    assert!(!has_move(&moves, 12, 20));
    assert!(has_move(&moves, 12, 11));
}

#[test]
fn test_king_cannot_capture_protected_piece() {
    let mut pos = position("7k/8/8/8/8/5b2/4q3/4K3 w - - 0 1");
    let moves = pos.legal_moves();
    assert!(!has_move(&moves, 4, 12), "Queen on e2 is protected by the bishop");
}

#[test]
fn test_pinned_piece_stays_on_line() {
    // Rook on e2 is pinned by the rook on e8
    let mut pos = position("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
    let moves = moves_from(&mut pos, 12);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.to() % 8 == 4));
    assert!(moves.iter().any(|m| m.to() == 60), "Pinned rook can capture the pinner");
}

#[test]
fn test_pinned_knight_has_no_moves() {
    let mut pos = position("7k/8/8/8/8/2b5/3N4/4K3 w - - 0 1");
    assert!(moves_from(&mut pos, 11).is_empty());
}

#[test]
fn test_attackers_to() {
    let pos = position("4k3/8/8/8/8/3n4/8/4K2r w - - 0 1");
    let attackers = attackers_to(pos.bitboards(), 4, Color::Black, pos.bitboards().all_occupied());
    assert_eq!(attackers, (1u64 << 19) | (1u64 << 7));
    assert!(is_square_attacked(pos.bitboards(), 5, Color::Black));
    assert!(!is_square_attacked(pos.bitboards(), 60, Color::White));
}
