use super::*;

// ==================== KIWIPETE PERFT TESTS ====================
// Position 2: castling, en passant, promotions and pins
// FEN: r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn test_perft_kiwipete_depth_1() {
    let mut pos = position(KIWIPETE);
    assert_eq!(pos.perft(1), 48);
}

#[test]
fn test_perft_kiwipete_depth_2() {
    let mut pos = position(KIWIPETE);
    assert_eq!(pos.perft(2), 2039);
}

#[test]
fn test_perft_kiwipete_depth_3() {
    let mut pos = position(KIWIPETE);
    assert_eq!(pos.perft(3), 97862);
}

#[test]
#[ignore]
fn test_perft_kiwipete_depth_4() {
    let mut pos = position(KIWIPETE);
    assert_eq!(pos.perft(4), 4085603);
}

#[test]
fn test_kiwipete_move_kinds() {
    let mut pos = position(KIWIPETE);
    let moves = pos.legal_moves();
    assert_eq!(count_move_type(&moves, MoveType::Castle), 2);
    assert_eq!(count_move_type(&moves, MoveType::Capture), 8);
    assert_eq!(count_move_type(&moves, MoveType::EnPassant), 0);
}
