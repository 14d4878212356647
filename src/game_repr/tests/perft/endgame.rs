use super::*;

// ==================== ENDGAME POSITION PERFT TESTS ====================
// Position 3: en passant and rank pins with few pieces
// FEN: 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1

const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

#[test]
fn test_perft_endgame_depth_1() {
    let mut pos = position(POSITION_3);
    assert_eq!(pos.perft(1), 14);
}

#[test]
fn test_perft_endgame_depth_4() {
    let mut pos = position(POSITION_3);
    assert_eq!(pos.perft(4), 43238);
}

#[test]
fn test_perft_endgame_depth_5() {
    let mut pos = position(POSITION_3);
    assert_eq!(pos.perft(5), 674624);
}

#[test]
#[ignore]
fn test_perft_endgame_depth_6() {
    let mut pos = position(POSITION_3);
    assert_eq!(pos.perft(6), 11030083);
}
