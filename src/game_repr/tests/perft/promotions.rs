use super::*;

// ==================== PROMOTION-HEAVY PERFT TESTS ====================
// Position 4 and its color-flipped mirror, plus position 5

const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_4_MIRRORED: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

#[test]
fn test_perft_position_4() {
    let mut pos = position(POSITION_4);
    assert_eq!(pos.perft(1), 6);
    assert_eq!(pos.perft(2), 264);
    assert_eq!(pos.perft(3), 9467);
}

#[test]
fn test_perft_position_4_mirrored() {
    let mut pos = position(POSITION_4_MIRRORED);
    assert_eq!(pos.perft(1), 6);
    assert_eq!(pos.perft(2), 264);
    assert_eq!(pos.perft(3), 9467);
}

#[test]
fn test_perft_position_5() {
    let mut pos = position(POSITION_5);
    assert_eq!(pos.perft(1), 44);
    assert_eq!(pos.perft(2), 1486);
    assert_eq!(pos.perft(3), 62379);
}

#[test]
#[ignore]
fn test_perft_position_4_depth_5() {
    let mut pos = position(POSITION_4);
    assert_eq!(pos.perft(5), 15833292);
}
