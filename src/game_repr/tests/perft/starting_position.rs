use super::*;

// ==================== STARTING POSITION PERFT TESTS ====================

#[test]
fn test_perft_starting_position_depth_1() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(1), 20);
}

#[test]
fn test_perft_starting_position_depth_2() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(2), 400);
}

#[test]
fn test_perft_starting_position_depth_3() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(3), 8902);
}

#[test]
fn test_perft_starting_position_depth_4() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(4), 197281);
}

#[test]
#[ignore]
fn test_perft_starting_position_depth_5() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(5), 4865609);
}

#[test]
fn test_divide_sums_to_perft() {
    let mut pos = Position::default();
    let divided = pos.divide(3);
    assert_eq!(divided.len(), 20);
    assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 8902);

    let e2e4 = divided.iter().find(|(mv, _)| mv.to_uci() == "e2e4").map(|(_, n)| *n);
    assert_eq!(e2e4, Some(600));
}

#[test]
fn test_parallel_divide_matches_serial() {
    let mut pos = Position::default();
    let mut serial = pos.divide(3);
    let mut parallel = pos.divide_parallel(3);
    serial.sort_by_key(|(mv, _)| mv.to_uci());
    parallel.sort_by_key(|(mv, _)| mv.to_uci());
    assert_eq!(serial, parallel);
}

#[test]
fn test_perft_leaves_position_untouched() {
    let mut pos = Position::default();
    let hash = pos.hash();
    pos.perft(3);
    assert_eq!(pos.hash(), hash);
    assert_eq!(pos.to_fen(), START_FEN);
    assert_eq!(pos.ply(), 0);
}
