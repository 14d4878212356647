// FEN Parsing Tests
//
// Loading, validating and writing back Forsyth-Edwards Notation.

use super::*;
use crate::error::FenError;

// ==================== FEN PARSING TESTS ====================

#[test]
fn test_default_position_from_fen() {
    let pos = Position::default();

    assert_eq!(pos.piece_at(0), Some(Piece::new(Color::White, Type::Rook)));
    assert_eq!(pos.piece_at(4), Some(Piece::new(Color::White, Type::King)));
    assert_eq!(pos.piece_at(59), Some(Piece::new(Color::Black, Type::Queen)));
    assert_eq!(pos.piece_at(60), Some(Piece::new(Color::Black, Type::King)));

    for i in 8..16 {
        assert_eq!(pos.piece_at(i), Some(Piece::new(Color::White, Type::Pawn)));
    }
    for i in 48..56 {
        assert_eq!(pos.piece_at(i), Some(Piece::new(Color::Black, Type::Pawn)));
    }
    for i in 16..48 {
        assert_eq!(pos.piece_at(i), None, "Square {} should be empty", i);
    }

    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.castling_rights(), [true; 4]);
    assert_eq!(pos.ep_target(), 0);
    assert_eq!(pos.fullmove_number(), 1);
    assert!(pos.is_consistent());
}

#[test]
fn test_custom_fen_position() {
    let pos = position("4k3/8/8/8/8/8/8/4K3 b - - 12 40");

    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.castling_rights(), [false; 4]);
    assert_eq!(pos.bitboards().all_occupied().count_ones(), 2);
    assert_eq!(pos.fullmove_number(), 40);
    assert_eq!(pos.king_square(Color::White), 4);
    assert_eq!(pos.king_square(Color::Black), 60);
}

// ==================== FEN OUTPUT TESTS ====================

#[test]
fn test_fen_round_trip() {
    let fens = [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/8/8/8/8/8/8/4K3 b - - 99 120",
    ];
    for fen in fens {
        assert_eq!(position(fen).to_fen(), fen);
    }
}

#[test]
fn test_fen_after_moves() {
    let mut pos = Position::default();
    play(&mut pos, &["e2e4"]);
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );

    play(&mut pos, &["c7c5", "g1f3"]);
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn test_halfmove_clock_is_capped() {
    let pos = position("4k3/8/8/8/8/8/8/4K3 w - - 250 1");
    assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 100 1");
    assert!(pos.is_fifty_move_draw());
}

#[test]
fn test_load_fen_replaces_position() {
    let mut pos = Position::default();
    play(&mut pos, &["e2e4"]);

    pos.load_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(pos.ply(), 0);
    assert!(pos.hash_history().is_empty());
    assert_eq!(pos.hash(), pos.compute_hash());
}

#[test]
fn test_failed_load_keeps_position() {
    let mut pos = Position::default();
    assert!(pos.load_fen("not a fen").is_err());
    assert_eq!(pos.to_fen(), START_FEN);
}

// ==================== FEN ERROR TESTS ====================

#[test]
fn test_wrong_field_count() {
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap_err(),
        FenError::FieldCount { found: 4 }
    );
}

#[test]
fn test_invalid_piece() {
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4X3 w - - 0 1").unwrap_err(),
        FenError::InvalidPiece('X')
    );
}

#[test]
fn test_bad_board_layout() {
    let short_rank = Position::from_fen("4k3/8/8/8/8/8/8/4K2 w - - 0 1");
    assert!(matches!(short_rank, Err(FenError::BoardLayout { .. })));

    let long_rank = Position::from_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1");
    assert!(matches!(long_rank, Err(FenError::BoardLayout { .. })));

    let seven_ranks = Position::from_fen("4k3/8/8/8/8/8/4K3 w - - 0 1");
    assert!(matches!(seven_ranks, Err(FenError::BoardLayout { .. })));
}

#[test]
fn test_bad_side_and_castling() {
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").unwrap_err(),
        FenError::InvalidSide("x".to_string())
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KZ - 0 1").unwrap_err(),
        FenError::InvalidCastling('Z')
    );
}

#[test]
fn test_bad_en_passant() {
    // Square must be on the rank the side to move captures onto
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e3 0 1"),
        Err(FenError::InvalidEnPassant(_))
    ));
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
        Err(FenError::InvalidEnPassant(_))
    ));
}

#[test]
fn test_bad_counters() {
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
        Err(FenError::InvalidCounter { field: "halfmove", .. })
    ));
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 -3"),
        Err(FenError::InvalidCounter { field: "fullmove", .. })
    ));
}

#[test]
fn test_halfmove_clock_bounds() {
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 150 90"),
        Err(FenError::InvalidCounter { field: "halfmove", .. })
    ));

    let fen = "4k3/8/8/8/8/8/8/4K3 w - - 100 90";
    let pos = Position::from_fen(fen).unwrap();
    assert_eq!(pos.halfmove_clock(), 101);
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_king_count() {
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
        FenError::KingCount {
            color: "black",
            count: 0
        }
    );
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
        Err(FenError::KingCount { color: "white", count: 2 })
    ));
}
