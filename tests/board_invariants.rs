use rewind_chess::{Board, Color, Conviction, PieceFilter, PieceKind, Position};

#[test]
fn standard_setup_is_symmetric() {
    let board = Board::standard();
    assert_eq!(board.len(), 32);

    let material = board.material();
    for color in Color::ALL {
        let count = |k: PieceKind| material.get(&(color, k)).copied().unwrap_or(0);
        assert_eq!(count(PieceKind::Pawn), 8);
        assert_eq!(count(PieceKind::Rook), 2);
        assert_eq!(count(PieceKind::Knight), 2);
        assert_eq!(count(PieceKind::Bishop), 2);
        assert_eq!(count(PieceKind::Queen), 1);
        assert_eq!(count(PieceKind::King), 1);
        assert_eq!(
            board.filter(&PieceFilter::new().with_color(color)).len(),
            16
        );
    }

    assert_eq!(board.king(Color::White).unwrap().position().to_string(), "D1");
    assert_eq!(board.king(Color::Black).unwrap().position().to_string(), "D8");

    // Mirror image across the board's middle rank.
    for p in board.pieces() {
        let mirror = Position::new(p.position().col(), 9 - p.position().row()).unwrap();
        let other = board.occupant(mirror).unwrap();
        assert_eq!(other.kind(), p.kind());
        assert_eq!(other.color(), p.color().other());
    }
}

#[test]
fn set_board_replaces_whatever_was_there() {
    let mut board = Board::new();
    board.add_piece(PieceKind::Queen, Color::White, "D4").unwrap();
    board.set_board();
    assert_eq!(board.len(), 32);
    assert!(board.piece_at("D4").unwrap().is_none());
    board.clear();
    assert!(board.is_empty());
}

#[test]
fn occupancy_holds_through_mixed_mutations() {
    let mut board = Board::new();
    let rook = board.add_piece(PieceKind::Rook, Color::White, "A1").unwrap();
    let knight = board.add_piece(PieceKind::Knight, Color::Black, "A5").unwrap();
    board.add_piece(PieceKind::Pawn, Color::White, "B2").unwrap();
    assert!(board.add_piece(PieceKind::Pawn, Color::Black, "B2").is_err());
    assert!(board.validate());

    let capture = board
        .view(rook)
        .unwrap()
        .moves()
        .into_iter()
        .find(|m| m.captured == Some(knight))
        .unwrap();
    board.make_move(&capture).unwrap();
    assert!(board.validate());
    assert!(board.piece(knight).is_none());

    board.move_to(rook, "B2", Conviction::CaptureOpponent).unwrap();
    assert!(board.validate());
    board.move_to(rook, "B2", Conviction::CaptureAny).unwrap();
    assert!(board.validate());
    assert_eq!(board.len(), 1);

    let removed = board.remove_piece(rook).unwrap();
    assert!(board.is_empty());
    board.attach(removed).unwrap();
    assert!(board.validate());
}

#[test]
fn clone_shares_nothing_with_the_original() {
    let original = Board::standard();
    let mut copy = original.clone();

    let king = copy.king(Color::White).unwrap().id();
    copy.remove_piece(king);
    let pawn = copy.piece_at("A2").unwrap().unwrap().id();
    copy.move_to(pawn, "A3", Conviction::Refuse).unwrap();
    copy.add_piece(PieceKind::Queen, Color::Black, "E4").unwrap();

    assert_eq!(original.piece_at("D1").unwrap().unwrap().kind(), PieceKind::King);
    assert!(original.piece_at("A2").unwrap().is_some());
    assert!(original.piece_at("A3").unwrap().is_none());
    assert!(original.piece_at("E4").unwrap().is_none());
    assert_eq!(original, Board::standard());
}

#[test]
fn promotion_turns_far_rank_pawns_into_queens() {
    let mut board = Board::new();
    let white = board.add_piece(PieceKind::Pawn, Color::White, "C7").unwrap();
    let black = board.add_piece(PieceKind::Pawn, Color::Black, "F1").unwrap();
    let stays = board.add_piece(PieceKind::Pawn, Color::White, "F2").unwrap();

    let step = board.view(white).unwrap().moves()[0];
    board.make_move(&step).unwrap();
    let promoted = board.maintain();
    assert_eq!(promoted.len(), 2);

    let queen = board.piece_at("C8").unwrap().unwrap();
    assert_eq!((queen.kind(), queen.color()), (PieceKind::Queen, Color::White));
    assert!(board.piece(white).is_none());
    assert!(board.piece(black).is_none());
    assert_eq!(
        board.piece_at("F1").unwrap().unwrap().kind(),
        PieceKind::Queen
    );
    assert_eq!(board.piece(stays).unwrap().kind(), PieceKind::Pawn);
    assert!(board.maintain().is_empty());
}
