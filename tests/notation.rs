use rewind_chess::{
    anticolor, format_color, format_position, get_color, parse_position, valid_position, Board,
    ChessError, Color, PieceKind, Position,
};

#[test]
fn every_square_round_trips_through_its_name() {
    for col in 1..=8 {
        for row in 1..=8 {
            let name = format_position([col, row]).unwrap();
            let back = parse_position(name.as_str()).unwrap();
            assert_eq!((back.col(), back.row()), (col, row), "{name}");
        }
    }
    assert_eq!(Position::all().count(), 64);
}

#[test]
fn piece_positions_parse_like_squares() {
    let mut board = Board::new();
    let id = board.add_piece(PieceKind::Knight, "b", "G8").unwrap();
    let knight = board.piece(id).unwrap();
    assert_eq!(parse_position(knight).unwrap().to_string(), "G8");
    assert_eq!(get_color(knight).unwrap(), Color::Black);
    assert_eq!(anticolor(knight).unwrap(), Color::White);
}

#[test]
fn invalid_inputs_report_parse_errors() {
    assert!(matches!(
        parse_position("K9"),
        Err(ChessError::Parse { what: "position", .. })
    ));
    assert!(matches!(
        get_color("grey"),
        Err(ChessError::Parse { what: "color", .. })
    ));
    assert!(!valid_position(["A", "0"]));
    assert!(valid_position(["a", "8"]));
    assert!(format_color("nope", false).is_err());
}

#[test]
fn lookups_with_bad_squares_fail_instead_of_missing() {
    let board = Board::standard();
    assert!(board.piece_at("D9").is_err());
    assert!(board.piece_at("D5").unwrap().is_none());
    assert_eq!(
        board.piece_at("d1").unwrap().map(|p| p.kind()),
        Some(PieceKind::King)
    );
}
