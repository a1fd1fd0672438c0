use ir_battleship::{
    Board, BoardError, BoardKind, Coord, Direction, Orientation, Ship, SHIP_LENGTHS, WINNING_SCORE,
};

fn ship(length: u8, x: u8, y: u8, orientation: Orientation) -> Ship {
    Ship::new(length, Coord::new(x, y), orientation).unwrap()
}

#[test]
fn test_new_board_hands_out_first_ship() {
    let board = Board::new();
    let first = board.current_ship().unwrap();
    assert_eq!(first.length(), SHIP_LENGTHS[0]);
    assert_eq!(first.anchor(), Coord::new(2, 3));
    assert_eq!(first.orientation(), Orientation::Vertical);
    assert_eq!(board.cursor(), Coord::new(2, 3));
    assert_eq!(board.score(), 0);
    assert!(board.own_ships().is_empty());
}

#[test]
fn test_overlapping_placement_is_rejected() {
    let mut board = Board::new();
    board.place_ship(&ship(2, 0, 0, Orientation::Horizontal)).unwrap();

    let second = ship(3, 0, 0, Orientation::Vertical);
    assert!(!board.is_valid_position(&second));
    assert_eq!(board.place_ship(&second), Err(BoardError::ShipOverlaps));

    let second = ship(3, 1, 0, Orientation::Vertical);
    assert!(!board.is_valid_position(&second));

    let second = ship(3, 2, 0, Orientation::Vertical);
    assert!(board.is_valid_position(&second));
    board.place_ship(&second).unwrap();
    assert_eq!(board.own_ships().count_ones(), 5);
}

#[test]
fn test_rejected_placement_writes_nothing() {
    let mut board = Board::new();
    board.place_ship(&ship(4, 0, 3, Orientation::Horizontal)).unwrap();
    let before = board.own_ships();
    assert!(board.place_ship(&ship(3, 3, 1, Orientation::Vertical)).is_err());
    assert_eq!(board.own_ships(), before);
}

#[test]
fn test_ship_off_grid_cannot_be_built() {
    let err = Ship::new(4, Coord::new(2, 0), Orientation::Horizontal).unwrap_err();
    assert_eq!(err, BoardError::ShipOutOfBounds);
    assert!(Ship::new(4, Coord::new(0, 3), Orientation::Vertical).is_ok());
    assert!(Ship::new(4, Coord::new(0, 4), Orientation::Vertical).is_err());
}

#[test]
fn test_ship_sequence_runs_out() {
    let mut board = Board::new();
    assert!(!board.is_last_ship());
    assert!(board.next_ship());
    assert_eq!(board.current_ship().unwrap().length(), 3);
    assert!(board.next_ship());
    assert!(board.is_last_ship());
    assert!(!board.next_ship());
    assert!(board.current_ship().is_none());
    assert_eq!(board.place_current_ship(), Err(BoardError::NoShipToPlace));
}

#[test]
fn test_move_ship_is_clamped() {
    let mut board = Board::new();
    // Length 2, vertical at (2, 3)
    for _ in 0..10 {
        board.move_ship(Direction::South);
    }
    assert_eq!(board.current_ship().unwrap().anchor(), Coord::new(2, 5));
    for _ in 0..10 {
        board.move_ship(Direction::East);
    }
    assert_eq!(board.current_ship().unwrap().anchor(), Coord::new(4, 5));
    for _ in 0..10 {
        board.move_ship(Direction::North);
        board.move_ship(Direction::West);
    }
    assert_eq!(board.current_ship().unwrap().anchor(), Coord::new(0, 0));
}

#[test]
fn test_rotate_resets_to_origin() {
    let mut board = Board::new();
    board.move_ship(Direction::East);
    board.rotate_ship();
    let ship = board.current_ship().unwrap();
    assert_eq!(ship.orientation(), Orientation::Horizontal);
    assert_eq!(ship.anchor(), Coord::new(0, 0));

    // A horizontal ship stops where its last cell meets the edge
    for _ in 0..10 {
        board.move_ship(Direction::East);
    }
    assert_eq!(board.current_ship().unwrap().anchor(), Coord::new(3, 0));
}

#[test]
fn test_cursor_stays_on_grid() {
    let mut board = Board::new();
    for _ in 0..10 {
        board.move_cursor(Direction::North);
        board.move_cursor(Direction::West);
    }
    assert_eq!(board.cursor(), Coord::new(0, 0));
    for _ in 0..10 {
        board.move_cursor(Direction::South);
        board.move_cursor(Direction::East);
    }
    assert_eq!(board.cursor(), Coord::new(4, 6));
}

#[test]
fn test_strike_latch_and_hit() {
    let mut board = Board::new();
    board.move_cursor(Direction::West);
    assert!(board.is_valid_strike());
    assert_eq!(board.pending_strike(), Some(Coord::new(1, 3)));

    assert!(board.add_hit());
    assert_eq!(board.score(), 1);
    assert!(board.is_recorded(Coord::new(1, 3)));
    assert_eq!(board.pending_strike(), None);

    // Striking the same cell again is refused, and a stray hit is ignored
    assert!(!board.is_valid_strike());
    assert!(!board.add_hit());
    assert_eq!(board.score(), 1);
}

#[test]
fn test_add_hit_without_latched_strike() {
    let mut board = Board::new();
    assert!(!board.add_hit());
    assert_eq!(board.score(), 0);
    assert!(board.opponent_record().is_empty());
}

#[test]
fn test_is_hit_reads_own_ships() {
    let mut board = Board::new();
    board.place_ship(&ship(3, 1, 2, Orientation::Horizontal)).unwrap();
    assert!(board.is_hit(Coord::new(3, 2)));
    assert!(!board.is_hit(Coord::new(4, 2)));
    assert!(!board.is_hit(Coord::new(9, 9)));
}

#[test]
fn test_winner_after_every_cell() {
    let mut board = Board::new();
    let mut hits = 0;
    'outer: for y in 0..7 {
        for x in 0..5 {
            if hits == WINNING_SCORE {
                break 'outer;
            }
            assert!(!board.is_winner());
            board_strike(&mut board, Coord::new(x, y));
            hits += 1;
        }
    }
    assert_eq!(board.score(), WINNING_SCORE);
    assert!(board.is_winner());
}

fn board_strike(board: &mut Board, target: Coord) {
    while board.cursor().x > target.x {
        board.move_cursor(Direction::West);
    }
    while board.cursor().x < target.x {
        board.move_cursor(Direction::East);
    }
    while board.cursor().y > target.y {
        board.move_cursor(Direction::North);
    }
    while board.cursor().y < target.y {
        board.move_cursor(Direction::South);
    }
    assert!(board.is_valid_strike());
    assert!(board.add_hit());
}

#[test]
fn test_initialize_clears_everything() {
    let mut board = Board::new();
    board.place_current_ship().unwrap();
    board.next_ship();
    board.move_cursor(Direction::North);
    board.is_valid_strike();
    board.add_hit();

    board.initialize();
    assert!(board.own_ships().is_empty());
    assert!(board.grid(BoardKind::OpponentRecord).is_empty());
    assert_eq!(board.score(), 0);
    assert_eq!(board.cursor(), Coord::new(2, 3));
    assert_eq!(board.current_ship().unwrap().length(), 2);
    assert_eq!(board.ships_placed(), 0);
}
