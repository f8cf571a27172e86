//! Tests for the meta-board rules engine.

use ultimate_tictactoe::{
    ActiveBoard, GameSnapshot, MetaBoard, Move, MoveError, Outcome, Player, Position, Square,
};

fn mv(board: usize, cell: usize, player: Player) -> Move {
    Move::from_indices(board, cell, player).expect("indices in range")
}

fn pos(index: usize) -> Position {
    Position::from_index(index).expect("index in range")
}

/// X O X / X O O / O X X: a full sub-board with no line.
fn drawn_squares() -> Vec<Square> {
    let x = Square::Occupied(Player::X);
    let o = Square::Occupied(Player::O);
    vec![x, o, x, x, o, o, o, x, x]
}

#[test]
fn test_center_opening_forces_center_board() {
    let mut board = MetaBoard::new();
    board.apply(mv(4, 4, Player::X)).expect("legal opening");

    assert_eq!(board.active_board(), ActiveBoard::Forced(Position::Center));
    assert_eq!(board.legal_boards(), vec![Position::Center]);
}

#[test]
fn test_new_game_allows_every_board() {
    let board = MetaBoard::new();
    assert_eq!(board.active_board(), ActiveBoard::Any);
    assert_eq!(board.legal_boards(), Position::ALL.to_vec());
    assert_eq!(board.legal_moves(Player::X).len(), 81);
}

#[test]
fn test_top_row_wins_sub_board() {
    let mut board = MetaBoard::new();
    for (b, c, player) in [
        (0, 1, Player::X),
        (1, 0, Player::O),
        (0, 2, Player::X),
        (2, 0, Player::O),
        (0, 0, Player::X),
    ] {
        board.apply(mv(b, c, player)).expect("legal move");
    }

    assert_eq!(board.sub_board(Position::TopLeft).outcome(), Outcome::Won(Player::X));
    assert_eq!(board.meta_outcome(Position::TopLeft), Outcome::Won(Player::X));
    assert_eq!(board.outcome(), Outcome::Undecided);
    // Cell 0 points at the board just won, so the constraint lifts.
    assert_eq!(board.active_board(), ActiveBoard::Any);
    assert!(!board.legal_boards().contains(&Position::TopLeft));
    assert_eq!(board.legal_boards().len(), 8);
}

#[test]
fn test_move_into_decided_board_rejected() {
    let mut board = MetaBoard::new();
    for (b, c, player) in [
        (0, 1, Player::X),
        (1, 0, Player::O),
        (0, 2, Player::X),
        (2, 0, Player::O),
        (0, 0, Player::X),
    ] {
        board.apply(mv(b, c, player)).expect("legal move");
    }

    assert_eq!(
        board.apply(mv(0, 5, Player::O)),
        Err(MoveError::BoardDecided(Position::TopLeft))
    );
}

#[test]
fn test_wrong_board_rejected_with_reason() {
    let mut board = MetaBoard::new();
    board.apply(mv(3, 7, Player::X)).expect("legal move");

    let reply = board.request_move(0, 0, Player::O);
    assert!(!reply.accepted);
    assert_eq!(reply.reason, "Must play in board 7");

    let reply = board.request_move(7, 3, Player::O);
    assert!(reply.accepted);
    assert_eq!(reply.reason, "Move successful");
}

#[test]
fn test_occupied_cell_rejected() {
    let mut board = MetaBoard::new();
    board.apply(mv(5, 5, Player::X)).expect("legal move");
    assert_eq!(
        board.apply(mv(5, 5, Player::O)),
        Err(MoveError::SquareOccupied {
            board: Position::MiddleRight,
            cell: Position::MiddleRight,
        })
    );
}

#[test]
fn test_all_boards_drawn_draws_game() {
    let mut snapshot = MetaBoard::new().snapshot();
    for index in 0..8 {
        snapshot.boards[index].squares = drawn_squares();
        snapshot.boards[index].outcome = Outcome::Draw;
        snapshot.meta_outcomes[index] = Outcome::Draw;
    }
    let mut last = drawn_squares();
    last[8] = Square::Empty;
    snapshot.boards[8].squares = last;
    snapshot.active_board = Some(8);
    let mut board = MetaBoard::from_snapshot(snapshot).expect("valid snapshot");

    board.apply(mv(8, 8, Player::X)).expect("legal move");

    assert_eq!(board.meta_outcome(Position::BottomRight), Outcome::Draw);
    assert_eq!(board.outcome(), Outcome::Draw);
    assert_eq!(board.apply(mv(0, 0, Player::O)), Err(MoveError::GameOver));
    assert!(board.legal_moves(Player::O).is_empty());
}

#[test]
fn test_meta_line_wins_game() {
    let mut snapshot = MetaBoard::new().snapshot();
    let x = Square::Occupied(Player::X);
    for index in [0, 4] {
        snapshot.boards[index].squares[..3].copy_from_slice(&[x, x, x]);
        snapshot.boards[index].outcome = Outcome::Won(Player::X);
        snapshot.meta_outcomes[index] = Outcome::Won(Player::X);
    }
    snapshot.boards[8].squares[0] = x;
    snapshot.boards[8].squares[4] = x;
    snapshot.active_board = Some(8);
    let mut board = MetaBoard::from_snapshot(snapshot).expect("valid snapshot");

    board.apply(mv(8, 8, Player::X)).expect("legal move");

    assert_eq!(board.outcome(), Outcome::Won(Player::X));
    assert!(board.is_over());
}

#[test]
fn test_meta_line_through_draw_does_not_win() {
    let mut snapshot = MetaBoard::new().snapshot();
    let x = Square::Occupied(Player::X);
    for index in [0, 4] {
        snapshot.boards[index].squares[..3].copy_from_slice(&[x, x, x]);
        snapshot.boards[index].outcome = Outcome::Won(Player::X);
        snapshot.meta_outcomes[index] = Outcome::Won(Player::X);
    }
    snapshot.boards[8].squares = drawn_squares();
    snapshot.boards[8].squares[8] = Square::Empty;
    snapshot.active_board = Some(8);
    let mut board = MetaBoard::from_snapshot(snapshot).expect("valid snapshot");

    board.apply(mv(8, 8, Player::X)).expect("legal move");

    assert_eq!(board.meta_outcome(Position::BottomRight), Outcome::Draw);
    assert_eq!(board.outcome(), Outcome::Undecided);
}

#[test]
fn test_constraint_on_decided_board_lists_open_boards_but_still_binds() {
    let mut snapshot = MetaBoard::new().snapshot();
    snapshot.boards[2].squares = drawn_squares();
    snapshot.boards[2].outcome = Outcome::Draw;
    snapshot.meta_outcomes[2] = Outcome::Draw;
    snapshot.active_board = Some(2);
    let mut board = MetaBoard::from_snapshot(snapshot).expect("valid snapshot");

    let expected: Vec<Position> = [0, 1, 3, 4, 5, 6, 7, 8].into_iter().map(pos).collect();
    assert_eq!(board.legal_boards(), expected);

    let err = board.apply(mv(6, 1, Player::X)).expect_err("constraint still binds");
    assert_eq!(
        err,
        MoveError::WrongBoard {
            required: Position::TopRight,
            attempted: Position::BottomLeft,
        }
    );
    assert_eq!(err.to_string(), "Must play in board 2");

    assert_eq!(
        board.apply(mv(2, 0, Player::X)),
        Err(MoveError::BoardDecided(Position::TopRight))
    );
    assert!(board.history().is_empty());
    assert_eq!(board.active_board(), ActiveBoard::Forced(Position::TopRight));
}

#[test]
fn test_reset_matches_new_game() {
    let mut board = MetaBoard::new();
    for (b, c, player) in [(4, 4, Player::X), (4, 0, Player::O), (0, 8, Player::X)] {
        board.apply(mv(b, c, player)).expect("legal move");
    }

    board.reset();

    assert_eq!(board, MetaBoard::new());
    assert_eq!(board.snapshot(), MetaBoard::new().snapshot());
}

#[test]
fn test_clone_is_independent() {
    let mut board = MetaBoard::new();
    board.apply(mv(1, 1, Player::X)).expect("legal move");
    let snapshot = board.snapshot();

    let mut copy = board.clone();
    copy.apply(mv(1, 4, Player::O)).expect("legal move");
    copy.reset();

    assert_eq!(board.snapshot(), snapshot);
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_snapshot_round_trip_is_exact() {
    let mut board = MetaBoard::new();
    for (b, c, player) in [(0, 1, Player::X), (1, 0, Player::O), (0, 2, Player::X)] {
        board.apply(mv(b, c, player)).expect("legal move");
    }

    let snapshot: GameSnapshot = board.snapshot();
    assert_eq!(snapshot.active_board, Some(2));
    assert_eq!(snapshot.available_boards, vec![2]);
    assert_eq!(snapshot.boards[0].available_cells, vec![0, 3, 4, 5, 6, 7, 8]);

    let restored = MetaBoard::from_snapshot(snapshot).expect("valid snapshot");
    assert_eq!(restored, board);
}

#[test]
fn test_snapshot_outcomes_are_trusted() {
    let mut snapshot = MetaBoard::new().snapshot();
    // An empty sub-board stored as won stays won.
    snapshot.boards[7].outcome = Outcome::Won(Player::O);
    snapshot.meta_outcomes[7] = Outcome::Won(Player::O);
    let board = MetaBoard::from_snapshot(snapshot).expect("valid snapshot");

    assert_eq!(board.sub_board(Position::BottomCenter).outcome(), Outcome::Won(Player::O));
    assert!(!board.legal_boards().contains(&Position::BottomCenter));
}
