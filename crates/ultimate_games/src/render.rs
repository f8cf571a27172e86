//! Plain-text rendering of a meta-board.

use ultimate_tictactoe::{ActiveBoard, MetaBoard, Outcome, Position, Square};

const DIVIDER: &str = "-------+-------+-------";

fn square_symbol(square: Square) -> char {
    match square {
        Square::Empty => '.',
        Square::Occupied(player) => player.symbol(),
    }
}

fn outcome_label(outcome: Outcome) -> String {
    match outcome {
        Outcome::Undecided => "open".to_string(),
        Outcome::Won(player) => format!("won by {}", player),
        Outcome::Draw => "draw".to_string(),
    }
}

/// Draws the 9x9 grid, one text row per grid row, with sub-boards
/// separated by rules.
pub fn render_grid(board: &MetaBoard) -> String {
    let mut lines = Vec::with_capacity(11);
    for meta_row in 0..3 {
        if meta_row > 0 {
            lines.push(DIVIDER.to_string());
        }
        for cell_row in 0..3 {
            let segments: Vec<String> = (0..3)
                .map(|meta_col| {
                    let squares = board.sub_boards()[meta_row * 3 + meta_col].squares();
                    (0..3)
                        .map(|cell_col| square_symbol(squares[cell_row * 3 + cell_col]).to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            lines.push(format!(" {} ", segments.join(" | ")));
        }
    }
    lines.join("\n")
}

/// Describes where the next move may go.
pub fn describe_constraint(board: &MetaBoard) -> String {
    if board.is_over() {
        return format!("Game over: {}", outcome_label(board.outcome()));
    }
    match board.active_board() {
        ActiveBoard::Forced(pos) if !board.meta_outcome(pos).is_decided() => {
            format!("{} to move in board {} ({})", board.to_move(), pos.to_index(), pos.label())
        }
        _ => format!("{} to move in any open board", board.to_move()),
    }
}

/// Lists the decided sub-boards.
pub fn describe_sub_boards(board: &MetaBoard) -> String {
    let decided: Vec<String> = Position::ALL
        .iter()
        .filter(|&&pos| board.meta_outcome(pos).is_decided())
        .map(|&pos| format!("{}: {}", pos.to_index(), outcome_label(board.meta_outcome(pos))))
        .collect();
    if decided.is_empty() {
        "No sub-board decided yet".to_string()
    } else {
        format!("Decided: {}", decided.join(", "))
    }
}

/// Full text view: grid, decided sub-boards and the constraint.
pub fn render_board(board: &MetaBoard) -> String {
    format!(
        "{}\n\n{}\n{}",
        render_grid(board),
        describe_sub_boards(board),
        describe_constraint(board)
    )
}
