use crate::{Board, Color};

/// Draws the board with north at the top.
///
/// Every cell shows the tower height, then `W`/`B` for a piece standing on it,
/// then `+`/`-` if white/black has scored there. Coordinates are printed along
/// the edges.
pub fn visualize_board(board: &Board) -> String {
    let size = board.size();
    let mut result = String::from("    ");
    for x in 0..size {
        result += &format!("{:<4}", x);
    }
    result += "\n   ╭";
    for _ in 0..size {
        result += "────";
    }
    result += "╮\n";
    for y in (0..size).rev() {
        result += &format!("{:>2} │", y);
        for x in 0..size {
            let piece = match board.piece_at(x, y) {
                Some(Color::White) => 'W',
                Some(Color::Black) => 'B',
                None => '·',
            };
            let score = match board.score(x, y).signum() {
                1 => '+',
                -1 => '-',
                _ => ' ',
            };
            result += &format!("{}{}{} ", board.height(x, y), piece, score);
        }
        result += "│\n";
    }
    result += "   ╰";
    for _ in 0..size {
        result += "────";
    }
    result += "╯";
    result
}
