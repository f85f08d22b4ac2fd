use quickcheck::{Arbitrary, Gen};

use crate::{Board, Color, Direction, Game};

/// A board that can come up in an actual game, together with the color
/// whose turn it is.
#[derive(Clone, Debug)]
pub struct ReachableBoard {
    pub board: Board,
    pub to_move: Color,
}

impl Arbitrary for ReachableBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = *g.choose(&[4, 5, 6, 7, 8]).unwrap();
        let game = Game::new(size);
        let mut board = game.initial_board();
        let mut to_move = Color::White;
        let num_turns = usize::arbitrary(g) % 41;
        for _ in 0..num_turns {
            if game.is_terminal(&board) {
                break;
            }
            let choices = game.legal_actions(&board, to_move).or_pass();
            let action = *g.choose(&choices).unwrap();
            (board, to_move) = game.next_state(&board, to_move, action);
        }
        ReachableBoard { board, to_move }
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Color::White, Color::Black]).unwrap()
    }
}

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
