use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use wondev::{Action, Board, Color};
use wondev_bot_utils::Bot;

/// Plays the action that leaves it with the best score, breaking ties at random.
pub struct GreedyBot {
    rng: StdRng,
}

impl GreedyBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// All legal actions that lead to the highest score for `color`.
    ///
    /// Empty if `color` has to pass.
    pub fn top_choices(board: &Board, color: Color) -> Vec<Action> {
        let mut top_choices: Vec<Action> = Vec::new();
        let mut top_score = i32::MIN;
        for action in board.legal_moves(color) {
            let mut next = board.clone();
            next.apply(action, color);
            let score = next.score_for(color);
            match score.cmp(&top_score) {
                Ordering::Less => {}
                Ordering::Equal => {
                    top_choices.push(action);
                }
                Ordering::Greater => {
                    top_choices = vec![action];
                    top_score = score;
                }
            }
        }
        top_choices
    }
}

impl Bot for GreedyBot {
    fn new_game(&mut self, _color: Color) {}

    fn play(&mut self, board: &Board, color: Color) -> Action {
        Self::top_choices(board, color)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Action::PASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wondev::{DecodedAction, Direction};

    #[test]
    fn takes_the_point() {
        let mut board = Board::new(6);
        board.set_height(1, 1, 2);
        let mut bot = GreedyBot::new(3);
        let action = bot.play(&board, Color::White);
        let mut next = board.clone();
        next.apply(action, Color::White);
        assert_eq!(next.score_for(Color::White), 1);
        assert_eq!(next.height(1, 1), 3);
        let choices = GreedyBot::top_choices(&board, Color::White);
        assert!(choices.contains(&DecodedAction::build(Direction::West, Direction::South).encode()));
        assert!(!choices.contains(&DecodedAction::build(Direction::North, Direction::North).encode()));
    }

    #[test]
    fn ties_keep_every_option() {
        // Nothing can score on an empty board
        let board = Board::new(6);
        assert_eq!(
            GreedyBot::top_choices(&board, Color::Black).len(),
            board.legal_moves(Color::Black).len() as usize
        );
    }

    #[test]
    fn passes_without_moves() {
        let board =
            Board::from_grids(2, vec![4, 4, 0, 4], vec![1, 0, 0, -1], vec![0; 4]).unwrap();
        assert_eq!(GreedyBot::new(0).play(&board, Color::White), Action::PASS);
    }
}
