use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use wondev::{Action, Board, Color};
use wondev_bot_utils::Bot;

/// Plays a uniformly random legal action.
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn new_game(&mut self, _color: Color) {}

    fn play(&mut self, board: &Board, color: Color) -> Action {
        let choices = board.legal_moves(color).or_pass();
        // or_pass() is never empty
        *choices.choose(&mut self.rng).unwrap_or(&Action::PASS)
    }
}
