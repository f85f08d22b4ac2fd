use std::collections::HashMap;

use tracing::{debug, trace};
use wondev::{Action, Board, Color, Game, Outcome, StateKey};
use wondev_bot_utils::Bot;

/// Worth more than any score difference a board can hold.
const WIN_SCORE: i32 = 10_000;

/// Depth-limited negamax over the score difference.
///
/// The search always runs on the canonical form of the board, i.e. with the
/// color to move represented as white.
pub struct SearchBot {
    depth: u32,
    // Values of canonical boards, by remaining depth
    table: HashMap<(StateKey, u32), i32>,
    nodes: u64,
}

impl SearchBot {
    /// Panics if `depth` is zero.
    pub fn new(depth: u32) -> Self {
        assert!(depth > 0, "The search needs to look at least one ply ahead");
        Self {
            depth,
            table: HashMap::new(),
            nodes: 0,
        }
    }

    /// The value of `board` for white, who is to move.
    fn negamax(&mut self, game: &Game, board: &Board, depth: u32) -> i32 {
        self.nodes += 1;
        if game.is_terminal(board) {
            // Prefer quick wins and slow losses
            let bonus = WIN_SCORE + depth as i32;
            return match game.outcome(board, Color::White) {
                Some(Outcome::Win) => bonus,
                Some(Outcome::Loss) => -bonus,
                _ => 0,
            };
        }
        if depth == 0 {
            return board.score_for(Color::White);
        }
        let key = (board.state_key(), depth);
        if let Some(&value) = self.table.get(&key) {
            return value;
        }
        let mut best = i32::MIN;
        for action in board.legal_moves(Color::White).or_pass() {
            let (next, _) = game.next_state(board, Color::White, action);
            let value = -self.negamax(game, &next.canonical_form(Color::Black), depth - 1);
            best = best.max(value);
        }
        self.table.insert(key, best);
        best
    }

    /// The best action for `color` and its value, preferring lower ids on ties.
    pub fn search(&mut self, board: &Board, color: Color) -> (Action, i32) {
        let game = Game::new(board.size());
        let root = board.canonical_form(color);
        self.table.clear();
        self.nodes = 0;

        let mut best_action = Action::PASS;
        let mut best_value = i32::MIN;
        for action in root.legal_moves(Color::White).or_pass() {
            let (next, _) = game.next_state(&root, Color::White, action);
            let value = -self.negamax(&game, &next.canonical_form(Color::Black), self.depth - 1);
            trace!(%action, value);
            if value > best_value {
                best_value = value;
                best_action = action;
            }
        }
        let decoded = if best_action.is_pass() {
            String::from("pass")
        } else {
            best_action.decode().to_string()
        };
        debug!(
            action = %best_action,
            decoded = %decoded,
            value = best_value,
            nodes = self.nodes,
            "Search finished"
        );
        (best_action, best_value)
    }
}

impl Bot for SearchBot {
    fn new_game(&mut self, _color: Color) {
        self.table.clear();
    }

    fn play(&mut self, board: &Board, color: Color) -> Action {
        self.search(board, color).0
    }
}
