use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};
use wondev::{visualize_board, Color, Game, IllegalAction, Outcome};

use crate::agent::{describe_action, Agent};
use crate::recording::Recorder;

#[derive(Debug)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalActionByPlayer { player_idx: usize, err: IllegalAction },
}

impl GameResult {
    /// How the game went for player 0 or 1. An illegal action loses the game.
    pub fn outcome_for(&self, player_idx: usize) -> Outcome {
        match *self {
            GameResult::WonByPlayer { player_idx: winner } if winner == player_idx => Outcome::Win,
            GameResult::WonByPlayer { .. } => Outcome::Loss,
            GameResult::Tie => Outcome::Draw,
            GameResult::IllegalActionByPlayer {
                player_idx: culprit,
                ..
            } if culprit == player_idx => Outcome::Loss,
            GameResult::IllegalActionByPlayer { .. } => Outcome::Win,
        }
    }
}

/// Returns an error only on communication failure, not when an
/// illegal action is played.
///
/// The game ends when neither color can move, or when both players passed
/// one after the other. White moves first.
pub fn play_game(
    game: &Game,
    rng: &mut StdRng,
    player_1: &mut dyn Agent,
    player_2: &mut dyn Agent,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Assign the colors randomly
    let colors = {
        let mut arr = [Color::White, Color::Black];
        arr.shuffle(rng);
        arr
    };
    let mut players: [&mut dyn Agent; 2] = [player_1, player_2];

    // Inform the players about the new game, so that they can reset their state
    for (player, &color) in players.iter_mut().zip(&colors) {
        player.new_game(color)?;
    }

    let mut board = game.initial_board();
    if let Some(rec) = recorder.as_mut() {
        rec.start_game(
            &board,
            [
                (players[0].name(), colors[0]),
                (players[1].name(), colors[1]),
            ],
        );
    }

    let mut color = Color::White;
    let mut turn_skipped = false;
    while !game.is_terminal(&board) {
        let player_idx = if colors[0] == color { 0 } else { 1 };
        let current_player = &mut players[player_idx];
        let action = current_player.play(&board, color)?;
        if let Err(err) = game.check_action(&board, color, action) {
            return Ok(GameResult::IllegalActionByPlayer { player_idx, err });
        }
        debug!(player = current_player.name(), %color, action = %describe_action(action));

        let (next_board, next_color) = game.next_state(&board, color, action);
        trace!("\n{}", visualize_board(&next_board));
        if let Some(rec) = recorder.as_mut() {
            rec.store_turn(current_player.name(), color, action, &next_board);
        }
        board = next_board;
        color = next_color;

        if action.is_pass() {
            if turn_skipped {
                break; // When both players couldn't move, the game ends
            }
            turn_skipped = true;
        } else {
            turn_skipped = false;
        }
    }

    // Report who won
    let game_result = match board.score_for(colors[0]).cmp(&0) {
        Ordering::Less => GameResult::WonByPlayer { player_idx: 1 },
        Ordering::Equal => GameResult::Tie,
        Ordering::Greater => GameResult::WonByPlayer { player_idx: 0 },
    };
    if let Some(rec) = recorder.as_mut() {
        let winner = match &game_result {
            GameResult::WonByPlayer { player_idx } => Some(players[*player_idx].name()),
            _ => None,
        };
        rec.write_game_recording(winner)?;
    }
    Ok(game_result)
}
