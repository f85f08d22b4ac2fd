use std::collections::BTreeMap;

use rand::rngs::StdRng;
use tracing::{debug, info};
use wondev::{Game, Outcome};

use crate::agent::Agent;
use crate::game::{play_game, GameResult};
use crate::recording::Recorder;

/// Tally of the games between two players, from the point of view of the
/// first one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    wins: usize,
    draws: usize,
    losses: usize,
    /// Illegal actions by player 0 and player 1
    illegal_actions: [usize; 2],
}

impl MatchScore {
    pub fn record(&mut self, result: &GameResult) {
        match result.outcome_for(0) {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        if let GameResult::IllegalActionByPlayer { player_idx, .. } = *result {
            self.illegal_actions[player_idx] += 1;
        }
    }

    pub fn num_games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    /// How many games ended with `outcome` for player 0 or 1.
    pub fn count(&self, player_idx: usize, outcome: Outcome) -> usize {
        let outcome = if player_idx == 0 {
            outcome
        } else {
            outcome.flip()
        };
        match outcome {
            Outcome::Win => self.wins,
            Outcome::Draw => self.draws,
            Outcome::Loss => self.losses,
        }
    }

    pub fn illegal_actions(&self, player_idx: usize) -> usize {
        self.illegal_actions[player_idx]
    }

    /// One line per player: wins, draws, losses and how many of the losses
    /// came from illegal actions.
    pub fn summary(&self, names: [&str; 2]) -> String {
        let mut result = format!("{} vs {} after {} games:", names[0], names[1], self.num_games());
        for (player_idx, name) in names.into_iter().enumerate() {
            result += &format!(
                "\n- {}: {} won, {} drawn, {} lost",
                name,
                self.count(player_idx, Outcome::Win),
                self.count(player_idx, Outcome::Draw),
                self.count(player_idx, Outcome::Loss),
            );
            let illegal = self.illegal_actions(player_idx);
            if illegal > 0 {
                result += &format!(" ({} through illegal actions)", illegal);
            }
        }
        result
    }
}

/// Plays `num_games` games between two agents.
///
/// With `stop_on_illegal_action`, the match ends after the first illegal
/// action, which still counts as a loss.
pub fn play_matchup(
    game: &Game,
    player_1: &mut dyn Agent,
    player_2: &mut dyn Agent,
    num_games: usize,
    stop_on_illegal_action: bool,
    rng: &mut StdRng,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        let result = play_game(game, rng, player_1, player_2, recorder)?;
        match &result {
            GameResult::IllegalActionByPlayer { player_idx, err } => {
                let culprit = if *player_idx == 0 {
                    player_1.name()
                } else {
                    player_2.name()
                };
                info!(player = culprit, game_idx, "Illegal action: {}", err);
            }
            _ => debug!(game_idx, outcome = ?result.outcome_for(0), player = player_1.name()),
        }
        match_score.record(&result);
        if stop_on_illegal_action && matches!(result, GameResult::IllegalActionByPlayer { .. }) {
            break;
        }
    }

    Ok(match_score)
}

/// Totals over all matches, best player first: points (a win is worth 2, a
/// draw 1), then wins, draws and losses.
pub fn standings(nicks: &[String], results: &BTreeMap<(usize, usize), MatchScore>) -> String {
    // [wins, draws, losses] per player
    let mut totals = vec![[0usize; 3]; nicks.len()];
    for (&(i, j), score) in results {
        for (player, player_idx) in [(i, 0), (j, 1)] {
            for (slot, outcome) in [Outcome::Win, Outcome::Draw, Outcome::Loss]
                .into_iter()
                .enumerate()
            {
                totals[player][slot] += score.count(player_idx, outcome);
            }
        }
    }
    let points = |[wins, draws, _]: [usize; 3]| 2 * wins + draws;
    let mut order: Vec<usize> = (0..nicks.len()).collect();
    order.sort_by_key(|&p| std::cmp::Reverse(points(totals[p])));

    let mut result = format!(
        "{:>3}  {:<20} {:>6} {:>6} {:>6} {:>6}",
        "#", "player", "won", "drawn", "lost", "points"
    );
    for (rank, &p) in order.iter().enumerate() {
        let [wins, draws, losses] = totals[p];
        result += &format!(
            "\n{:>3}  {:<20} {:>6} {:>6} {:>6} {:>6}",
            rank + 1,
            nicks[p],
            wins,
            draws,
            losses,
            points(totals[p])
        );
    }
    result
}
