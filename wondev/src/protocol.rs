use serde::{Deserialize, Serialize};

use crate::{Board, Color};

/// Request for a bot to do something.
///
/// Requests and responses are exchanged as JSON, one per line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { color: Color },
    /// Request to choose an action.
    ///
    /// The response should be a single [`Action`](crate::Action) id. If
    /// [`Board::legal_moves`] is empty for `color`, that is
    /// [`Action::PASS`](crate::Action::PASS).
    Play {
        /// The board as it is, not in canonical form.
        board: Board,
        /// The color the bot plays as.
        color: Color,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Okay();
