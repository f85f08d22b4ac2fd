use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Direction, ParseActionError, NUM_DIRECTIONS};

/// How many pieces per color the encoding can address.
pub const NUM_PIECE_SELECTORS: u8 = 2;

/// How many pieces per color are actually put on the board, and therefore how
/// many piece selectors the action space covers.
pub const PIECES_PER_COLOR: u8 = 1;

const ACTIONS_PER_KIND: u16 = (NUM_DIRECTIONS * NUM_DIRECTIONS) as u16;
const ACTIONS_PER_PIECE: u16 = 2 * ACTIONS_PER_KIND;

/// The number of distinct codec ids, including those of pieces that are never
/// placed.
pub const NUM_ENCODED_ACTIONS: u16 = NUM_PIECE_SELECTORS as u16 * ACTIONS_PER_PIECE;

/// Size of the action space seen by agents: every action of the pieces in
/// play, plus the pass action at the very end.
pub const ACTION_SPACE_SIZE: usize = PIECES_PER_COLOR as usize * ACTIONS_PER_PIECE as usize + 1;

/// A dense action id.
///
/// Ids are laid out as
/// `piece_selector * 128 + kind * 64 + move_dir * 8 + build_dir`,
/// see [`DecodedAction`]. The last id of the action space is [`Action::PASS`].
///
/// An action is only meaningful relative to a board and a color; whether it can
/// be played is decided by [`Board::legal_moves`](crate::Board::legal_moves).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(pub u16);

/// Whether the piece builds after stepping, or is pushed two steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ActionKind {
    /// Step along the move direction, then build one step further along the
    /// build direction.
    Build,
    /// Travel along the move direction and then the build direction, raising
    /// the tower in between. Never generated by the move generator.
    Push,
}

/// The fields packed into an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAction {
    pub piece_selector: u8,
    pub kind: ActionKind,
    pub move_dir: Direction,
    pub build_dir: Direction,
}

impl Action {
    pub const PASS: Action = Action(ACTION_SPACE_SIZE as u16 - 1);

    pub fn id(self) -> usize {
        usize::from(self.0)
    }

    pub fn is_pass(self) -> bool {
        self == Self::PASS
    }

    /// Is this id below [`ACTION_SPACE_SIZE`]?
    pub fn in_action_space(self) -> bool {
        self.id() < ACTION_SPACE_SIZE
    }

    /// Unpacks the id. This does no rule checking.
    ///
    /// Panics if the id is not below [`NUM_ENCODED_ACTIONS`]. Note that the
    /// pass id is a valid codec id as well (of the second piece selector), so
    /// callers check [`Action::is_pass`] first.
    pub fn decode(self) -> DecodedAction {
        assert!(
            self.0 < NUM_ENCODED_ACTIONS,
            "Action id {} is out of range",
            self.0
        );
        let piece_selector = (self.0 / ACTIONS_PER_PIECE) as u8;
        let rest = self.0 % ACTIONS_PER_PIECE;
        let kind = if rest < ACTIONS_PER_KIND {
            ActionKind::Build
        } else {
            ActionKind::Push
        };
        let rest = rest % ACTIONS_PER_KIND;
        let dir = |idx: u16| Direction::ALL[usize::from(idx)];
        DecodedAction {
            piece_selector,
            kind,
            move_dir: dir(rest / NUM_DIRECTIONS as u16),
            build_dir: dir(rest % NUM_DIRECTIONS as u16),
        }
    }
}

impl DecodedAction {
    pub fn build(move_dir: Direction, build_dir: Direction) -> Self {
        Self {
            piece_selector: 0,
            kind: ActionKind::Build,
            move_dir,
            build_dir,
        }
    }

    /// Panics if the piece selector is out of range.
    pub fn encode(self) -> Action {
        assert!(
            self.piece_selector < NUM_PIECE_SELECTORS,
            "Piece selector {} is out of range",
            self.piece_selector
        );
        Action(
            u16::from(self.piece_selector) * ACTIONS_PER_PIECE
                + self.kind as u16 * ACTIONS_PER_KIND
                + u16::from(self.move_dir.index()) * NUM_DIRECTIONS as u16
                + u16::from(self.build_dir.index()),
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_pass() {
            write!(f, "pass")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl std::fmt::Display for DecodedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ActionKind::Build => write!(
                f,
                "piece {}: move {}, build {}",
                self.piece_selector, self.move_dir, self.build_dir
            ),
            ActionKind::Push => write!(
                f,
                "piece {}: push {} then {}",
                self.piece_selector, self.move_dir, self.build_dir
            ),
        }
    }
}

/// Accepts either `pass` or a numeric id in the action space.
impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseActionError::Empty);
        }
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Action::PASS);
        }
        let id: u16 = s
            .parse()
            .map_err(|_| ParseActionError::NotANumber(String::from(s)))?;
        let action = Action(id);
        if action.in_action_space() {
            Ok(action)
        } else {
            Err(ParseActionError::OutOfRange { id })
        }
    }
}
