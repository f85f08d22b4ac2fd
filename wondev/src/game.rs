use crate::{
    Action, ActionKind, ActionSet, Board, Color, DecodedAction, IllegalAction, StateKey, Symmetry,
    ACTION_SPACE_SIZE, MAX_SIZE, MIN_SIZE, SCORING_HEIGHT,
};

/// How a finished game went, from one color's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    fn from_score(score: i32) -> Self {
        match score.signum() {
            1 => Outcome::Win,
            0 => Outcome::Draw,
            _ => Outcome::Loss,
        }
    }

    /// The same outcome from the opponent's point of view.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }

    pub fn value(self) -> f32 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.0,
            Outcome::Loss => -1.0,
        }
    }
}

impl Board {
    /// Plays `action` for `color`, mutating the board.
    ///
    /// Passing leaves the board untouched. This does not check that the action
    /// is legal, see [`Game::check_action`] for that; an action that would
    /// step off the board or onto a capped tower panics, and so does an id
    /// outside of the action space.
    ///
    /// The acting piece is the first one in scan order (see [`Board::cells`])
    /// that matches the action's piece selector and `color`.
    pub fn apply(&mut self, action: Action, color: Color) {
        if action.is_pass() {
            return;
        }
        assert!(
            action.in_action_space(),
            "Action id {} is outside of the action space",
            action.0
        );
        let DecodedAction {
            piece_selector,
            kind,
            move_dir,
            build_dir,
        } = action.decode();
        let piece = (piece_selector as i8 + 1) * color.sign();
        let (x, y) = self
            .find_occupant(piece)
            .unwrap_or_else(|| panic!("There is no piece {} on the board", piece));
        match kind {
            ActionKind::Build => {
                let (mx, my) = self.neighbor(x, y, move_dir);
                self.move_occupant((x, y), (mx, my));
                let (bx, by) = self.neighbor(mx, my, build_dir);
                if self.build_up(bx, by) == SCORING_HEIGHT {
                    self.set_score(bx, by, self.score(bx, by) + color.sign());
                }
            }
            ActionKind::Push => {
                let (mx, my) = self.neighbor(x, y, move_dir);
                let destination = self.neighbor(mx, my, build_dir);
                self.move_occupant((x, y), destination);
                self.build_up(mx, my);
            }
        }
    }
}

/// What [`Game::reward`] reports for a draw. It is non-zero so that a finished
/// game can be told apart from a running one.
pub const DRAW_REWARD: f32 = 0.5;

/// The rules of the game for a fixed board size.
///
/// This type has no state of its own: every method takes the board it works
/// on, and boards are plain values owned by the caller.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Game {
    size: usize,
}

// !!!!!! NOTE: Keep in sync with pymethods impl block !!!!!!
impl Game {
    /// Panics if `size` is not in [`MIN_SIZE`]`..=`[`MAX_SIZE`].
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "A board needs between {} and {} cells per side, got {}",
            MIN_SIZE,
            MAX_SIZE,
            size
        );
        Self { size }
    }

    pub fn board_size(&self) -> usize {
        self.size
    }

    pub fn initial_board(&self) -> Board {
        Board::new(self.size)
    }

    pub fn action_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }

    pub fn legal_actions(&self, board: &Board, color: Color) -> ActionSet {
        debug_assert_eq!(board.size(), self.size);
        board.legal_moves(color)
    }

    /// A 0/1 vector of length [`Game::action_size`], see [`ActionSet::to_mask`].
    pub fn valid_moves(&self, board: &Board, color: Color) -> Vec<u8> {
        self.legal_actions(board, color).to_mask()
    }

    /// Checks whether `color` may play `action` on `board`.
    ///
    /// Pass is allowed exactly when there is no other legal action.
    pub fn check_action(
        &self,
        board: &Board,
        color: Color,
        action: Action,
    ) -> Result<(), IllegalAction> {
        if !action.in_action_space() {
            return Err(IllegalAction::OutOfActionSpace { action });
        }
        let legal = self.legal_actions(board, color);
        if action.is_pass() {
            if legal.is_empty() {
                Ok(())
            } else {
                Err(IllegalAction::PassedDespiteLegalMoves { color })
            }
        } else if legal.contains(action) {
            Ok(())
        } else {
            Err(IllegalAction::NotLegal { action, color })
        }
    }

    /// The board after `color` played `action`, and the color to move next.
    ///
    /// The action is expected to be legal (see [`Board::apply`]).
    pub fn next_state(&self, board: &Board, color: Color, action: Action) -> (Board, Color) {
        let mut next = board.clone();
        next.apply(action, color);
        (next, -color)
    }

    /// The game is over when neither color can step anywhere.
    pub fn is_terminal(&self, board: &Board) -> bool {
        !board.has_legal_moves(Color::White) && !board.has_legal_moves(Color::Black)
    }

    /// The result for `color`, or `None` while the game is still going.
    pub fn outcome(&self, board: &Board, color: Color) -> Option<Outcome> {
        self.is_terminal(board)
            .then(|| Outcome::from_score(board.score_for(color)))
    }

    /// The result as a single number for training code: 0 while the game is
    /// running, otherwise 1 for a win, -1 for a loss and [`DRAW_REWARD`] for a
    /// draw.
    pub fn reward(&self, board: &Board, color: Color) -> f32 {
        match self.outcome(board, color) {
            None => 0.0,
            Some(Outcome::Draw) => DRAW_REWARD,
            Some(outcome) => outcome.value(),
        }
    }

    pub fn canonical_form(&self, board: &Board, color: Color) -> Board {
        board.canonical_form(color)
    }

    /// All eight rotations/reflections of `board`, each paired with `policy`
    /// remapped to match.
    ///
    /// `policy` has one entry per action id, pass included. The first entry
    /// is the identity.
    pub fn symmetries(&self, board: &Board, policy: &[f32]) -> Vec<(Board, Vec<f32>)> {
        Symmetry::ALL
            .into_iter()
            .map(|sym| (sym.apply_to_board(board), sym.apply_to_policy(policy)))
            .collect()
    }

    pub fn state_key(&self, board: &Board) -> StateKey {
        board.state_key()
    }

    pub fn score(&self, board: &Board, color: Color) -> i32 {
        board.score_for(color)
    }
}

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::types::PyBytes;
    use pyo3::{pymethods, PyObject, PyResult, Python, ToPyObject};

    use super::*;
    use crate::{visualize_board, InvalidBoard};

    fn color_from_player(player: i8) -> PyResult<Color> {
        Color::from_sign(player)
            .ok_or_else(|| PyValueError::new_err("player must be 1 or -1"))
    }

    #[pymethods]
    impl Game {
        #[new]
        fn py_new(size: usize) -> PyResult<Self> {
            if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
                return Err(InvalidBoard::UnsupportedSize { size }.into());
            }
            Ok(Self::new(size))
        }

        fn get_init_board(&self) -> Board {
            self.initial_board()
        }

        fn get_board_size(&self) -> (usize, usize) {
            (self.size, self.size)
        }

        fn get_action_size(&self) -> usize {
            self.action_size()
        }

        fn get_next_state(&self, board: Board, player: i8, action: u16) -> PyResult<(Board, i8)> {
            let color = color_from_player(player)?;
            self.check_action(&board, color, Action(action))?;
            let (next, next_color) = self.next_state(&board, color, Action(action));
            Ok((next, next_color.sign()))
        }

        fn get_valid_moves(&self, board: Board, player: i8) -> PyResult<Vec<u8>> {
            Ok(self.valid_moves(&board, color_from_player(player)?))
        }

        /// 0 while the game is running, otherwise 1, -1 or 0.5 for a draw.
        fn get_game_ended(&self, board: Board, player: i8) -> PyResult<f32> {
            Ok(self.reward(&board, color_from_player(player)?))
        }

        fn get_canonical_form(&self, board: Board, player: i8) -> PyResult<Board> {
            Ok(self.canonical_form(&board, color_from_player(player)?))
        }

        fn get_symmetries(&self, board: Board, pi: Vec<f32>) -> PyResult<Vec<(Board, Vec<f32>)>> {
            if pi.len() != ACTION_SPACE_SIZE {
                return Err(PyValueError::new_err(format!(
                    "pi must have {} entries",
                    ACTION_SPACE_SIZE
                )));
            }
            Ok(self.symmetries(&board, &pi))
        }

        fn string_representation(&self, py: Python, board: Board) -> PyObject {
            PyBytes::new(py, self.state_key(&board).as_bytes()).to_object(py)
        }

        fn get_score(&self, board: Board, player: i8) -> PyResult<i32> {
            Ok(self.score(&board, color_from_player(player)?))
        }
    }

    #[pymethods]
    impl Board {
        #[new]
        fn py_new(
            size: usize,
            heights: Vec<u8>,
            occupants: Vec<i8>,
            scores: Vec<i8>,
        ) -> PyResult<Self> {
            Ok(Board::from_grids(size, heights, occupants, scores)?)
        }

        #[getter]
        fn get_size(&self) -> usize {
            self.size()
        }

        #[getter]
        fn get_heights(&self) -> Vec<u8> {
            self.heights().to_vec()
        }

        #[getter]
        fn get_occupants(&self) -> Vec<i8> {
            self.occupants().to_vec()
        }

        #[getter]
        fn get_scores(&self) -> Vec<i8> {
            self.scores().to_vec()
        }

        fn __repr__(&self) -> String {
            visualize_board(self)
        }
    }
}
