use crate::{Action, Color, MAX_SIZE, MIN_SIZE};

/// The error type for [`Game::check_action()`](crate::Game::check_action),
/// i.e. for an action that the given color may not play on the given board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalAction {
    OutOfActionSpace { action: Action },
    PassedDespiteLegalMoves { color: Color },
    NotLegal { action: Action, color: Color },
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::OutOfActionSpace { action } => {
                write!(f, "Action id {} is outside of the action space", action.0)
            }
            IllegalAction::PassedDespiteLegalMoves { color } => {
                write!(f, "{} passed although it had legal moves", color)
            }
            IllegalAction::NotLegal { action, color } => write!(
                f,
                "Action {} ({}) is not a legal move for {}",
                action.0,
                action.decode(),
                color
            ),
        }
    }
}

/// The error type for building a [`Board`](crate::Board) from raw grids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidBoard {
    UnsupportedSize {
        size: usize,
    },
    WrongGridLength {
        grid: &'static str,
        expected: usize,
        actual: usize,
    },
    HeightOutOfRange {
        x: usize,
        y: usize,
        height: u8,
    },
    UnsupportedPiece {
        x: usize,
        y: usize,
        occupant: i8,
    },
    DuplicatePiece {
        x: usize,
        y: usize,
        occupant: i8,
    },
}

impl std::error::Error for InvalidBoard {}

impl std::fmt::Display for InvalidBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidBoard::UnsupportedSize { size } => {
                write!(
                    f,
                    "Board size {} is not between {} and {}",
                    size, MIN_SIZE, MAX_SIZE
                )
            }
            InvalidBoard::WrongGridLength {
                grid,
                expected,
                actual,
            } => write!(
                f,
                "The {} grid has {} cells instead of {}",
                grid, actual, expected
            ),
            InvalidBoard::HeightOutOfRange { x, y, height } => {
                write!(f, "The tower at ({}, {}) has height {}", x, y, height)
            }
            InvalidBoard::UnsupportedPiece { x, y, occupant } => write!(
                f,
                "The piece {} at ({}, {}) has no action ids",
                occupant, x, y
            ),
            InvalidBoard::DuplicatePiece { x, y, occupant } => write!(
                f,
                "The piece {} at ({}, {}) is already on the board",
                occupant, x, y
            ),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseActionError {
    Empty,
    NotANumber(String),
    OutOfRange { id: u16 },
}

impl std::error::Error for ParseActionError {}

impl std::fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseActionError::Empty => write!(f, "No action given"),
            ParseActionError::NotANumber(s) => write!(f, "'{}' is not an action id", s),
            ParseActionError::OutOfRange { id } => {
                write!(f, "Action id {} is outside of the action space", id)
            }
        }
    }
}

#[cfg(feature = "python")]
mod python {
    use pyo3::create_exception;
    use pyo3::PyErr;

    use super::*;

    create_exception!(
        wondev,
        IllegalActionException,
        pyo3::exceptions::PyException,
        "Describes why an action cannot be played."
    );

    impl From<IllegalAction> for PyErr {
        fn from(err: IllegalAction) -> PyErr {
            IllegalActionException::new_err(err.to_string())
        }
    }

    create_exception!(
        wondev,
        InvalidBoardException,
        pyo3::exceptions::PyException,
        "Describes why a board is malformed."
    );

    impl From<InvalidBoard> for PyErr {
        fn from(err: InvalidBoard) -> PyErr {
            InvalidBoardException::new_err(err.to_string())
        }
    }
}
#[cfg(feature = "python")]
pub use python::*;
