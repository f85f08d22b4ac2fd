#[derive(Debug, PartialEq, Eq)]
/// Error type for a line typed in by a human player.
pub enum InvalidChoice {
    Empty,
    NotANumber(String),
    OutOfRange { index: usize, num_choices: usize },
    PassNotAvailable,
}

impl std::error::Error for InvalidChoice {}

impl std::fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidChoice::Empty => write!(f, "Please enter the number of an action"),
            InvalidChoice::NotANumber(s) => write!(f, "'{}' is not a number", s),
            InvalidChoice::OutOfRange { index, num_choices } => write!(
                f,
                "There is no action {}, pick one between 0 and {}",
                index,
                num_choices - 1
            ),
            InvalidChoice::PassNotAvailable => {
                write!(f, "You may only pass when there is nothing else to do")
            }
        }
    }
}
