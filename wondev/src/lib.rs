pub use action::*;
pub use action_set::*;
pub use board::*;
pub use direction::*;
pub use errors::*;
pub use game::*;
pub use protocol::*;
pub use state_key::*;
pub use symmetry::*;
pub use visualization::*;

mod action;
mod action_set;
#[cfg(test)]
mod arbitrary;
mod board;
mod direction;
mod errors;
mod game;
mod movegen;
mod protocol;
mod state_key;
mod symmetry;
mod visualization;
