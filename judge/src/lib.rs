mod agent;
mod config;
mod error;
mod game;
mod recording;
mod tournament;
pub use agent::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use recording::*;
pub use tournament::*;
