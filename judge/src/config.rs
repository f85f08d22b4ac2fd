use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use greedy_bot::GreedyBot;
use random_bot::RandomBot;
use search_bot::SearchBot;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, HumanAgent, InProcessAgent, ProcessAgent};

/// A player definition, as stored in a JSON file.
///
/// ```json
/// { "nick": "greedy", "type": "process", "cmd": "target/release/greedy_bot", "args": ["--seed", "1"] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    #[serde(flatten)]
    pub kind: PlayerKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayerKind {
    /// An executable that speaks the bot protocol.
    Process {
        cmd: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Someone at this terminal.
    Human,
    /// The built-in bots, without a child process.
    Random,
    Greedy,
    Search {
        #[serde(default = "default_depth")]
        depth: u32,
    },
}

fn default_depth() -> u32 {
    2
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open player config '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid player config '{}'", path.display()))
    }

    /// Starts the player. Built-in bots are seeded with `seed`.
    pub fn create_agent(&self, seed: u64) -> anyhow::Result<Box<dyn Agent>> {
        let name = self.nick.as_str();
        let agent: Box<dyn Agent> = match &self.kind {
            PlayerKind::Process { cmd, args } => Box::new(ProcessAgent::new(name, cmd, args)?),
            PlayerKind::Human => Box::new(HumanAgent::new(
                name,
                std::io::stdin().lock(),
                std::io::stdout(),
            )),
            PlayerKind::Random => Box::new(InProcessAgent::new(name, RandomBot::new(seed))),
            PlayerKind::Greedy => Box::new(InProcessAgent::new(name, GreedyBot::new(seed))),
            PlayerKind::Search { depth } => {
                if *depth == 0 {
                    anyhow::bail!("{}: the search depth must be at least 1", name);
                }
                Box::new(InProcessAgent::new(name, SearchBot::new(*depth)))
            }
        };
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_configs() {
        let process: PlayerConfig = serde_json::from_str(
            r#"{"nick": "ext", "type": "process", "cmd": "./bot", "args": ["--seed", "3"]}"#,
        )
        .unwrap();
        assert_eq!(
            process.kind,
            PlayerKind::Process {
                cmd: String::from("./bot"),
                args: vec![String::from("--seed"), String::from("3")]
            }
        );
        let search: PlayerConfig =
            serde_json::from_str(r#"{"nick": "deep", "type": "search"}"#).unwrap();
        assert_eq!(search.kind, PlayerKind::Search { depth: 2 });
        let human: PlayerConfig =
            serde_json::from_str(r#"{"nick": "me", "type": "human"}"#).unwrap();
        assert_eq!(human.nick, "me");
        assert_eq!(human.kind, PlayerKind::Human);
        assert!(serde_json::from_str::<PlayerConfig>(r#"{"nick": "x", "type": "oracle"}"#).is_err());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = PlayerConfig {
            nick: String::from("shallow"),
            kind: PlayerKind::Search { depth: 0 },
        };
        assert!(config.create_agent(0).is_err());
    }

    #[test]
    fn built_in_agents_carry_the_nick() {
        let config = PlayerConfig {
            nick: String::from("rand"),
            kind: PlayerKind::Random,
        };
        assert_eq!(config.create_agent(1).unwrap().name(), "rand");
    }
}
