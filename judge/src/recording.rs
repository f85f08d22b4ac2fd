use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wondev::{Action, Board, Color};

/// Writes every game it is told about to its own JSON file in a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    current: GameRecording,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            current: GameRecording::default(),
        })
    }

    pub fn start_game(&mut self, initial_board: &Board, players: [(&str, Color); 2]) {
        self.current = GameRecording {
            players: players
                .into_iter()
                .map(|(name, color)| RecordedPlayer {
                    name: String::from(name),
                    color,
                })
                .collect(),
            initial_board: Some(initial_board.clone()),
            turns: Vec::new(),
            winner: None,
        };
    }

    /// Records an action that has been checked, along with the board after it.
    pub fn store_turn(&mut self, player: &str, color: Color, action: Action, board: &Board) {
        self.current.turns.push(RecordedTurn {
            player: String::from(player),
            color,
            action,
            board: board.clone(),
        });
    }

    /// Writes out the current game, with `winner` being `None` for a tie.
    pub fn write_game_recording(&mut self, winner: Option<&str>) -> anyhow::Result<PathBuf> {
        self.current.winner = winner.map(String::from);
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.current))?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GameRecording {
    pub players: Vec<RecordedPlayer>,
    pub initial_board: Option<Board>,
    pub turns: Vec<RecordedTurn>,
    pub winner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordedPlayer {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordedTurn {
    pub player: String,
    pub color: Color,
    pub action: Action,
    pub board: Board,
}
