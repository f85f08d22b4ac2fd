use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::anyhow;
use tracing::{trace, warn};
use wondev::{visualize_board, Action, Board, Color, Okay, Request};
use wondev_bot_utils::Bot;

use crate::error::InvalidChoice;

/// Anything that can take part in a game.
pub trait Agent {
    fn name(&self) -> &str;

    fn new_game(&mut self, color: Color) -> anyhow::Result<()>;

    /// Chooses an action for `color`.
    ///
    /// Errors are reserved for communication failures. Whether the action is
    /// legal is checked by the caller.
    fn play(&mut self, board: &Board, color: Color) -> anyhow::Result<Action>;
}

/// A bot running in a child process, speaking JSON over its stdin/stdout.
pub struct ProcessAgent {
    name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl ProcessAgent {
    pub fn new(name: &str, cmd: &str, args: &[String]) -> anyhow::Result<Self> {
        let mut child = Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("Could not access stdin of '{}'", cmd))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Could not access stdout of '{}'", cmd))?;

        Ok(Self {
            name: String::from(name),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    fn send(&mut self, req: &Request) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    pub fn perform_request<T: serde::de::DeserializeOwned>(
        &mut self,
        req: &Request,
    ) -> anyhow::Result<T> {
        self.send(req)?;
        self.buf.clear();
        if self.stdout.read_line(&mut self.buf)? == 0 {
            anyhow::bail!("{} closed its stdout", self.name);
        }
        let serialized_response = self.buf.trim_end();
        trace!(name: "Received response", player = &self.name, response = %serialized_response);
        let response = serde_json::from_str::<T>(serialized_response)?;
        self.buf.clear();
        Ok(response)
    }
}

impl Agent for ProcessAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, color: Color) -> anyhow::Result<()> {
        let _: Okay = self.perform_request(&Request::NewGame { color })?;
        Ok(())
    }

    fn play(&mut self, board: &Board, color: Color) -> anyhow::Result<Action> {
        self.perform_request(&Request::Play {
            board: board.clone(),
            color,
        })
    }
}

impl Drop for ProcessAgent {
    fn drop(&mut self) {
        if let Err(err) = self.send(&Request::Bye) {
            warn!(player = &self.name, "Could not say goodbye: {}", err);
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// A [`Bot`] running inside the judge.
pub struct InProcessAgent<B: Bot> {
    name: String,
    bot: B,
}

impl<B: Bot> InProcessAgent<B> {
    pub fn new(name: &str, bot: B) -> Self {
        Self {
            name: String::from(name),
            bot,
        }
    }
}

impl<B: Bot> Agent for InProcessAgent<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, color: Color) -> anyhow::Result<()> {
        self.bot.new_game(color);
        Ok(())
    }

    fn play(&mut self, board: &Board, color: Color) -> anyhow::Result<Action> {
        Ok(self.bot.play(board, color))
    }
}

/// A person at a terminal (or anything else that writes lines).
///
/// Shows the board and a numbered list of the legal actions, then asks for a
/// number until it gets a valid one.
pub struct HumanAgent<R: BufRead, W: Write> {
    name: String,
    input: R,
    output: W,
    buf: String,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(name: &str, input: R, output: W) -> Self {
        Self {
            name: String::from(name),
            input,
            output,
            buf: String::new(),
        }
    }

    /// Consumes the agent and returns everything it printed.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Turns a typed line into one of `choices`.
pub fn parse_choice(line: &str, choices: &[Action]) -> Result<Action, InvalidChoice> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InvalidChoice::Empty);
    }
    if line.eq_ignore_ascii_case("pass") {
        return if choices == [Action::PASS] {
            Ok(Action::PASS)
        } else {
            Err(InvalidChoice::PassNotAvailable)
        };
    }
    let index: usize = line
        .parse()
        .map_err(|_| InvalidChoice::NotANumber(String::from(line)))?;
    choices
        .get(index)
        .copied()
        .ok_or(InvalidChoice::OutOfRange {
            index,
            num_choices: choices.len(),
        })
}

/// How an action is shown to people.
pub fn describe_action(action: Action) -> String {
    if action.is_pass() {
        String::from("pass")
    } else {
        action.decode().to_string()
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, color: Color) -> anyhow::Result<()> {
        writeln!(self.output, "New game! You play {}.", color)?;
        Ok(())
    }

    fn play(&mut self, board: &Board, color: Color) -> anyhow::Result<Action> {
        let choices = board.legal_moves(color).or_pass();
        writeln!(self.output, "{}", visualize_board(board))?;
        writeln!(
            self.output,
            "Score: white {}, black {}. You are {}.",
            board.score_for(Color::White),
            board.score_for(Color::Black),
            color
        )?;
        for (i, &action) in choices.iter().enumerate() {
            writeln!(self.output, "{:>3}: {}", i, describe_action(action))?;
        }
        loop {
            write!(self.output, "Your choice: ")?;
            self.output.flush()?;
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                anyhow::bail!("Input ended while waiting for {} to choose", self.name);
            }
            match parse_choice(&self.buf, &choices) {
                Ok(action) => return Ok(action),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_by_index_or_pass() {
        let choices = [Action(3), Action(17)];
        assert_eq!(parse_choice("1\n", &choices), Ok(Action(17)));
        assert_eq!(parse_choice(" 0 ", &choices), Ok(Action(3)));
        assert_eq!(parse_choice("", &choices), Err(InvalidChoice::Empty));
        assert_eq!(
            parse_choice("two", &choices),
            Err(InvalidChoice::NotANumber(String::from("two")))
        );
        assert_eq!(
            parse_choice("2", &choices),
            Err(InvalidChoice::OutOfRange {
                index: 2,
                num_choices: 2
            })
        );
        assert_eq!(
            parse_choice("pass", &choices),
            Err(InvalidChoice::PassNotAvailable)
        );
        assert_eq!(parse_choice("PASS", &[Action::PASS]), Ok(Action::PASS));
        assert_eq!(parse_choice("0", &[Action::PASS]), Ok(Action::PASS));
    }

    #[test]
    fn human_is_asked_again() {
        let board = Board::new(6);
        let mut human = HumanAgent::new("me", &b"nope\n500\n2\n"[..], Vec::new());
        let action = human.play(&board, Color::White).unwrap();
        assert_eq!(action, board.legal_moves(Color::White).or_pass()[2]);
        let output = String::from_utf8(human.into_output()).unwrap();
        assert!(output.contains("'nope' is not a number"));
        assert!(output.contains("There is no action 500"));
        assert_eq!(output.matches("Your choice: ").count(), 3);
    }

    #[test]
    fn human_input_ending_is_an_error() {
        let mut human = HumanAgent::new("me", &b"x\n"[..], Vec::new());
        assert!(human.play(&Board::new(4), Color::Black).is_err());
    }
}
