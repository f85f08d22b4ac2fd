use std::io::{BufRead, Write};

use wondev::{Action, Board, Color, Okay, Request};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, color: Color);

    /// Chooses an action for `color` on `board`.
    ///
    /// Must return [`Action::PASS`] if and only if `board.legal_moves(color)`
    /// is empty.
    fn play(&mut self, board: &Board, color: Color) -> Action;

    fn run(&mut self) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        self.serve(std::io::stdin().lock(), std::io::stdout().lock())
    }

    /// Answers requests read from `input` until it is closed or a
    /// [`Request::Bye`] arrives.
    fn serve<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because read_line() appends to the buffer
            let num_bytes_read = input.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { color } => {
                    self.new_game(color);
                    serde_json::to_writer(&mut output, &Okay())?;
                }
                Request::Play { board, color } => {
                    serde_json::to_writer(&mut output, &self.play(&board, color))?
                }
                Request::Bye => break Ok(()),
            }
            writeln!(output)?;
            output.flush()?;
        }
    }
}
