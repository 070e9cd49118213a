mod move_preview;
pub use move_preview::*;

use std::io::{BufRead, Write};

use ludo::{GameState, Okay, Request};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, player: usize, num_players: usize);
    /// Returns one of the indices in `movable`.
    fn choose_token(&mut self, dice: u8, state: &GameState, movable: &[usize]) -> usize;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        self.serve(stdin, stdout)
    }

    /// Answers requests, one JSON object per line, until `Bye` or EOF.
    fn serve(&mut self, mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
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
                Request::NewGame {
                    player,
                    num_players,
                } => {
                    self.new_game(player, num_players);
                    serde_json::to_writer(&mut output, &Okay())?;
                }
                Request::ChooseToken {
                    dice,
                    state,
                    movable,
                } => serde_json::to_writer(
                    &mut output,
                    &self.choose_token(dice, &state, &movable),
                )?,
                Request::Bye => break Ok(()),
            }
            writeln!(output)?;
            output.flush()?;
        }
    }
}
