use clap::Parser;
use ludo::GameState;
use ludo_bot_utils::Bot;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

/// Moves any token that can move.
struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _player: usize, _num_players: usize) {}

    fn choose_token(&mut self, _dice: u8, _state: &GameState, movable: &[usize]) -> usize {
        // The judge never asks without a movable token
        movable.choose(&mut self.rng).copied().unwrap_or(0)
    }
}
