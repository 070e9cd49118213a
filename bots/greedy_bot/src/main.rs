use clap::Parser;
use ludo::{GameState, PathModel};
use ludo_bot_utils::{preview_moves, Bot, MovePreview};
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};

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

    GreedyBot::new(rng).run()
}

struct GreedyBot {
    rng: StdRng,
    path: PathModel,
}

impl GreedyBot {
    fn new(rng: StdRng) -> Self {
        Self {
            rng,
            path: PathModel::standard(),
        }
    }

    /// Captures are best, then finishing, then bringing a new token out.
    /// Otherwise, move the token that is furthest along.
    fn score(&self, preview: &MovePreview) -> usize {
        let captures = preview.effects.captured_tokens().count();
        let progress = (preview.from + 1) as usize;
        captures * 1000
            + if preview.effects.finished() { 500 } else { 0 }
            + if preview.from < 0 { 200 } else { 0 }
            + progress
    }

    fn best_token(&mut self, dice: u8, state: &GameState, movable: &[usize]) -> Option<usize> {
        let mut top_choices: Vec<usize> = Vec::new();
        let mut top_score = 0;
        for preview in preview_moves(&self.path, state, dice, movable) {
            let score = self.score(&preview);
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push(preview.index);
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![preview.index];
                    top_score = score;
                }
            }
        }
        top_choices.choose(&mut self.rng).copied()
    }
}

impl Bot for GreedyBot {
    fn new_game(&mut self, _player: usize, _num_players: usize) {}

    fn choose_token(&mut self, dice: u8, state: &GameState, movable: &[usize]) -> usize {
        self.best_token(dice, state, movable)
            .or_else(|| movable.first().copied())
            .unwrap_or(0)
    }
}
