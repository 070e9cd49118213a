use quickcheck::{Arbitrary, Gen};

use crate::{Game, PlayerSetup, RollOutcome};

/// A game played from the start with a given sequence of rolls and choices.
#[derive(Clone, Debug)]
pub struct PlayedGame {
    pub num_players: usize,
    pub rolls: Vec<u8>,
    /// Picks among the movable tokens, modulo their number.
    pub choices: Vec<usize>,
}

impl Arbitrary for PlayedGame {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_players = 2 + usize::arbitrary(g) % 3;
        let num_rolls = usize::arbitrary(g) % 600;
        // Sixes are more likely than with a fair die, to get tokens moving
        let rolls = (0..num_rolls)
            .map(|_| {
                if u8::arbitrary(g) % 3 == 0 {
                    6
                } else {
                    1 + u8::arbitrary(g) % 6
                }
            })
            .collect();
        let choices = (0..num_rolls).map(|_| usize::arbitrary(g) % 4).collect();
        PlayedGame {
            num_players,
            rolls,
            choices,
        }
    }
}

impl PlayedGame {
    /// Plays until the rolls run out or someone wins. Returns the game and
    /// the number of moves made.
    pub fn play(&self) -> (Game, usize) {
        let mut game = Game::new(PlayerSetup::new(self.num_players).unwrap());
        let mut num_moves = 0;
        for (&dice, &choice) in self.rolls.iter().zip(&self.choices) {
            if game.winner().is_some() {
                break;
            }
            match game.roll_value(dice).unwrap() {
                RollOutcome::Skipped { .. } => {}
                RollOutcome::MustChoose { movable, .. } => {
                    let token = movable[choice % movable.len()];
                    game.choose(token.index).unwrap();
                    num_moves += 1;
                }
            }
        }
        (game, num_moves)
    }
}
