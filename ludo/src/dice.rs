use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of dice rolls.
pub trait Dice {
    /// A value from 1 to 6.
    fn roll(&mut self) -> u8;
}

/// A fair die.
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Replays a fixed sequence of rolls, then keeps rolling ones.
#[derive(Clone, Debug, Default)]
pub struct LoadedDice {
    rolls: VecDeque<u8>,
}

impl LoadedDice {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        self.rolls.pop_front().unwrap_or(1)
    }
}
