use serde::{Deserialize, Serialize};

use crate::{Token, TokenId, NUM_TOKENS};

/// Everything the rules need to know about a game in progress.
///
/// This is a plain value: the history keeps copies of it, and it is what
/// gets sent to bots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_player: usize,
    pub tokens: Vec<[Token; NUM_TOKENS]>,
}

impl GameState {
    /// All tokens at home, first player to move.
    pub fn new(num_players: usize) -> Self {
        Self {
            current_player: 0,
            tokens: (0..num_players)
                .map(|player| std::array::from_fn(|index| Token::new(player, index)))
                .collect(),
        }
    }

    pub fn num_players(&self) -> usize {
        self.tokens.len()
    }

    pub fn player_tokens(&self, player: usize) -> Option<&[Token; NUM_TOKENS]> {
        self.tokens.get(player)
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.player).and_then(|tokens| tokens.get(id.index))
    }

    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens
            .get_mut(id.player)
            .and_then(|tokens| tokens.get_mut(id.index))
    }

    pub fn iter_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().flatten()
    }

    pub fn finished_count(&self, player: usize) -> usize {
        self.player_tokens(player)
            .map_or(0, |tokens| tokens.iter().filter(|t| t.finished).count())
    }

    pub fn next_player(&self) -> usize {
        (self.current_player + 1) % self.num_players()
    }
}
