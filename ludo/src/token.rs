use serde::{Deserialize, Serialize};

use crate::HOME;

/// Identifies a token by its owner and its index among the owner's tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId {
    pub player: usize,
    pub index: usize,
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}#{}", self.player + 1, self.index)
    }
}

/// A movable piece.
///
/// `position` is the number of steps taken along the player's path, or
/// [`HOME`] for a token that has not entered the track yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub player: usize,
    pub index: usize,
    pub position: i8,
    pub finished: bool,
}

impl Token {
    pub fn new(player: usize, index: usize) -> Self {
        Self {
            player,
            index,
            position: HOME,
            finished: false,
        }
    }

    pub fn id(&self) -> TokenId {
        TokenId {
            player: self.player,
            index: self.index,
        }
    }

    pub fn is_at_home(&self) -> bool {
        self.position == HOME
    }

    /// Whether the token is somewhere on the main track or home stretch.
    pub fn is_on_board(&self) -> bool {
        self.position >= 0 && !self.finished
    }
}
