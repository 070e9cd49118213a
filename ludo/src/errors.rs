/// The error type for moves that the rules don't allow at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    GameOver,
    NotAwaitingRoll,
    NotAwaitingChoice,
    InvalidDiceValue(u8),
    NoSuchToken { player: usize, index: usize },
    TokenNotMovable { player: usize, index: usize, dice: u8 },
}

impl std::error::Error for IllegalMove {}

fn ordinal_number(num: usize) -> &'static str {
    match num {
        0 => "first",
        1 => "second",
        2 => "third",
        3 => "fourth",
        _ => "unknown",
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GameOver => write!(f, "The game is already over"),
            IllegalMove::NotAwaitingRoll => {
                write!(f, "Tried to roll the dice while a token has to be chosen")
            }
            IllegalMove::NotAwaitingChoice => {
                write!(f, "Tried to move a token before rolling the dice")
            }
            IllegalMove::InvalidDiceValue(value) => {
                write!(f, "A die shows 1 to 6, not {}", value)
            }
            IllegalMove::NoSuchToken { player, index } => {
                write!(f, "Player {} has no token with index {}", player + 1, index)
            }
            IllegalMove::TokenNotMovable {
                player,
                index,
                dice,
            } => write!(
                f,
                "The {} token of player {} cannot move {}",
                ordinal_number(*index),
                player + 1,
                dice
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Returned by undo/redo when there is nothing to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    EmptyHistory { action: HistoryAction },
}

impl std::error::Error for HistoryError {}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::EmptyHistory {
                action: HistoryAction::Undo,
            } => write!(f, "Nothing to undo"),
            HistoryError::EmptyHistory {
                action: HistoryAction::Redo,
            } => write!(f, "Nothing to redo"),
        }
    }
}

/// Invalid player count, names or colors when setting up a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSetup {
    PlayerCount(usize),
    NameCount { expected: usize, found: usize },
    ColorCount { expected: usize, found: usize },
    NoSuchPlayer(usize),
}

impl std::error::Error for InvalidSetup {}

impl std::fmt::Display for InvalidSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSetup::PlayerCount(n) => {
                write!(f, "A game needs two to four players, not {}", n)
            }
            InvalidSetup::NameCount { expected, found } => {
                write!(f, "Expected {} player names, got {}", expected, found)
            }
            InvalidSetup::ColorCount { expected, found } => {
                write!(f, "Expected {} player colors, got {}", expected, found)
            }
            InvalidSetup::NoSuchPlayer(player) => write!(f, "There is no player {}", player + 1),
        }
    }
}

/// A saved game that does not describe a reachable game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSaveData {
    Setup(InvalidSetup),
    CurrentPlayerOutOfRange { current_player: usize, num_players: usize },
    PlayerCountMismatch { num_players: usize, token_lists: usize },
    TokenCount { player: usize, found: usize },
    PositionOutOfRange { player: usize, index: usize, position: i8 },
    FinishedMismatch { player: usize, index: usize, position: i8, finished: bool },
    /// Well-formed JSON with missing or mistyped fields.
    Malformed(String),
}

impl std::error::Error for InvalidSaveData {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidSaveData::Setup(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidSaveData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSaveData::Setup(_) => write!(f, "Invalid player setup"),
            InvalidSaveData::CurrentPlayerOutOfRange {
                current_player,
                num_players,
            } => write!(
                f,
                "Current player {} is out of range for {} players",
                current_player, num_players
            ),
            InvalidSaveData::PlayerCountMismatch {
                num_players,
                token_lists,
            } => write!(
                f,
                "Game has {} players but tokens for {}",
                num_players, token_lists
            ),
            InvalidSaveData::TokenCount { player, found } => write!(
                f,
                "Player {} should have 4 tokens, but has {}",
                player + 1,
                found
            ),
            InvalidSaveData::PositionOutOfRange {
                player,
                index,
                position,
            } => write!(
                f,
                "The {} token of player {} is at an impossible position {}",
                ordinal_number(*index),
                player + 1,
                position
            ),
            InvalidSaveData::FinishedMismatch {
                player,
                index,
                position,
                finished,
            } => write!(
                f,
                "The {} token of player {} is at position {} but marked as {}",
                ordinal_number(*index),
                player + 1,
                position,
                if *finished { "finished" } else { "not finished" }
            ),
            InvalidSaveData::Malformed(msg) => write!(f, "Malformed save data: {}", msg),
        }
    }
}

impl From<InvalidSetup> for InvalidSaveData {
    fn from(err: InvalidSetup) -> Self {
        InvalidSaveData::Setup(err)
    }
}

/// The error type for saving a game to a file or loading it from one.
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(InvalidSaveData),
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Json(err) => Some(err),
            PersistenceError::Invalid(err) => Some(err),
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Io(_) => write!(f, "Could not access the save file"),
            PersistenceError::Json(_) => write!(f, "The save file is not valid JSON"),
            PersistenceError::Invalid(_) => write!(f, "The save file contains an invalid game"),
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => {
                PersistenceError::Invalid(InvalidSaveData::Malformed(err.to_string()))
            }
            _ => PersistenceError::Json(err),
        }
    }
}

impl From<InvalidSaveData> for PersistenceError {
    fn from(err: InvalidSaveData) -> Self {
        PersistenceError::Invalid(err)
    }
}
