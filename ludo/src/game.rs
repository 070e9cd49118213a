use tracing::debug;

use crate::{
    apply_move, is_valid_dice_value, legal_moves, winner, Dice, GameState, History, HistoryError,
    IllegalMove, InvalidSetup, MoveEffects, PathModel, TokenId, MAX_PLAYERS, NUM_TOKENS,
};

pub const DEFAULT_COLORS: [&str; MAX_PLAYERS] = ["red", "green", "yellow", "blue"];

/// The names and colors of the players taking part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSetup {
    names: Vec<String>,
    colors: Vec<String>,
}

impl PlayerSetup {
    /// Default names ("Player 1", ...) and colors for `num_players` players.
    pub fn new(num_players: usize) -> Result<Self, InvalidSetup> {
        check_player_count(num_players)?;
        Ok(Self {
            names: (1..=num_players).map(|i| format!("Player {}", i)).collect(),
            colors: DEFAULT_COLORS[..num_players]
                .iter()
                .map(|&color| String::from(color))
                .collect(),
        })
    }

    pub fn with_names_and_colors(
        names: Vec<String>,
        colors: Vec<String>,
    ) -> Result<Self, InvalidSetup> {
        check_player_count(names.len())?;
        if colors.len() != names.len() {
            return Err(InvalidSetup::ColorCount {
                expected: names.len(),
                found: colors.len(),
            });
        }
        Ok(Self { names, colors })
    }

    pub fn num_players(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn name(&self, player: usize) -> Option<&str> {
        self.names.get(player).map(String::as_str)
    }

    pub fn color(&self, player: usize) -> Option<&str> {
        self.colors.get(player).map(String::as_str)
    }
}

fn check_player_count(num_players: usize) -> Result<(), InvalidSetup> {
    if (2..=MAX_PLAYERS).contains(&num_players) {
        Ok(())
    } else {
        Err(InvalidSetup::PlayerCount(num_players))
    }
}

/// Where in a turn the game is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingRoll,
    /// The current player rolled `dice` and has to pick one of `movable`.
    AwaitingTokenChoice { dice: u8, movable: Vec<TokenId> },
    GameOver { winner: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// No token could move, the turn went to the next player.
    Skipped { player: usize, dice: u8 },
    MustChoose {
        player: usize,
        dice: u8,
        movable: Vec<TokenId>,
    },
}

/// What happened when a token was moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub token: TokenId,
    pub dice: u8,
    pub effects: MoveEffects,
    /// The same player rolls again.
    pub extra_turn: bool,
}

/// A game of Ludo: the state plus turn sequencing and undo/redo.
///
/// A turn is a roll, followed by a token choice if any token can move.
/// Rolling a six gives the player another roll. Capturing does not.
#[derive(Clone, Debug)]
pub struct Game {
    path: PathModel,
    setup: PlayerSetup,
    pub(crate) state: GameState,
    history: History,
    phase: Phase,
}

impl Game {
    pub fn new(setup: PlayerSetup) -> Self {
        let state = GameState::new(setup.num_players());
        Self::from_state(setup, state)
    }

    /// Continues from an existing state, without any history.
    pub(crate) fn from_state(setup: PlayerSetup, state: GameState) -> Self {
        let phase = phase_for(&state);
        Self {
            path: PathModel::standard(),
            setup,
            state,
            history: History::new(),
            phase,
        }
    }

    /// Starts over with the same players.
    pub fn restart(&mut self) {
        *self = Self::new(self.setup.clone());
    }

    pub fn path(&self) -> &PathModel {
        &self.path
    }

    pub fn setup(&self) -> &PlayerSetup {
        &self.setup
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn num_players(&self) -> usize {
        self.state.num_players()
    }

    pub fn current_player(&self) -> usize {
        self.state.current_player
    }

    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// The tokens that may be chosen right now, empty unless a roll is
    /// waiting for a choice.
    pub fn movable_tokens(&self) -> &[TokenId] {
        match &self.phase {
            Phase::AwaitingTokenChoice { movable, .. } => movable.as_slice(),
            _ => &[],
        }
    }

    pub fn finished_counts(&self) -> Vec<usize> {
        (0..self.num_players())
            .map(|player| self.state.finished_count(player))
            .collect()
    }

    pub fn rename_player(&mut self, player: usize, name: String) -> Result<(), InvalidSetup> {
        let slot = self
            .setup
            .names
            .get_mut(player)
            .ok_or(InvalidSetup::NoSuchPlayer(player))?;
        *slot = name;
        Ok(())
    }

    pub fn set_player_color(&mut self, player: usize, color: String) -> Result<(), InvalidSetup> {
        let slot = self
            .setup
            .colors
            .get_mut(player)
            .ok_or(InvalidSetup::NoSuchPlayer(player))?;
        *slot = color;
        Ok(())
    }

    pub fn roll(&mut self, dice: &mut impl Dice) -> Result<RollOutcome, IllegalMove> {
        self.check_awaiting_roll()?;
        self.roll_value(dice.roll())
    }

    /// Like [`Self::roll()`], with a given dice value.
    pub fn roll_value(&mut self, dice: u8) -> Result<RollOutcome, IllegalMove> {
        self.check_awaiting_roll()?;
        if !is_valid_dice_value(dice) {
            return Err(IllegalMove::InvalidDiceValue(dice));
        }
        let player = self.state.current_player;
        let movable = legal_moves(&self.path, &self.state, player, dice);
        if movable.is_empty() {
            debug!(player, dice, "No legal move, skipping turn");
            self.state.current_player = self.state.next_player();
            return Ok(RollOutcome::Skipped { player, dice });
        }
        self.phase = Phase::AwaitingTokenChoice {
            dice,
            movable: movable.clone(),
        };
        Ok(RollOutcome::MustChoose {
            player,
            dice,
            movable,
        })
    }

    /// Moves the current player's token with the given index.
    pub fn choose(&mut self, index: usize) -> Result<MoveOutcome, IllegalMove> {
        let player = self.state.current_player;
        let dice = match &self.phase {
            Phase::AwaitingTokenChoice { dice, movable } => {
                if index >= NUM_TOKENS {
                    return Err(IllegalMove::NoSuchToken { player, index });
                }
                if !movable.contains(&TokenId { player, index }) {
                    return Err(IllegalMove::TokenNotMovable {
                        player,
                        index,
                        dice: *dice,
                    });
                }
                *dice
            }
            Phase::AwaitingRoll => return Err(IllegalMove::NotAwaitingChoice),
            Phase::GameOver { .. } => return Err(IllegalMove::GameOver),
        };

        let token = TokenId { player, index };
        let snapshot = self.state.clone();
        let effects = apply_move(&self.path, &mut self.state, token, dice)?;
        self.history.record(snapshot);

        let extra_turn = if let Some(winner) = effects.winner() {
            debug!(winner, "Game won");
            self.phase = Phase::GameOver { winner };
            false
        } else if dice == 6 {
            self.phase = Phase::AwaitingRoll;
            true
        } else {
            self.state.current_player = self.state.next_player();
            self.phase = Phase::AwaitingRoll;
            false
        };

        Ok(MoveOutcome {
            token,
            dice,
            effects,
            extra_turn,
        })
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the state before the last move. A pending token choice is
    /// abandoned.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        self.history.undo(&mut self.state)?;
        self.phase = phase_for(&self.state);
        debug!(current_player = self.state.current_player, "Undo");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), HistoryError> {
        self.history.redo(&mut self.state)?;
        self.phase = phase_for(&self.state);
        debug!(current_player = self.state.current_player, "Redo");
        Ok(())
    }

    fn check_awaiting_roll(&self) -> Result<(), IllegalMove> {
        match self.phase {
            Phase::AwaitingRoll => Ok(()),
            Phase::AwaitingTokenChoice { .. } => Err(IllegalMove::NotAwaitingRoll),
            Phase::GameOver { .. } => Err(IllegalMove::GameOver),
        }
    }
}

fn phase_for(state: &GameState) -> Phase {
    match winner(state) {
        Some(winner) => Phase::GameOver { winner },
        None => Phase::AwaitingRoll,
    }
}
