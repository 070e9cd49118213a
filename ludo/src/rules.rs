use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Cell, GameState, IllegalMove, PathModel, Token, TokenId, HOME};

/// Something that happened while applying a move, for the presentation
/// layer to react to (sounds, messages, animations).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The token left home and is now on its entry cell.
    Entered { token: TokenId },
    /// `token` was sent home by `by`, which landed on `cell`.
    Captured { token: TokenId, by: TokenId, cell: Cell },
    Finished { token: TokenId },
    Won { player: usize },
}

/// The effects of a single move, in the order they happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveEffects {
    pub events: Vec<GameEvent>,
}

impl MoveEffects {
    pub fn captured(&self) -> bool {
        self.captured_tokens().next().is_some()
    }

    pub fn captured_tokens(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.events.iter().filter_map(|event| match event {
            GameEvent::Captured { token, .. } => Some(*token),
            _ => None,
        })
    }

    pub fn finished(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::Finished { .. }))
    }

    pub fn winner(&self) -> Option<usize> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Won { player } => Some(*player),
            _ => None,
        })
    }
}

pub fn is_valid_dice_value(dice: u8) -> bool {
    (1..=6).contains(&dice)
}

/// Whether `token` may move `dice` steps.
///
/// A token at home needs a six to enter. Any other token must not be
/// finished and must not overshoot the finish.
pub fn is_legal_move(path: &PathModel, token: &Token, dice: u8) -> bool {
    if token.finished || !is_valid_dice_value(dice) {
        return false;
    }
    match token.position {
        HOME => dice == 6,
        p if p >= 0 => i16::from(p) + i16::from(dice) <= i16::from(path.finish_position()),
        _ => false,
    }
}

/// The tokens of `player` that can be moved with the given roll, ordered by
/// token index.
pub fn legal_moves(path: &PathModel, state: &GameState, player: usize, dice: u8) -> Vec<TokenId> {
    state
        .player_tokens(player)
        .map(|tokens| {
            tokens
                .iter()
                .filter(|token| is_legal_move(path, token, dice))
                .map(Token::id)
                .collect()
        })
        .unwrap_or_default()
}

/// Moves a token and resolves everything that follows from it.
///
/// This is the only place where token positions change during play. The
/// move is validated before anything is modified, so on error the state is
/// untouched.
///
/// A token at home enters onto its start cell, using up the six. Otherwise
/// it walks `dice` steps. Opponent tokens on the destination cell are sent
/// home, unless the cell is safe. The current player is not changed here,
/// that is up to the turn logic.
pub fn apply_move(
    path: &PathModel,
    state: &mut GameState,
    id: TokenId,
    dice: u8,
) -> Result<MoveEffects, IllegalMove> {
    let mut events = Vec::new();

    let moved = {
        let token = state.token_mut(id).ok_or(IllegalMove::NoSuchToken {
            player: id.player,
            index: id.index,
        })?;
        if !is_legal_move(path, token, dice) {
            return Err(IllegalMove::TokenNotMovable {
                player: id.player,
                index: id.index,
                dice,
            });
        }
        if token.is_at_home() {
            token.position = 0;
            events.push(GameEvent::Entered { token: id });
        } else {
            token.position += dice as i8;
        }
        if token.position == path.finish_position() {
            token.finished = true;
            events.push(GameEvent::Finished { token: id });
        }
        *token
    };

    if let Some(cell) = path
        .cell_of(moved.player, moved.position)
        .filter(|&cell| !path.is_safe(cell))
    {
        for other in state
            .tokens
            .iter_mut()
            .flatten()
            .filter(|other| other.player != moved.player && other.is_on_board())
        {
            if path.cell_of(other.player, other.position) == Some(cell) {
                debug!(token = %other.id(), by = %id, %cell, "Token captured");
                other.position = HOME;
                events.push(GameEvent::Captured {
                    token: other.id(),
                    by: id,
                    cell,
                });
            }
        }
    }

    if has_won(state, moved.player) {
        events.push(GameEvent::Won {
            player: moved.player,
        });
    }

    Ok(MoveEffects { events })
}

/// True iff all tokens of `player` are finished.
pub fn has_won(state: &GameState, player: usize) -> bool {
    state
        .player_tokens(player)
        .is_some_and(|tokens| tokens.iter().all(|token| token.finished))
}

pub fn winner(state: &GameState) -> Option<usize> {
    (0..state.num_players()).find(|&player| has_won(state, player))
}
